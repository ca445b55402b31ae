#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mason_core::{PlanEditor, PlanEditorBuilder};
use tempfile::TempDir;

/// A construction screen with wood_pit at level 3 (both pathways open),
/// clay_pit at level 7 with a running order, and one in-progress order of
/// five hours.
pub const PAGE: &str = r#"{
    "constructionBlocked": false,
    "buildings": [
        {
            "id": "wood_pit",
            "name": "Timber camp",
            "levelLabel": "Level 3",
            "nextLevel": 4,
            "timer": "",
            "standard": { "href": "/game.php?action=upgrade_building&id=wood_pit" },
            "discounted": { "href": "/game.php?action=upgrade_building&id=wood_pit&type=cheap" }
        },
        {
            "id": "clay_pit",
            "name": "Clay pit",
            "levelLabel": "Level 7",
            "nextLevel": 8,
            "timer": "0:05:00",
            "standard": { "href": "/game.php?action=upgrade_building&id=clay_pit", "disabled": true }
        }
    ],
    "queue": [
        {
            "position": 1,
            "building": "main",
            "remaining": "5:00:00",
            "reductions": [{ "href": "/game.php?action=btr&id=1" }]
        }
    ]
}"#;

/// Helper function to create a test editor
pub async fn create_test_editor() -> (TempDir, PlanEditor) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let editor = PlanEditorBuilder::new()
        .with_database_path(Some(&db_path))
        .with_context("village-1")
        .build()
        .await
        .expect("Failed to create editor");
    (temp_dir, editor)
}

/// Writes a page snapshot next to the database and returns its path.
pub fn write_page(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("page.json");
    std::fs::write(&path, json).expect("Failed to write page snapshot");
    path
}
