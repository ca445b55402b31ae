use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::{
    error::MasonError,
    models::{Level, SlotPosition, NEVER},
};

const SNAPSHOT: &str = r##"{
    "constructionBlocked": false,
    "buildings": [
        {
            "id": "wood_pit",
            "name": "Timber camp",
            "levelLabel": "Level 3",
            "nextLevel": 4,
            "timer": "0:41:10",
            "standard": { "href": "/game.php?action=upgrade_building&id=wood_pit" },
            "discounted": { "href": "/game.php?action=upgrade_building&id=wood_pit&type=cheap" }
        },
        {
            "id": "clay_pit",
            "name": "Clay pit",
            "levelLabel": "Level 7",
            "nextLevel": 8,
            "timer": "",
            "standard": { "href": "/game.php?action=upgrade_building&id=clay_pit", "disabled": true },
            "discounted": { "href": "#" }
        },
        {
            "id": "iron_mine",
            "name": "Iron mine",
            "levelLabel": "Level 2",
            "nextLevel": 3,
            "timer": "soon",
            "standard": { "href": "/game.php?action=upgrade_building&id=iron_mine", "inBuildOptions": false },
            "discounted": { "href": "/game.php?action=upgrade_building&id=iron_mine" }
        },
        {
            "id": "wall",
            "name": "Wall",
            "levelLabel": "Level 20",
            "fullyUpgraded": true
        }
    ],
    "queue": [
        {
            "position": 2,
            "building": "main",
            "remaining": "5:00:00",
            "reductions": [
                { "href": "/game.php?action=btr&id=2&instant=1", "instant": true },
                { "href": "/game.php?action=btr&id=2" }
            ]
        },
        {
            "position": 1,
            "building": "farm",
            "remaining": "3:00:00",
            "reductions": [{ "href": "/game.php?action=btr&id=1" }]
        },
        { "position": 3, "building": "smith", "remaining": "9:00:00" }
    ]
}"##;

fn world() -> SnapshotWorld {
    SnapshotWorld::new(PageSnapshot::from_json(SNAPSHOT).expect("snapshot parses"))
}

#[test]
fn test_parse_clock() {
    assert_eq!(parse_clock("0:41:10"), Some(Duration::from_secs(41 * 60 + 10)));
    assert_eq!(parse_clock("26:00:00"), Some(Duration::from_secs(26 * 3600)));
    assert_eq!(parse_clock(" 1:02:03 "), Some(Duration::from_secs(3723)));
    assert_eq!(parse_clock("1:60:00"), None);
    assert_eq!(parse_clock("1:00"), None);
    assert_eq!(parse_clock("1:00:00:00"), None);
    assert_eq!(parse_clock("soon"), None);
}

#[test]
fn test_current_level_from_next_level() {
    let world = world();
    assert_eq!(world.current_level("wood_pit").unwrap(), Level::Known(3));
    assert_eq!(world.current_level("wall").unwrap(), Level::Unknown);
    assert_eq!(world.current_level("stable").unwrap(), Level::Unknown);
}

#[test]
fn test_remaining_action_time() {
    let world = world();
    assert_eq!(
        world.remaining_action_time("wood_pit").unwrap(),
        Duration::from_secs(2470)
    );
    assert_eq!(world.remaining_action_time("clay_pit").unwrap(), Duration::ZERO);
    assert_eq!(world.remaining_action_time("wall").unwrap(), NEVER);
    assert_eq!(world.remaining_action_time("stable").unwrap(), NEVER);
    assert!(matches!(
        world.remaining_action_time("iron_mine"),
        Err(MasonError::ObservationGap { .. })
    ));
}

#[test]
fn test_can_order_checks_every_condition() {
    let world = world();
    assert!(world.can_order("wood_pit", true).unwrap());
    assert!(world.can_order("wood_pit", false).unwrap());

    // disabled standard control, placeholder discounted link
    assert!(!world.can_order("clay_pit", false).unwrap());
    assert!(!world.can_order("clay_pit", true).unwrap());

    // standard control outside the build options, discounted link on the
    // standard pathway
    assert!(!world.can_order("iron_mine", false).unwrap());
    assert!(!world.can_order("iron_mine", true).unwrap());

    assert!(!world.can_order("wall", true).unwrap());
    assert!(!world.can_order("stable", true).unwrap());
}

#[test]
fn test_active_slots_are_bounded_and_ordered() {
    let slots = world().active_slots().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].position, SlotPosition::First);
    assert_eq!(slots[0].building, "farm");
    assert_eq!(slots[0].remaining, Duration::from_secs(3 * 3600));
    assert_eq!(slots[1].position, SlotPosition::Second);
    assert_eq!(slots[1].building, "main");
}

#[test]
fn test_oversized_durations_are_unreadable() {
    assert_eq!(parse_clock("9999999999999999:00:00"), None);

    let page = SNAPSHOT
        .replace(r#""remaining": "5:00:00""#, r#""remaining": "9999999999999999:00:00""#)
        .replace(r#""timer": "0:41:10""#, r#""timer": "9999999999999999:00:00""#);
    let world = SnapshotWorld::new(PageSnapshot::from_json(&page).unwrap());

    let slots = world.active_slots().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].building, "farm");
    assert!(matches!(
        world.remaining_action_time("wood_pit"),
        Err(MasonError::ObservationGap { .. })
    ));
}

#[test]
fn test_entities_skip_fully_upgraded() {
    let entities = world().page().entities();
    let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["wood_pit", "clay_pit", "iron_mine"]);
    assert_eq!(entities[0].display_name, "Timber camp");
    assert_eq!(entities[0].current_level(), 3);
}

#[test]
fn test_entity_listing_level_without_digits() {
    let listing = EntityListing {
        id: "wood_pit".to_string(),
        display_name: "Timber camp".to_string(),
        current_level_label: "unknown".to_string(),
    };
    assert_eq!(listing.current_level(), 0);
}

#[test]
fn test_order_collects_navigation() {
    let mut world = world();
    assert!(world.order("wood_pit", true).unwrap());
    assert_eq!(
        world.actions(),
        &[PageAction::Order {
            building: "wood_pit".to_string(),
            discounted: true,
            href: "/game.php?action=upgrade_building&id=wood_pit&type=cheap".to_string(),
        }]
    );
}

#[test]
fn test_order_without_control_has_no_effect() {
    let mut world = world();
    assert!(!world.order("clay_pit", false).unwrap());
    assert!(!world.order("stable", true).unwrap());
    assert!(world.actions().is_empty());
}

#[test]
fn test_second_order_in_same_tick_is_rejected() {
    let mut world = world();
    assert!(world.order("wood_pit", false).unwrap());
    assert!(matches!(
        world.order("wood_pit", true),
        Err(MasonError::ActionRejected { .. })
    ));
    assert_eq!(world.actions().len(), 1);
}

#[test]
fn test_latest_reduction_after_order_is_deferred() {
    let mut world = world();
    world.order("wood_pit", true).unwrap();
    assert!(world.apply_time_reduction(ReductionTarget::Latest).unwrap());
    assert_eq!(world.actions()[1], PageAction::ReduceLatestAfterLoad);
}

#[test]
fn test_latest_reduction_without_order_uses_last_control() {
    let mut world = world();
    assert!(world.apply_time_reduction(ReductionTarget::Latest).unwrap());
    assert_eq!(
        world.actions(),
        &[PageAction::Reduce {
            slot: None,
            href: "/game.php?action=btr&id=1".to_string(),
        }]
    );
}

#[test]
fn test_slot_reduction_skips_instant_control() {
    let mut world = world();
    assert!(world
        .apply_time_reduction(ReductionTarget::Slot(SlotPosition::Second))
        .unwrap());
    assert_eq!(
        world.actions(),
        &[PageAction::Reduce {
            slot: Some(SlotPosition::Second),
            href: "/game.php?action=btr&id=2".to_string(),
        }]
    );
}

#[test]
fn test_reduction_without_control_returns_false() {
    let mut world = SnapshotWorld::new(PageSnapshot::default());
    assert!(!world.apply_time_reduction(ReductionTarget::Latest).unwrap());
    assert!(!world
        .apply_time_reduction(ReductionTarget::Slot(SlotPosition::First))
        .unwrap());
    assert!(world.actions().is_empty());
}

#[test]
fn test_page_action_json_shape() {
    let json = serde_json::to_value(PageAction::Reduce {
        slot: Some(SlotPosition::First),
        href: "/btr".to_string(),
    })
    .unwrap();
    assert_eq!(json["action"], "reduce");
    assert_eq!(json["slot"], 1);

    let json = serde_json::to_value(PageAction::ReduceLatestAfterLoad).unwrap();
    assert_eq!(json["action"], "reduce_latest_after_load");
}

#[test]
fn test_snapshot_file_refresh_and_settle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("page.json");
    std::fs::write(&path, SNAPSHOT).unwrap();

    let mut source = SnapshotFile::new(&path, Vec::new());
    let mut world = source.refresh().unwrap();
    world.order("wood_pit", false).unwrap();

    let actions = source.settle(world).unwrap();
    assert_eq!(actions.len(), 1);

    let written = String::from_utf8(source.into_sink()).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains(r#""action":"order""#));
}

#[test]
fn test_snapshot_file_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut source = SnapshotFile::new(temp_dir.path().join("absent.json"), Vec::new());
    assert!(matches!(
        source.refresh(),
        Err(MasonError::FileSystem { .. })
    ));
}
