//! Per-tick world refresh.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::debug;

use super::{
    page::{PageAction, SnapshotWorld},
    snapshot::PageSnapshot,
    ActionActuator, WorldSensor,
};
use crate::error::{MasonError, Result};

/// Produces a freshly observed world for each tick and takes back the
/// world's pending effects afterwards.
///
/// `refresh` is the full state reload between ticks: nothing observed in
/// one tick may be reused in the next.
pub trait WorldSource {
    type World: WorldSensor + ActionActuator;

    /// Observes the world anew.
    fn refresh(&mut self) -> Result<Self::World>;

    /// Hands the effects collected during a tick over to the host.
    fn settle(&mut self, world: Self::World) -> Result<Vec<PageAction>>;
}

/// Reads a [`PageSnapshot`] from a JSON file on every refresh and writes the
/// resulting page actions as JSON lines to a sink.
pub struct SnapshotFile<W: Write> {
    path: PathBuf,
    sink: W,
}

impl<W: Write> SnapshotFile<W> {
    /// Watches the snapshot at `path`, emitting actions to `sink`.
    pub fn new(path: impl Into<PathBuf>, sink: W) -> Self {
        Self {
            path: path.into(),
            sink,
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot once, without building a world.
    pub fn read_snapshot(&self) -> Result<PageSnapshot> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| MasonError::file_system(&self.path, e))?;
        PageSnapshot::from_json(&json)
    }

    /// Consumes the source, returning the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W: Write> WorldSource for SnapshotFile<W> {
    type World = SnapshotWorld;

    fn refresh(&mut self) -> Result<SnapshotWorld> {
        let page = self.read_snapshot()?;
        debug!(
            "Read snapshot {} ({} buildings, {} queued)",
            self.path.display(),
            page.buildings.len(),
            page.queue.len()
        );
        Ok(SnapshotWorld::new(page))
    }

    fn settle(&mut self, mut world: SnapshotWorld) -> Result<Vec<PageAction>> {
        let actions = world.take_actions();
        for action in &actions {
            serde_json::to_writer(&mut self.sink, action)?;
            writeln!(self.sink).map_err(|e| MasonError::file_system("<action sink>", e))?;
        }
        self.sink
            .flush()
            .map_err(|e| MasonError::file_system("<action sink>", e))?;
        Ok(actions)
    }
}
