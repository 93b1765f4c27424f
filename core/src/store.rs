use crate::error::StorageError;
use crate::stats::Stats;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// JSON file holding the `Stats` aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stats file. A missing file is the empty aggregate; unreadable,
    /// malformed, or inconsistent files are errors.
    pub fn try_load(&self) -> Result<Stats, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stats file at {:?}", self.path);
                return Ok(Stats::default());
            }
            Err(e) => return Err(e.into()),
        };

        let stats: Stats = serde_json::from_str(&content)?;
        stats.validate()?;
        Ok(stats)
    }

    /// Like `try_load`, but any failure yields the empty aggregate.
    pub fn load(&self) -> Stats {
        self.try_load().unwrap_or_else(|e| {
            warn!("Ignoring stats file {:?}: {}", self.path, e);
            Stats::default()
        })
    }

    /// Replaces the stats file with `stats`. The JSON goes to a temporary
    /// file next to the target which is then renamed over it, so readers see
    /// either the old or the new aggregate.
    pub fn save(&self, stats: &Stats) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(stats)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        info!(
            "Saved stats to {:?} ({} problems, {} correct)",
            self.path, stats.total_problems, stats.correct_problems
        );
        Ok(())
    }

    /// Deletes the stats file. Succeeds if it is already gone.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed stats file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
