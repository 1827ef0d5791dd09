//! # RouteLog
//!
//! Append-only JSON-lines file of robot routes, for visualising runs after the fact.
//! Each call to [`RouteLog::record`] writes one line.
//!
//! ```rust,no_run
//! use gaze::maze::{Position, RouteStep};
//! use gaze::route_log::RouteLog;
//!
//! let log = RouteLog::new("routes.jsonl");
//! log.clear()?;
//! log.record(&[RouteStep::Move(Position::new(8, 0))])?;
//!
//! let routes: Vec<Vec<RouteStep>> = log.read()?;
//! assert_eq!(routes.len(), 1);
//! # Ok::<(), gaze::GeneticError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{Result, ResultExt};

#[derive(Debug, Clone)]
pub struct RouteLog {
    path: PathBuf,
}

impl RouteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `entry` as one JSON line, creating the file if needed.
    pub fn record<T>(&self, entry: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, entry).context(format!(
            "Failed to write route to {}",
            self.path.display()
        ))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Removes the log. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "route log cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses every recorded line, in order.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Other` naming the line that is
    /// not valid JSON for `T`.
    pub fn read<T>(&self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).context(format!(
                "Malformed route log line {} in {}",
                index + 1,
                self.path.display()
            ))?;
            entries.push(entry);
        }
        Ok(entries)
    }
}
