use crate::output::records::{OutputError, OutputResult};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only log of every URL accepted into the pending queue
///
/// Each URL is written as its own line as soon as it is queued, so the log is
/// useful even if the process is killed mid-crawl. Write failures are kept
/// and reported at the end of the run instead of stopping the crawl.
#[derive(Debug)]
pub struct FrontierLog {
    path: PathBuf,
    file: File,
    failures: Vec<OutputError>,
}

impl FrontierLog {
    /// Creates the log, truncating any previous one
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| OutputError::Write {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            failures: Vec::new(),
        })
    }

    pub fn append(&mut self, url: &str) {
        if let Err(source) = writeln!(self.file, "{}", url) {
            tracing::warn!("Failed to append {} to {}: {}", url, self.path.display(), source);
            self.failures.push(OutputError::Write {
                path: self.path.display().to_string(),
                source,
            });
        }
    }

    /// Takes the write failures recorded so far
    pub fn take_failures(&mut self) -> Vec<OutputError> {
        std::mem::take(&mut self.failures)
    }
}
