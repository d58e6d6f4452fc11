// src/store.rs
// =============================================================================
// Saves the found URLs at the end of a crawl.
//
// UrlSink is the seam; FileSink writes one URL per line and replaces
// whatever the file held before.
// =============================================================================

use crate::error::SaveError;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "found.txt";

pub trait UrlSink {
    fn save(&self, urls: &BTreeSet<String>) -> Result<(), SaveError>;
}

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SaveError {
        SaveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl UrlSink for FileSink {
    fn save(&self, urls: &BTreeSet<String>) -> Result<(), SaveError> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        for url in urls {
            writeln!(writer, "{}", url).map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), count = urls.len(), "saved found URLs");
        Ok(())
    }
}
