//! JSON-lines transcript of a game.

use anyhow::{Context, Result};
use fairdice_core::protocol::TranscriptEntry;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Transcript written to a file
pub type FileTranscript = Transcript<BufWriter<File>>;

/// Appends one JSON object per protocol message
pub struct Transcript<W: Write> {
    out: W,
}

impl FileTranscript {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open transcript {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, entry: &TranscriptEntry) -> Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
