//! String list files
//!
//! Writes string collections one per line and reads them back.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Default buffer size for file writing (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Line-oriented output file
///
/// The file is created or truncated on open. Buffered data is flushed on
/// drop, so the handle is released on every exit path.
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    pub fn new(path: &Path) -> Result<Self> {
        Self::with_capacity(path, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(path: &Path, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path: path.to_path_buf(),
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write `line` followed by a newline
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Write each string on its own line, replacing any existing content
pub fn write_lines<S: AsRef<str>>(strings: &[S], path: &Path) -> Result<()> {
    let mut writer = OutputWriter::new(path)?;

    for s in strings {
        writer.write_line(s.as_ref())?;
    }
    writer.flush()?;

    debug!(
        "Wrote {} lines ({} bytes) to {:?}",
        writer.lines_written(),
        writer.bytes_written(),
        writer.path()
    );
    Ok(())
}

/// Read a string list, one entry per line, without line terminators
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();

    // `lines` strips both `\n` and `\r\n`
    for line in reader.lines() {
        lines.push(line?);
    }

    debug!("Read {} lines from {:?}", lines.len(), path);
    Ok(lines)
}
