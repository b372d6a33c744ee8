//! Destinations for log lines that could not be used.
//!
//! Every entry is two text lines: the path of the log file the line came from, then the
//! raw line itself.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait RejectSink {
    fn reject(&mut self, file: &Path, line: &str) -> io::Result<()>;
}

/// Appends entries to a text file, created on the first rejection.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileSink {
        FileSink {
            path: path.into(),
            writer: None,
        }
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => BufWriter::new(
                OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(&self.path)?,
            ),
        };
        Ok(self.writer.get_or_insert(writer))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl RejectSink for FileSink {
    fn reject(&mut self, file: &Path, line: &str) -> io::Result<()> {
        let source = display_path(file);
        let writer = self.writer()?;
        writeln!(writer, "{}", source)?;
        writeln!(writer, "{}", line)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Absolute path with `/` separators on every platform.
fn display_path(file: &Path) -> String {
    let absolute = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    absolute.to_string_lossy().replace('\\', "/")
}

/// Keeps rejected entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<(PathBuf, String)>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RejectSink for MemorySink {
    fn reject(&mut self, file: &Path, line: &str) -> io::Result<()> {
        self.entries.push((file.to_path_buf(), line.to_string()));
        Ok(())
    }
}
