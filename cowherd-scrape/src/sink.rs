//! Append-only text sinks framing extracted page runs.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Literal marker opening one extracted page run.
pub const TEXT_OPEN: &str = "<text>";
/// Literal marker closing one extracted page run.
pub const TEXT_CLOSE: &str = "</text>";

/// Append-only destination for extracted text.
///
/// One sink serves one document version; it outlives any single page fetch
/// and is never truncated mid-run.
pub trait TextSink: Send {
    /// Open a document frame.
    fn begin_document(&mut self) -> io::Result<()>;
    /// Append one page's text.
    fn append_page(&mut self, text: &str) -> io::Result<()>;
    /// Close the document frame.
    fn end_document(&mut self) -> io::Result<()>;
}

/// File-backed sink. Always opens in append mode, so output written before
/// an interruption survives the next run.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<FileSink> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink { file })
    }
}

impl TextSink for FileSink {
    fn begin_document(&mut self) -> io::Result<()> {
        writeln!(self.file, "{TEXT_OPEN}")
    }

    fn append_page(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.file, "{text}")
    }

    fn end_document(&mut self) -> io::Result<()> {
        writeln!(self.file, "{TEXT_CLOSE}")?;
        self.file.flush()
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub contents: String,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }
}

impl TextSink for MemorySink {
    fn begin_document(&mut self) -> io::Result<()> {
        self.contents.push_str(TEXT_OPEN);
        self.contents.push('\n');
        Ok(())
    }

    fn append_page(&mut self, text: &str) -> io::Result<()> {
        self.contents.push_str(text);
        self.contents.push('\n');
        Ok(())
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.contents.push_str(TEXT_CLOSE);
        self.contents.push('\n');
        Ok(())
    }
}
