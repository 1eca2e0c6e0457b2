//! Report sinks: ordered line emitters.

use std::fs::File;
use std::io::{self, BufWriter, StdoutLock, Write};
use std::path::Path;

use console::style;

use crate::types::{CodeGradeError, Result};

/// How a line should be presented by sinks that support styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Section,
    Plain,
}

pub trait ReportSink {
    fn emit(&mut self, kind: LineKind, line: &str) -> Result<()>;

    fn line(&mut self, line: &str) -> Result<()> {
        self.emit(LineKind::Plain, line)
    }

    fn blank(&mut self) -> Result<()> {
        self.emit(LineKind::Plain, "")
    }
}

/// Collects plain lines; used by tests and for in-memory rendering
impl ReportSink for Vec<String> {
    fn emit(&mut self, _kind: LineKind, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Writes to stdout, styling titles and sections when `styled` is set.
///
/// Write failures such as a closed pipe are returned, never panicked on.
pub struct ConsoleSink<W: Write = StdoutLock<'static>> {
    writer: W,
    styled: bool,
}

impl ConsoleSink {
    pub fn new(styled: bool) -> Self {
        Self::with_writer(io::stdout().lock(), styled)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn with_writer(writer: W, styled: bool) -> Self {
        Self { writer, styled }
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, kind: LineKind, line: &str) -> Result<()> {
        match (self.styled, kind) {
            (true, LineKind::Title) => {
                writeln!(self.writer, "{}", style(line).bold().underlined())?
            }
            (true, LineKind::Section) => writeln!(self.writer, "{}", style(line).bold().cyan())?,
            _ => writeln!(self.writer, "{}", line)?,
        }
        Ok(())
    }
}

/// Writes plain lines to a file; call [`FileSink::finish`] to flush
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            CodeGradeError::Report(format!("Cannot create {}: {}", path.display(), e))
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl ReportSink for FileSink {
    fn emit(&mut self, _kind: LineKind, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}
