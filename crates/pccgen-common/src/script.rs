//! Generated script container and output sinks.
//!
//! A [`ConfigScript`] is an ordered list of statement lines. Sinks persist
//! it without reordering: every line is written once, newline-terminated,
//! in the order it was pushed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{GenError, GenResult};

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "generated_script.rsc";

/// An ordered sequence of configuration statement lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigScript {
    lines: Vec<String>,
}

impl ConfigScript {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends an empty separator line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Appends every line from an iterator.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    /// Returns the lines in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, blank lines included.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over statement lines, skipping comments and blanks.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
    }

    /// Writes every line, newline-terminated, to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Renders the script as the exact text a sink would write.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Destination for a generated script.
pub trait ScriptSink {
    /// Human-readable name of the destination, used in messages.
    fn target(&self) -> String;

    /// Persists the whole script.
    fn write_script(&mut self, script: &ConfigScript) -> GenResult<()>;
}

/// Writes the script to a file, creating or truncating it.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScriptSink for FileSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    fn write_script(&mut self, script: &ConfigScript) -> GenResult<()> {
        debug!(path = %self.path.display(), lines = script.len(), "Writing script file");

        // The file handle is dropped on every return path.
        let file = File::create(&self.path).map_err(|e| GenError::write_failed(self.target(), e))?;
        let mut writer = BufWriter::new(file);
        script
            .write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| GenError::write_failed(self.target(), e))?;

        info!(path = %self.path.display(), lines = script.len(), "Script written");
        Ok(())
    }
}

/// Writes the script to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ScriptSink for StdoutSink {
    fn target(&self) -> String {
        "<stdout>".to_string()
    }

    fn write_script(&mut self, script: &ConfigScript) -> GenResult<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        script
            .write_to(&mut lock)
            .and_then(|_| lock.flush())
            .map_err(|e| GenError::write_failed(self.target(), e))
    }
}

/// Keeps written lines in memory. Used by tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ScriptSink for MemorySink {
    fn target(&self) -> String {
        "<memory>".to_string()
    }

    fn write_script(&mut self, script: &ConfigScript) -> GenResult<()> {
        self.lines.extend(script.lines().iter().cloned());
        Ok(())
    }
}
