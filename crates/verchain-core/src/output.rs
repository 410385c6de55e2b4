//! Pipeline outputs
//!
//! Resolved values are handed to an [`OutputSink`] as soon as they exist.
//! On a pipeline runner that is the file named by `GITHUB_OUTPUT`; local
//! runs print `name=value` lines instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment variable naming the runner's output file.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// Receives each resolved value exactly once, in resolution order.
pub trait OutputSink {
    fn publish(&mut self, name: &str, value: &str) -> anyhow::Result<()>;
}

/// Appends outputs to the runner's output file.
#[derive(Debug, Clone)]
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output file from `GITHUB_OUTPUT`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        std::env::var_os(OUTPUT_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for GithubOutputFile {
    fn publish(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        let entry = format_output_entry(name, value)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file: {}", self.path.display()))?;
        file.write_all(entry.as_bytes())
            .with_context(|| format!("Failed to write output file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Render one output file entry.
///
/// Single-line values use `name=value`; values containing a newline use the
/// `name<<delimiter` heredoc form.
pub fn format_output_entry(name: &str, value: &str) -> anyhow::Result<String> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{}={}\n", name, value));
    }

    let nonce = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_micros());
    let delimiter = format!("ghadelimiter_{}", nonce);
    if name.contains(&delimiter) || value.contains(&delimiter) {
        anyhow::bail!(
            "Output '{}' contains the delimiter {}; refusing to write it",
            name,
            delimiter
        );
    }

    Ok(format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter))
}

/// Prints `name=value` lines on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn publish(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        println!("{}={}", name, value);
        Ok(())
    }
}

/// Keeps publications in memory, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    entries: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Latest value published under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn publish(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        self.entries.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// Render a pipeline error annotation for a failed run.
///
/// `%`, `\r` and `\n` are escaped so multi-line messages stay one command.
pub fn error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}
