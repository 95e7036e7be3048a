/// Test utilities for building sentinel log files
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating log test files
pub struct LogFileBuilder {
    text: String,
}

impl LogFileBuilder {
    /// Create a new builder with an empty log
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Add an arbitrary line
    pub fn line(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// Add a complete `###` header with one `name,kind,subtype` line per field
    pub fn header(mut self, fields: &[(&str, &str, &str)]) -> Self {
        self = self.line("###");
        for (name, kind, subtype) in fields {
            self = self.line(&format!("{},{},{}", name, kind, subtype));
        }
        self.line("###")
    }

    /// Add a `---` sentinel followed by one data line per field
    pub fn record(mut self, values: &[&str]) -> Self {
        self = self.line("---");
        for value in values {
            self = self.line(value);
        }
        self
    }

    /// Add the closing `---` sentinel
    pub fn finish(self) -> Self {
        self.line("---")
    }

    /// Get the log text
    pub fn build(self) -> String {
        self.text
    }

    /// Write the log text into `dir` and return the file path
    pub fn write_to(self, dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path)
            .unwrap()
            .write_all(self.text.as_bytes())
            .unwrap();
        path
    }
}

impl Default for LogFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
