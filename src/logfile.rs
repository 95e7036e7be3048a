//! Line loading and record delimiting.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Line separating record blocks.
pub const RECORD_SENTINEL: &str = "---";

/// The raw lines of a log file together with the positions of its `---` sentinels.
#[derive(Debug, Clone)]
pub struct LogFile {
    lines: Vec<String>,
    sentinels: Vec<usize>,
}

impl LogFile {
    /// Load a log file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file is missing, unreadable, or not UTF-8 text.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!(
            "Loaded {} byte(s) from {}",
            text.len(),
            path.as_ref().display()
        );
        Ok(Self::from_text(&text))
    }

    /// Split already loaded text into lines and locate the sentinels.
    ///
    /// Only a single trailing `\n` is removed from each line; `\r` is kept.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .split_inclusive('\n')
            .map(|line| line.strip_suffix('\n').unwrap_or(line).to_string())
            .collect();

        let sentinels = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.as_str() == RECORD_SENTINEL)
            .map(|(i, _)| i)
            .collect();

        Self { lines, sentinels }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of `---` lines in the file, including the terminal one.
    pub fn sentinel_count(&self) -> usize {
        self.sentinels.len()
    }

    /// Positions of the `---` lines that open a record.
    ///
    /// The last sentinel only closes the final record, so it is not included.
    pub fn boundaries(&self) -> &[usize] {
        match self.sentinels.split_last() {
            Some((_, opening)) => opening,
            None => &[],
        }
    }

    /// Iterate over the record blocks of the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundaryUnderflow`] if the file has fewer than two sentinels.
    pub fn blocks(&self) -> Result<RecordBlocks<'_>> {
        if self.sentinels.len() < 2 {
            return Err(Error::BoundaryUnderflow {
                found: self.sentinels.len(),
            });
        }

        Ok(RecordBlocks {
            lines: &self.lines,
            boundaries: self.boundaries(),
            pos: 0,
        })
    }
}

/// A single record block: the `---` line at `start` followed by one data line per field.
#[derive(Debug, Clone, Copy)]
pub struct RecordBlock<'a> {
    /// Zero-based record number in file order.
    pub index: usize,
    /// Line number of the opening sentinel.
    pub start: usize,
    lines: &'a [String],
}

impl<'a> RecordBlock<'a> {
    /// The line `offset` lines after the opening sentinel, if the file is long enough.
    pub fn line(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.start + offset).map(String::as_str)
    }
}

pub struct RecordBlocks<'a> {
    lines: &'a [String],
    boundaries: &'a [usize],
    pos: usize,
}

impl<'a> Iterator for RecordBlocks<'a> {
    type Item = RecordBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = *self.boundaries.get(self.pos)?;
        let block = RecordBlock {
            index: self.pos,
            start,
            lines: self.lines,
        };
        self.pos += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.boundaries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecordBlocks<'_> {}
