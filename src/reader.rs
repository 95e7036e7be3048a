//! High-level API for reading sentinel log files.

use crate::decoder::decode_records;
use crate::error::Result;
use crate::header::parse_header;
use crate::logfile::LogFile;
use crate::models::FieldDescriptor;
use crate::Records;
use log::info;
use std::path::Path;

/// A reader for sentinel log files.
///
/// The header is parsed when the reader is built, so a malformed header is
/// reported before any record is decoded.
///
/// # Examples
///
/// ```no_run
/// use logysis::LogReader;
///
/// let reader = LogReader::from_file("run.log")?;
/// let records = reader.read_all()?;
/// # Ok::<(), logysis::Error>(())
/// ```
#[derive(Debug)]
pub struct LogReader {
    log: LogFile,
    fields: Vec<FieldDescriptor>,
}

impl LogReader {
    /// Create a reader from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its header is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        LogReaderBuilder::new().from_file(path)
    }

    /// Create a reader from log text already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed.
    pub fn from_text(text: &str) -> Result<Self> {
        LogReaderBuilder::new().from_text(text)
    }

    fn with_options(log: LogFile, options: &LogReaderBuilder) -> Result<Self> {
        let fields = parse_header(log.lines(), options.allow_unterminated_header)?;
        info!(
            "Read {} line(s), {} field(s), {} sentinel(s)",
            log.lines().len(),
            fields.len(),
            log.sentinel_count()
        );
        Ok(Self { log, fields })
    }

    /// Field descriptors declared by the header, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The underlying lines and sentinel positions.
    pub fn log_file(&self) -> &LogFile {
        &self.log
    }

    /// Decode every record in file order.
    ///
    /// # Errors
    ///
    /// Fails on the first record that cannot be decoded, or if the file has
    /// fewer than two `---` lines.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logysis::LogReader;
    ///
    /// let records = LogReader::from_file("run.log")?.read_all()?;
    /// for record in &records {
    ///     for (name, value) in record.iter() {
    ///         println!("{}: {}", name, value.type_name());
    ///     }
    /// }
    /// # Ok::<(), logysis::Error>(())
    /// ```
    pub fn read_all(&self) -> Result<Records> {
        decode_records(&self.log, &self.fields)
    }
}

/// Builder for configuring log parsing options.
///
/// # Examples
///
/// ```no_run
/// use logysis::LogReaderBuilder;
///
/// let reader = LogReaderBuilder::new()
///     .allow_unterminated_header(true)
///     .from_file("run.log")?;
/// let records = reader.read_all()?;
/// # Ok::<(), logysis::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogReaderBuilder {
    allow_unterminated_header: bool,
}

impl LogReaderBuilder {
    /// Create a new reader builder with default options.
    pub fn new() -> Self {
        Self {
            allow_unterminated_header: false,
        }
    }

    /// Accept a header without a closing `###`, reading descriptors to the end of input.
    ///
    /// A file with no header at all then decodes into empty records. Default is `false`.
    pub fn allow_unterminated_header(mut self, allow: bool) -> Self {
        self.allow_unterminated_header = allow;
        self
    }

    /// Build a reader from a file path.
    pub fn from_file<P: AsRef<Path>>(self, path: P) -> Result<LogReader> {
        LogReader::with_options(LogFile::from_file(path)?, &self)
    }

    /// Build a reader from log text.
    pub fn from_text(self, text: &str) -> Result<LogReader> {
        LogReader::with_options(LogFile::from_text(text), &self)
    }
}

impl Default for LogReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and decode a whole log file with default options.
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<Records> {
    LogReader::from_file(path)?.read_all()
}
