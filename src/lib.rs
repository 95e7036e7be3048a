//! # Logysis
//!
//! A decoder for sentinel-delimited text logs: a `###` schema header declaring
//! named fields, followed by `---`-separated record blocks with one data line per
//! field.
//!
//! ## Quick Start
//!
//! ```no_run
//! use logysis::LogReader;
//!
//! let reader = LogReader::from_file("run.log")?;
//! let records = reader.read_all()?;
//!
//! println!("Read {} records", records.len());
//! # Ok::<(), logysis::Error>(())
//! ```
//!
//! ## File Format
//!
//! ```text
//! ###
//! step,val,int
//! keypoints,csv,float32
//! ###
//! ---
//! 5
//! 2x2,1,2,3,4
//! ---
//! ```
//!
//! `,` and `;` are interchangeable separators. The last `---` only terminates
//! the final record.
//!
//! ## Data Types
//!
//! - **`val`**: `int`, `float`, `str`, `bool` (`0`/`1`)
//! - **`csv`**: `float32`, `uint8` arrays encoded as `<d1>x<d2>x...,<v1>,<v2>,...`
//!
//! ## Error Handling
//!
//! ```no_run
//! use logysis::{Error, LogReader};
//!
//! match LogReader::from_file("run.log").and_then(|r| r.read_all()) {
//!     Ok(records) => println!("{} records", records.len()),
//!     Err(Error::FieldDecode { record, field, source }) => {
//!         eprintln!("record {} field {}: {}", record, field, source);
//!     }
//!     Err(err) => eprintln!("Error: {}", err),
//! }
//! ```

pub mod error;
pub mod reader;

pub use error::{DecodeError, Error, Result};
pub use reader::{read_log, LogReader, LogReaderBuilder};

pub use models::{ArrayType, FieldDescriptor, FieldType, Record, ScalarType, Value};

// Lower-level stages, usable on their own
pub mod decoder;
pub mod header;
pub mod logfile;
pub mod models;

/// Alias for the result of decoding a log file
pub type Records = Vec<Record>;
