//! Typed decoding of record data lines.

use crate::error::{DecodeError, Error, Result};
use crate::header::split_fields;
use crate::logfile::{LogFile, RecordBlock};
use crate::models::{ArrayType, FieldDescriptor, FieldType, Record, ScalarType, Value};
use crate::Records;
use log::{debug, info};
use ndarray::{ArrayD, IxDyn};

/// Decode a `val` data line.
pub fn decode_scalar(
    line: &str,
    scalar_type: ScalarType,
) -> std::result::Result<Value, DecodeError> {
    match scalar_type {
        ScalarType::Int => line
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|source| DecodeError::InvalidInt {
                value: line.to_string(),
                source,
            }),
        ScalarType::Float => parse_float(line).map(Value::Float),
        ScalarType::Str => Ok(Value::Str(line.to_string())),
        ScalarType::Bool => match line {
            "0" => Ok(Value::Bool(false)),
            "1" => Ok(Value::Bool(true)),
            other => Err(DecodeError::InvalidBool(other.to_string())),
        },
    }
}

/// Decode a `csv` data line of the form `<d1>x<d2>x...,<v1>,<v2>,...`.
///
/// Elements fill the array in row-major order.
pub fn decode_array(
    line: &str,
    array_type: ArrayType,
) -> std::result::Result<Value, DecodeError> {
    let compact = line.replace(' ', "");
    let mut tokens: Vec<&str> = split_fields(&compact).collect();
    if tokens.last() == Some(&"") {
        tokens.pop();
    }

    let (dims, elements) = tokens
        .split_first()
        .ok_or_else(|| DecodeError::InvalidShape(String::new()))?;
    let shape = parse_shape(dims)?;

    let values = elements
        .iter()
        .map(|e| parse_float(e))
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    let expected = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| DecodeError::InvalidShape(dims.to_string()))?;
    if values.len() != expected {
        return Err(DecodeError::ShapeMismatch {
            shape,
            expected,
            found: values.len(),
        });
    }

    let value = match array_type {
        ArrayType::Float32 => {
            let values = values.into_iter().map(|v| v as f32).collect();
            Value::Float32Array(reshape(&shape, values)?)
        }
        ArrayType::Uint8 => {
            let values = values.into_iter().map(narrow_u8).collect();
            Value::Uint8Array(reshape(&shape, values)?)
        }
    };
    Ok(value)
}

/// Decode one record block against the header fields.
///
/// # Errors
///
/// Returns [`Error::FieldDecode`] for the first field that fails.
pub fn decode_record(block: &RecordBlock<'_>, fields: &[FieldDescriptor]) -> Result<Record> {
    let mut record = Record::new();

    for field in fields {
        let offset = field.line_offset();
        let line = block.line(offset).ok_or_else(|| {
            Error::field(
                block.index,
                &field.name,
                DecodeError::MissingLine {
                    line: block.start + offset + 1,
                },
            )
        })?;

        let value = match field.field_type {
            FieldType::Scalar(t) => decode_scalar(line, t),
            FieldType::Array(t) => decode_array(line, t),
        }
        .map_err(|source| Error::field(block.index, &field.name, source))?;

        record.insert(field.name.clone(), value);
    }

    Ok(record)
}

/// Decode every record of `log` in file order.
///
/// # Errors
///
/// Returns [`Error::BoundaryUnderflow`] if the file has no record blocks, or the
/// first [`Error::FieldDecode`] encountered.
pub fn decode_records(log: &LogFile, fields: &[FieldDescriptor]) -> Result<Records> {
    let blocks = log.blocks()?;
    let mut records = Vec::with_capacity(blocks.len());

    for block in blocks {
        debug!("Decoding record {} at line {}", block.index, block.start + 1);
        records.push(decode_record(&block, fields)?);
    }

    info!(
        "Decoded {} record(s) with {} field(s) each",
        records.len(),
        fields.len()
    );
    Ok(records)
}

fn parse_float(value: &str) -> std::result::Result<f64, DecodeError> {
    value
        .trim()
        .parse()
        .map_err(|source| DecodeError::InvalidFloat {
            value: value.to_string(),
            source,
        })
}

fn parse_shape(dims: &str) -> std::result::Result<Vec<usize>, DecodeError> {
    dims.split('x')
        .map(|d| d.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| DecodeError::InvalidShape(dims.to_string()))
}

fn reshape<T>(shape: &[usize], values: Vec<T>) -> std::result::Result<ArrayD<T>, DecodeError> {
    let found = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| DecodeError::ShapeMismatch {
        shape: shape.to_vec(),
        expected: shape.iter().product(),
        found,
    })
}

/// Truncate toward zero, then wrap modulo 256.
fn narrow_u8(v: f64) -> u8 {
    v.trunc() as i64 as u8
}
