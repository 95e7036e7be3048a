//! Parsing of the `###`-delimited schema header.

use crate::error::{Error, Result};
use crate::models::{FieldDescriptor, FieldType};
use log::{debug, warn};

/// Line opening and closing the header section.
pub const HEADER_SENTINEL: &str = "###";

/// Split a header or data line on `,` and `;`.
pub(crate) fn split_fields(line: &str) -> std::str::Split<'_, [char; 2]> {
    line.split([',', ';'])
}

impl FieldDescriptor {
    /// Build a descriptor from the tokens of one header line.
    ///
    /// Tokens past the third are ignored.
    pub fn from_tokens(tokens: &[&str], position: usize) -> std::result::Result<Self, String> {
        let [name, kind, subtype, rest @ ..] = tokens else {
            return Err(format!(
                "expected '<name>,<kind>,<subtype>', found {} token(s)",
                tokens.len()
            ));
        };
        if !rest.is_empty() {
            warn!("Ignoring {} extra token(s) for field '{}'", rest.len(), name);
        }
        let field_type = FieldType::from_tags(kind, subtype)?;
        Ok(FieldDescriptor::new(*name, field_type, position))
    }
}

/// Scan `lines` for the header section and return its field descriptors in order.
///
/// Lines before the opening `###` are skipped. With `allow_unterminated` set, a
/// header that is never closed runs to the end of input (and a missing header
/// yields no descriptors); otherwise both are [`Error::HeaderMalformed`].
pub fn parse_header<S: AsRef<str>>(
    lines: &[S],
    allow_unterminated: bool,
) -> Result<Vec<FieldDescriptor>> {
    let mut opened_at: Option<usize> = None;
    let mut fields = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line == HEADER_SENTINEL {
            if opened_at.is_some() {
                debug!("Header closed at line {} with {} field(s)", i + 1, fields.len());
                return Ok(fields);
            }
            opened_at = Some(i);
            continue;
        }
        if opened_at.is_none() {
            continue;
        }

        let tokens: Vec<&str> = split_fields(line).collect();
        let field = FieldDescriptor::from_tokens(&tokens, fields.len())
            .map_err(|reason| Error::HeaderMalformed(format!("line {}: {}", i + 1, reason)))?;
        debug!("Field {}: {} ({})", field.position, field.name, field.field_type);
        fields.push(field);
    }

    match opened_at {
        Some(_) if allow_unterminated => {
            warn!("Header is never closed, reading descriptors to end of input");
            Ok(fields)
        }
        None if allow_unterminated => {
            warn!("No header section found");
            Ok(fields)
        }
        Some(start) => Err(Error::HeaderMalformed(format!(
            "header opened at line {} is never closed by '{}'",
            start + 1,
            HEADER_SENTINEL
        ))),
        None => Err(Error::HeaderMalformed(format!(
            "no '{}' header section found",
            HEADER_SENTINEL
        ))),
    }
}
