//! JSON line format for load requests and decisions
//!
//! This module centralizes all wire-format concerns:
//! - JsonRequest structure for deserialization
//! - Conversion from a raw input line to a [`LoadRequest`]
//! - Decision serialization
//!
//! Input lines look like
//! `{"id":"15887","customer_id":"528","load_amount":"$3318.47","time":"2000-01-01T00:00:00Z"}`
//! and output lines like `{"id":"15887","customer_id":"528","accepted":true}`.

use crate::types::{Decision, LoadRequest, VelocityError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Longest accepted input line, in bytes
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Raw input record, before amount and time are parsed
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct JsonRequest {
    pub id: String,
    pub customer_id: String,
    pub load_amount: String,
    pub time: String,
}

/// Parse one input line into a LoadRequest
///
/// # Arguments
///
/// * `line` - The raw line, without its terminator
/// * `line_num` - 1-based line number, used in error messages
///
/// # Errors
///
/// Returns an error if the line is not a JSON object with the four expected
/// string fields, if `load_amount` is not a non-negative decimal (optionally
/// wrapped in `$`), or if `time` is not RFC 3339.
pub fn parse_request_line(line: &str, line_num: u64) -> Result<LoadRequest, VelocityError> {
    let record: JsonRequest = serde_json::from_str(line)
        .map_err(|e| VelocityError::malformed_request(line_num, e))?;
    convert_json_request(record, line_num)
}

/// Convert a decoded JsonRequest into a LoadRequest
pub fn convert_json_request(
    record: JsonRequest,
    line_num: u64,
) -> Result<LoadRequest, VelocityError> {
    let amount = parse_load_amount(&record.load_amount)
        .ok_or_else(|| VelocityError::invalid_amount(line_num, &record.load_amount))?;

    let timestamp = DateTime::parse_from_rfc3339(record.time.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| VelocityError::invalid_timestamp(line_num, &record.time))?;

    Ok(LoadRequest {
        id: record.id,
        customer_id: record.customer_id,
        amount,
        timestamp,
    })
}

/// Parse a `$<number>` amount
///
/// Surrounding whitespace and `$` signs are stripped. Scientific notation is
/// accepted. Negative values yield `None`.
fn parse_load_amount(raw: &str) -> Option<Decimal> {
    let digits = raw.trim().trim_matches('$').trim();
    let amount = Decimal::from_str(digits)
        .or_else(|_| Decimal::from_scientific(digits))
        .ok()?;
    (!amount.is_sign_negative() || amount.is_zero()).then_some(amount)
}

/// Serialize a decision as one JSON line, without the terminator
pub fn encode_decision(decision: &Decision) -> Result<String, VelocityError> {
    serde_json::to_string(decision).map_err(VelocityError::write_failed)
}

/// Write a decision as one newline-terminated JSON line
pub fn write_decision(decision: &Decision, output: &mut dyn Write) -> Result<(), VelocityError> {
    let line = encode_decision(decision)?;
    writeln!(output, "{}", line).map_err(VelocityError::write_failed)
}

/// Whether a line carries no record at all
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
