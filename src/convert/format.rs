//! Parsers for the textual forms properties are commonly written in

use std::time::Duration;

use crate::error::ConversionError;

/// Parse a boolean, accepting the usual configuration spellings
pub fn parse_bool(input: &str) -> Result<bool, ConversionError> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConversionError::parse(
            input,
            "bool",
            "expected true/false, yes/no, on/off or 1/0",
        )),
    }
}

/// Parse a duration such as `250ms`, `10s`, `5m`, `2h` or `1d`
///
/// A bare number is taken as milliseconds.
pub fn parse_duration(input: &str) -> Result<Duration, ConversionError> {
    let (digits, unit) = split_number(input);
    let amount: u64 = digits
        .parse()
        .map_err(|e| ConversionError::parse(input, "Duration", e))?;

    let millis_per_unit: u64 = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" => 1,
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        other => {
            return Err(ConversionError::parse(
                input,
                "Duration",
                format!("unknown unit '{}'", other),
            ))
        }
    };

    amount
        .checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(|| ConversionError::out_of_range(input, "Duration"))
}

/// Parse a readable byte size such as `512`, `10KB`, `4MB` or `1GB`
///
/// Multiples are binary (1KB = 1024 bytes).
pub fn parse_bytes(input: &str) -> Result<u64, ConversionError> {
    let (digits, unit) = split_number(input);
    let amount: u64 = digits
        .parse()
        .map_err(|e| ConversionError::parse(input, "bytes", e))?;

    let shift = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 0,
        "KB" | "K" => 10,
        "MB" | "M" => 20,
        "GB" | "G" => 30,
        "TB" | "T" => 40,
        other => {
            return Err(ConversionError::parse(
                input,
                "bytes",
                format!("unknown unit '{}'", other),
            ))
        }
    };

    amount
        .checked_mul(1u64 << shift)
        .ok_or_else(|| ConversionError::out_of_range(input, "bytes"))
}

/// Split leading digits from a trailing unit suffix
fn split_number(input: &str) -> (&str, &str) {
    let input = input.trim();
    let idx = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    (&input[..idx], input[idx..].trim())
}
