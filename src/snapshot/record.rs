//! Snapshot record parsing.
//!
//! A snapshot line is `name: payload`. The payload is either a single value
//! (`Bitcoin: 61000.5`) or a market cap and price pair, optionally wrapped in
//! `**` (`Bitcoin: **1.2T 61000.5**`).

use crate::error::{AtlasError, Result};
use crate::types::Identifier;

/// One parsed snapshot line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the snapshot file.
    pub line: usize,
    /// Name as written, trimmed.
    pub name: String,
    pub identifier: Identifier,
    /// Payload tokens as written, for labels.
    pub tokens: Vec<String>,
    /// Numeric value of each token, in order.
    pub values: Vec<f64>,
}

impl Record {
    /// First value (the only value of single-value lines).
    pub fn value(&self) -> f64 {
        self.values[0]
    }

    /// Last value; the price of `market_cap price` lines.
    pub fn price(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Market cap, when the line carries a cap and a price.
    pub fn market_cap(&self) -> Option<f64> {
        if self.values.len() >= 2 {
            Some(self.values[0])
        } else {
            None
        }
    }

    /// Market cap token as written, e.g. `1.2T`.
    pub fn market_cap_text(&self) -> Option<&str> {
        if self.tokens.len() >= 2 {
            Some(&self.tokens[0])
        } else {
            None
        }
    }

    /// Price token as written.
    pub fn price_text(&self) -> &str {
        &self.tokens[self.tokens.len() - 1]
    }
}

/// Parse a numeric token such as `61000.5`, `$1,234`, `1.2T` or `850M`.
pub fn parse_number(token: &str) -> Option<f64> {
    let cleaned: String = token
        .trim_matches('*')
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    let (digits, multiplier) = match cleaned.chars().last()?.to_ascii_uppercase() {
        'K' => (&cleaned[..cleaned.len() - 1], 1e3),
        'M' => (&cleaned[..cleaned.len() - 1], 1e6),
        'B' => (&cleaned[..cleaned.len() - 1], 1e9),
        'T' => (&cleaned[..cleaned.len() - 1], 1e12),
        _ => (cleaned.as_str(), 1.0),
    };

    digits
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
        .filter(|v| v.is_finite())
}

/// Parse one line. `line_no` is 1-based and only used for error reporting.
pub fn parse_record(line_no: usize, line: &str) -> Result<Record> {
    let parse_error = |message: &str| AtlasError::Parse {
        line: line_no,
        message: message.to_string(),
    };

    let (name, payload) = line.split_once(':').ok_or_else(|| parse_error("missing ':'"))?;
    let name = name.trim();
    let identifier = Identifier::sanitize(name).ok_or_else(|| parse_error("empty name"))?;

    let tokens: Vec<String> = payload
        .trim()
        .trim_matches('*')
        .split_whitespace()
        .map(|t| t.trim_matches('*').to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(parse_error("no value"));
    }

    let values = tokens
        .iter()
        .map(|t| parse_number(t).ok_or_else(|| parse_error(&format!("'{}' is not a number", t))))
        .collect::<Result<Vec<f64>>>()?;

    Ok(Record {
        line: line_no,
        name: name.to_string(),
        identifier,
        tokens,
        values,
    })
}

/// Parse every line, logging and skipping malformed ones. Blank lines are ignored.
pub fn parse_records(text: &str) -> Vec<Record> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match parse_record(i + 1, line) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Error processing line {:?}: {}", line.trim(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("61000.5"), Some(61000.5));
        assert_eq!(parse_number("$1,234"), Some(1234.0));
        assert_eq!(parse_number("1.5K"), Some(1500.0));
        assert_eq!(parse_number("850m"), Some(850e6));
        assert_eq!(parse_number("1.2T"), Some(1.2e12));
        assert_eq!(parse_number("**42**"), Some(42.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_number_overflowing_suffix() {
        assert_eq!(parse_number("9e307T"), None);
        assert_eq!(parse_number("1e306K"), None);
        assert_eq!(parse_number("1e300"), Some(1e300));
    }

    #[test]
    fn test_single_value_record() {
        let record = parse_record(1, "Tether USD: 1.0002").unwrap();
        assert_eq!(record.name, "Tether USD");
        assert_eq!(record.identifier.as_str(), "Tether_USD");
        assert_eq!(record.value(), 1.0002);
        assert_eq!(record.price(), 1.0002);
        assert_eq!(record.market_cap(), None);
        assert_eq!(record.market_cap_text(), None);
    }

    #[test]
    fn test_cap_and_price_record() {
        let record = parse_record(4, "Bitcoin: **1.2T 61000.5**").unwrap();
        assert_eq!(record.tokens, vec!["1.2T", "61000.5"]);
        assert_eq!(record.market_cap(), Some(1.2e12));
        assert_eq!(record.market_cap_text(), Some("1.2T"));
        assert_eq!(record.price(), 61000.5);
        assert_eq!(record.price_text(), "61000.5");
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_record(2, "no separator here"),
            Err(AtlasError::Parse { line: 2, .. })
        ));
        assert!(parse_record(3, ": 5").is_err());
        assert!(parse_record(3, "Name:   ").is_err());
        assert!(parse_record(3, "Name: twelve").is_err());
    }

    #[test]
    fn test_parse_records_skips_bad_lines() {
        let text = "Bitcoin: 100\n\ngarbage\nEthereum: **400B 3200**\nDoge: lots\n";
        let records = parse_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].identifier.as_str(), "Ethereum");
    }
}
