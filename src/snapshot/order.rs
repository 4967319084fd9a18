//! Order list parsing.

use crate::error::{AtlasError, Result};
use crate::types::{Identifier, OrderList};
use serde::{Deserialize, Serialize};

/// Order parsing options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Require exactly this many identifiers (legacy snapshots always held 100).
    pub expected_count: Option<usize>,
}

impl OrderConfig {
    pub fn exactly(count: usize) -> Self {
        Self {
            expected_count: Some(count),
        }
    }
}

/// Identifier named by one line: the text before the first `:`, sanitized.
pub fn line_identifier(line: &str) -> Option<Identifier> {
    let name = line.split(':').next().unwrap_or_default();
    Identifier::sanitize(name)
}

/// Parse an order list from line-oriented text.
///
/// Lines are `identifier` or `identifier: payload`; lines that sanitize to
/// nothing are skipped.
pub fn parse_order(text: &str, config: &OrderConfig) -> Result<OrderList> {
    let mut identifiers = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        match line_identifier(line) {
            Some(id) => identifiers.push(id),
            None if !line.trim().is_empty() => {
                log::warn!("Skipping order line {}: no usable identifier in {:?}", line_no + 1, line);
            }
            None => {}
        }
    }

    if identifiers.is_empty() {
        return Err(AtlasError::EmptyOrder);
    }
    if let Some(expected) = config.expected_count {
        if identifiers.len() != expected {
            return Err(AtlasError::OrderCount {
                expected,
                actual: identifiers.len(),
            });
        }
    }

    Ok(OrderList::new(identifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_lines() {
        let text = "Bitcoin: **1.2T 61000.5**\nEthereum\n\n  USD Coin : 1.0\n???: 4\n";
        let order = parse_order(text, &OrderConfig::default()).unwrap();

        let names: Vec<&str> = order.iter().map(Identifier::as_str).collect();
        assert_eq!(names, vec!["Bitcoin", "Ethereum", "USD_Coin"]);
    }

    #[test]
    fn test_colon_splits_once() {
        assert_eq!(line_identifier("a:b:c").unwrap().as_str(), "a");
        assert!(line_identifier(": 5").is_none());
    }

    #[test]
    fn test_empty_order_fails() {
        assert!(matches!(
            parse_order("\n  \n!!!\n", &OrderConfig::default()),
            Err(AtlasError::EmptyOrder)
        ));
    }

    #[test]
    fn test_expected_count() {
        let text = "a\nb\nc\n";
        assert_eq!(parse_order(text, &OrderConfig::exactly(3)).unwrap().len(), 3);
        assert!(matches!(
            parse_order(text, &OrderConfig::exactly(100)),
            Err(AtlasError::OrderCount {
                expected: 100,
                actual: 3
            })
        ));
    }
}
