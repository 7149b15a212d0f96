//! Decimal-as-string and date helpers
//!
//! The quote service sends prices as decimal strings and calendar dates as
//! `YYYYMMDD` strings. An empty string means the field was not set and
//! maps to `None`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::DecodeError;

/// Parse an optional decimal string field.
///
/// `""` (after trimming) → `Ok(None)`; a valid number → `Ok(Some(_))`;
/// anything else → `DecodeError::InvalidDecimal`.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Option<Decimal>, DecodeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .map(Some)
        .map_err(|_| DecodeError::InvalidDecimal {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Render an optional decimal back to its wire form.
pub fn format_decimal(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

/// Wire layout for calendar dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse an optional `YYYYMMDD` date field. `""` → `Ok(None)`.
pub fn parse_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, DecodeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DecodeError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Parse a list of required `YYYYMMDD` dates.
pub fn parse_dates(field: &str, raw: &[String]) -> Result<Vec<NaiveDate>, DecodeError> {
    raw.iter()
        .map(|value| {
            parse_date(field, value)?.ok_or_else(|| DecodeError::InvalidDate {
                field: field.to_string(),
                value: value.clone(),
            })
        })
        .collect()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_string_is_absent() {
        assert_eq!(parse_decimal("lastDone", "").unwrap(), None);
        assert_eq!(parse_decimal("lastDone", "  ").unwrap(), None);
    }

    #[test]
    fn test_valid_decimal() {
        assert_eq!(
            parse_decimal("high", "10.8").unwrap(),
            Some(Decimal::from_str_exact("10.8").unwrap())
        );
    }

    #[test]
    fn test_invalid_decimal_rejected() {
        let err = parse_decimal("open", "ten").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidDecimal {
                field: "open".to_string(),
                value: "ten".to_string(),
            }
        );
    }

    #[test]
    fn test_format_absent_is_empty() {
        assert_eq!(format_decimal(None), "");
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(
            parse_date("expiryDate", "20240621").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 21)
        );
        assert_eq!(parse_date("expiryDate", "").unwrap(), None);
        assert!(matches!(
            parse_date("expiryDate", "2024-06-21"),
            Err(DecodeError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_date_list_rejects_blank_entry() {
        let raw = vec!["20240102".to_string(), "".to_string()];
        assert!(parse_dates("tradeDay", &raw).is_err());
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            "20240102"
        );
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_preserves_value(mantissa in -1_000_000_000i64..1_000_000_000, scale in 0u32..8) {
            let value = Decimal::new(mantissa, scale);
            let parsed = parse_decimal("price", &format_decimal(Some(value))).unwrap();
            prop_assert_eq!(parsed, Some(value));
        }
    }
}
