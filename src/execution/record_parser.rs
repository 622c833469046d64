//! # Record Parser
//!
//! Decodes one raw debt record into normalized fields. Shape mismatches
//! resolve to defaults; only undecodable bytes are reported as errors.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::constants::fields;
use crate::error::{ConsolidatorError, Result};

/// Normalized fields extracted from one raw record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedResult {
    pub company: String,
    pub debt: i64,
    pub phones: Vec<String>,
}

impl DecodedResult {
    pub fn new(company: impl Into<String>, debt: i64, phones: &[&str]) -> Self {
        Self {
            company: company.into(),
            debt,
            phones: phones.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// Top-level fields of a record in document order, values left undecoded
struct RecordFields(Vec<(String, Box<RawValue>)>);

impl<'de> Deserialize<'de> for RecordFields {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = RecordFields;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some(entry) = map.next_entry::<String, Box<RawValue>>()? {
                    fields.push(entry);
                }
                Ok(RecordFields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// Stateless decoder for debt records
///
/// Accepted shapes:
/// - `company`: a string, or a nested object whose string value is the name
/// - `debt`: an integer, or a string of base-10 digits
/// - `phones` / `phone`: a string, a number, or an array of strings and numbers
///
/// Bytes after the first complete JSON value (such as a separating comma) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser;

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a record, tagging any failure with its dispatch sequence number
    pub fn parse(&self, sequence: u64, raw: &[u8]) -> Result<DecodedResult> {
        let malformed = |e: serde_json::Error| ConsolidatorError::malformed(sequence, e.to_string());

        let RecordFields(record) = serde_json::Deserializer::from_slice(raw)
            .into_iter::<RecordFields>()
            .next()
            .ok_or_else(|| ConsolidatorError::malformed(sequence, "empty record"))?
            .map_err(malformed)?;

        let mut result = DecodedResult::default();
        for (key, field) in record {
            match key.as_str() {
                fields::COMPANY => {
                    let value = serde_json::from_str(field.get()).map_err(malformed)?;
                    if let Some(company) = company_name(value) {
                        result.company = company;
                    }
                }
                fields::DEBT => {
                    let value = serde_json::from_str(field.get()).map_err(malformed)?;
                    result.debt = debt_amount(sequence, value)?;
                }
                fields::PHONES | fields::PHONE => {
                    collect_phones(&field, &mut result.phones).map_err(malformed)?;
                }
                _ => {}
            }
        }

        Ok(result)
    }
}

fn company_name(field: Value) -> Option<String> {
    match field {
        Value::String(name) => Some(name),
        Value::Object(nested) => nested_company_name(nested),
        _ => None,
    }
}

fn nested_company_name(nested: Map<String, Value>) -> Option<String> {
    nested
        .into_iter()
        .filter_map(|(_, value)| match value {
            Value::String(name) => Some(name),
            _ => None,
        })
        .last()
}

/// Numbers that are not 64-bit integers count as a shape mismatch and yield 0
fn debt_amount(sequence: u64, field: Value) -> Result<i64> {
    match field {
        Value::Number(number) => Ok(number.as_i64().unwrap_or_else(|| {
            warn!(sequence, debt = %number, "Debt is not a 64-bit integer, counting it as 0");
            0
        })),
        Value::String(digits) => digits.parse::<i64>().map_err(|e| {
            ConsolidatorError::malformed(sequence, format!("debt {digits:?} is not numeric: {e}"))
        }),
        _ => Ok(0),
    }
}

fn collect_phones(field: &RawValue, phones: &mut Vec<String>) -> serde_json::Result<()> {
    if field.get().starts_with('[') {
        let entries: Vec<Box<RawValue>> = serde_json::from_str(field.get())?;
        for entry in &entries {
            phones.extend(phone_text(entry)?);
        }
    } else {
        phones.extend(phone_text(field)?);
    }
    Ok(())
}

/// Numbers keep the exact text they were written with
fn phone_text(value: &RawValue) -> serde_json::Result<Option<String>> {
    let text = value.get();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str(text).map(Some),
        Some(b'-' | b'0'..=b'9') => Ok(Some(text.to_owned())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> DecodedResult {
        RecordParser::new()
            .parse(1, raw.as_bytes())
            .expect("record should parse")
    }

    #[test]
    fn test_plain_record() {
        let result = parse(r#"{"company":"Acme","debt":100,"phones":["555","777"]}"#);
        assert_eq!(result, DecodedResult::new("Acme", 100, &["555", "777"]));
    }

    #[test]
    fn test_nested_company() {
        let result = parse(r#"{"company":{"name":"Acme Inc"},"debt":1,"phone":"1"}"#);
        assert_eq!(result.company, "Acme Inc");
    }

    #[test]
    fn test_string_debt() {
        let result = parse(r#"{"company":"A","debt":"250","phones":"1"}"#);
        assert_eq!(result.debt, 250);
        assert_eq!(result.phones, vec!["1"]);
    }

    #[test]
    fn test_shape_mismatches_default() {
        let result = parse(r#"{"company":["A"],"debt":[1,2],"phones":{"x":"1"}}"#);
        assert_eq!(result, DecodedResult::default());
    }

    #[test]
    fn test_numeric_phones_keep_digits() {
        let result = parse(r#"{"phones":[79161234567, "8-800", null, true, 18446744073709551615]}"#);
        assert_eq!(
            result.phones,
            vec!["79161234567", "8-800", "18446744073709551615"]
        );
    }

    #[test]
    fn test_numeric_phones_keep_written_form() {
        let result = parse(r#"{"phones":[1e3, 1E3, 1.50, -0, 79161234567890123456789], "phone": 2E+5}"#);
        assert_eq!(
            result.phones,
            vec!["1e3", "1E3", "1.50", "-0", "79161234567890123456789", "2E+5"]
        );
    }

    #[test]
    fn test_non_integer_debt_counts_as_zero() {
        assert_eq!(parse(r#"{"company":"A","debt":12.5,"phone":"1"}"#).debt, 0);
        assert_eq!(parse(r#"{"company":"A","debt":18446744073709551615,"phone":"1"}"#).debt, 0);
        assert_eq!(parse(r#"{"company":"A","debt":1e3,"phone":"1"}"#).debt, 0);
        assert_eq!(
            parse(r#"{"company":"A","debt":12.5,"phone":"1"}"#),
            DecodedResult::new("A", 0, &["1"])
        );
    }

    #[test]
    fn test_phone_and_phones_in_document_order() {
        let result = parse(r#"{"phones":["2","3"],"company":"A","phone":1}"#);
        assert_eq!(result.phones, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let result = parse(r#"{"address":{"city":"X"},"company":"A","debt":5,"phone":"9"}"#);
        assert_eq!(result, DecodedResult::new("A", 5, &["9"]));
    }

    #[test]
    fn test_trailing_separator_tolerated() {
        let result = parse(r#"  {"company":"A","debt":5,"phone":"9"},"#);
        assert_eq!(result, DecodedResult::new("A", 5, &["9"]));
    }

    #[test]
    fn test_malformed_bytes_fail() {
        let err = RecordParser::new()
            .parse(7, br#"{"company": "A", "debt": "#)
            .unwrap_err();
        assert!(matches!(err, ConsolidatorError::MalformedRecord { sequence: 7, .. }));
    }

    #[test]
    fn test_non_object_fails() {
        let err = RecordParser::new().parse(3, b"[1, 2]").unwrap_err();
        assert!(matches!(err, ConsolidatorError::MalformedRecord { sequence: 3, .. }));
    }

    #[test]
    fn test_unparsable_debt_string_fails() {
        let err = RecordParser::new()
            .parse(9, br#"{"company":"A","debt":"12abc","phone":"1"}"#)
            .unwrap_err();
        assert!(matches!(err, ConsolidatorError::MalformedRecord { sequence: 9, .. }));
    }
}
