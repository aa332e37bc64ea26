//! Form input validation.
//!
//! Raw form fields arrive as strings keyed by field name. [`validate`] turns
//! them into a typed [`Query`] or a [`ValidationError`] without touching the
//! network, so invalid input never reaches the fetcher.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the starting port field.
pub const FIELD_START: &str = "start";
/// Name of the destination port field.
pub const FIELD_END: &str = "end";
/// Name of the fuel range field.
pub const FIELD_MAX_FUEL: &str = "maxFuel";

/// Identifier of a port as understood by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub u64);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum distance a ship may cover on one load of fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(pub u64);

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated route request.
///
/// Only [`validate`] builds one. It is deliberately neither `Clone` nor
/// `Copy`: a query is handed to the fetcher once and consumed there.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Query {
    start: PortId,
    end: PortId,
    #[serde(rename = "maxFuel")]
    max_fuel: Distance,
}

impl Query {
    pub fn start(&self) -> PortId {
        self.start
    }

    pub fn end(&self) -> PortId {
        self.end
    }

    pub fn max_fuel(&self) -> Distance {
        self.max_fuel
    }
}

/// Reason a set of raw fields was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field was missing or did not parse as an integer.
    #[error("Please enter valid numbers for all fields.")]
    NonNumeric { field: &'static str },

    /// A field parsed but was zero or negative.
    #[error("Port IDs and Max Fuel must be positive numbers.")]
    NonPositive { field: &'static str },
}

impl ValidationError {
    /// Stable machine-readable kind: `non-numeric` or `non-positive`.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NonNumeric { .. } => "non-numeric",
            ValidationError::NonPositive { .. } => "non-positive",
        }
    }

    /// The first field that failed the check.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonNumeric { field } | ValidationError::NonPositive { field } => {
                field
            }
        }
    }
}

/// Raw form input, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    fields: BTreeMap<String, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the three route fields.
    pub fn route(
        start: impl Into<String>,
        end: impl Into<String>,
        max_fuel: impl Into<String>,
    ) -> Self {
        Self::new()
            .with(FIELD_START, start)
            .with(FIELD_END, end)
            .with(FIELD_MAX_FUEL, max_fuel)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RawFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = RawFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Parse and validate raw form fields into a [`Query`].
///
/// All fields are parsed before any positivity check, so a form with one
/// non-numeric and one negative field reports `non-numeric`. Identical start
/// and end ports are accepted; the routing service decides what they mean.
pub fn validate(fields: &RawFields) -> Result<Query, ValidationError> {
    let start = parse_field(fields, FIELD_START)?;
    let end = parse_field(fields, FIELD_END)?;
    let max_fuel = parse_field(fields, FIELD_MAX_FUEL)?;

    Ok(Query {
        start: PortId(positive(start, FIELD_START)?),
        end: PortId(positive(end, FIELD_END)?),
        max_fuel: Distance(positive(max_fuel, FIELD_MAX_FUEL)?),
    })
}

fn parse_field(fields: &RawFields, field: &'static str) -> Result<i64, ValidationError> {
    fields
        .get(field)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or(ValidationError::NonNumeric { field })
}

fn positive(value: i64, field: &'static str) -> Result<u64, ValidationError> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or(ValidationError::NonPositive { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_positive_integers() {
        let query = validate(&RawFields::route("2", "24", "5000")).expect("valid query");
        assert_eq!(query.start(), PortId(2));
        assert_eq!(query.end(), PortId(24));
        assert_eq!(query.max_fuel(), Distance(5000));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let query = validate(&RawFields::route(" 7 ", "9\n", "\t100")).expect("valid query");
        assert_eq!(query.start(), PortId(7));
        assert_eq!(query.end(), PortId(9));
        assert_eq!(query.max_fuel(), Distance(100));
    }

    #[test]
    fn same_start_and_end_is_allowed() {
        let query = validate(&RawFields::route("4", "4", "10")).expect("valid query");
        assert_eq!(query.start(), query.end());
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        for fields in [
            RawFields::route("abc", "24", "5000"),
            RawFields::route("2", "", "5000"),
            RawFields::route("2", "24", "5k"),
            RawFields::route("2.5", "24", "5000"),
            RawFields::route("2", "24", "99999999999999999999999"),
        ] {
            let err = validate(&fields).expect_err("non-numeric input");
            assert_eq!(err.kind(), "non-numeric", "fields: {fields:?}");
        }
    }

    #[test]
    fn missing_field_counts_as_non_numeric() {
        let fields = RawFields::new().with(FIELD_START, "2").with(FIELD_END, "24");
        let err = validate(&fields).expect_err("missing maxFuel");
        assert_eq!(err, ValidationError::NonNumeric { field: FIELD_MAX_FUEL });
    }

    #[test]
    fn zero_and_negative_values_are_rejected() {
        for fields in [
            RawFields::route("0", "24", "5000"),
            RawFields::route("2", "-1", "5000"),
            RawFields::route("2", "24", "-5"),
        ] {
            let err = validate(&fields).expect_err("non-positive input");
            assert_eq!(err.kind(), "non-positive", "fields: {fields:?}");
        }
    }

    #[test]
    fn parsing_is_checked_before_positivity() {
        let err = validate(&RawFields::route("-3", "x", "10")).expect_err("invalid");
        assert_eq!(err, ValidationError::NonNumeric { field: FIELD_END });
    }

    #[test]
    fn messages_match_the_form_copy() {
        let non_numeric = ValidationError::NonNumeric { field: FIELD_START };
        let non_positive = ValidationError::NonPositive { field: FIELD_START };
        assert_eq!(
            non_numeric.to_string(),
            "Please enter valid numbers for all fields."
        );
        assert_eq!(
            non_positive.to_string(),
            "Port IDs and Max Fuel must be positive numbers."
        );
    }

    #[test]
    fn query_serializes_with_wire_field_names() {
        let query = validate(&RawFields::route("2", "24", "5000")).expect("valid query");
        let json = serde_json::to_value(&query).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "start": 2, "end": 24, "maxFuel": 5000 })
        );
    }

    #[test]
    fn raw_fields_collect_from_pairs() {
        let fields: RawFields = [("start", "1"), ("end", "2"), ("maxFuel", "3")]
            .into_iter()
            .collect();
        assert_eq!(fields, RawFields::route("1", "2", "3"));
    }
}
