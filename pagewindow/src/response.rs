use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ResponseError;
use crate::key::Keyed;
use crate::Boundaries;

/// A validated fetch response.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<E> {
    /// Boundaries of the returned slice, as reported by the data source.
    pub boundaries: Boundaries,
    /// Whether the data source reports nothing beyond `boundaries.end`.
    pub end_of_results: bool,
    /// Returned entries, in dataset order. Empty when the source sent none.
    pub entries: Vec<E>,
    /// The response as received, for post-load processing.
    pub raw: Value,
}

/// Name of the JSON type of `value`, as used in [`ResponseError`] messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Checks the shape of a raw fetch response and decodes its entries.
///
/// Checks run in a fixed order (payload, boundaries, flags, entries) and the first violation is
/// returned. A `null` or missing `queryResults` is read as an empty page.
pub fn validate_response<E>(raw: Value) -> Result<Page<E>, ResponseError>
where
    E: Keyed + DeserializeOwned,
{
    let object = match &raw {
        Value::Null => return Err(ResponseError::NoResults),
        Value::Object(object) => object,
        other => {
            return Err(ResponseError::NotAnObject {
                found: json_type_name(other),
            });
        }
    };

    let boundaries = read_boundaries(object)?;
    let end_of_results = read_end_of_results(object)?;
    let entries = match object.get("queryResults") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => read_entries(items)?,
        Some(other) => {
            return Err(ResponseError::InvalidQueryResults {
                found: json_type_name(other),
            });
        }
    };

    Ok(Page {
        boundaries,
        end_of_results,
        entries,
        raw,
    })
}

fn read_boundaries(object: &Map<String, Value>) -> Result<Boundaries, ResponseError> {
    let boundaries = match object.get("boundaries") {
        None | Some(Value::Null) => return Err(ResponseError::MissingBoundaries),
        Some(Value::Object(boundaries)) => boundaries,
        Some(other) => {
            return Err(ResponseError::InvalidBoundaries {
                found: json_type_name(other),
            });
        }
    };

    let start = match boundaries.get("start") {
        None | Some(Value::Null) => return Err(ResponseError::MissingStartBoundary),
        Some(value) => offset(value).ok_or_else(|| ResponseError::InvalidStartBoundary {
            found: describe(value),
        })?,
    };
    let end = match boundaries.get("end") {
        None | Some(Value::Null) => return Err(ResponseError::MissingEndBoundary),
        Some(value) => offset(value).ok_or_else(|| ResponseError::InvalidEndBoundary {
            found: describe(value),
        })?,
    };

    if start > end {
        return Err(ResponseError::StartAfterEnd { start, end });
    }
    Ok(Boundaries { start, end })
}

fn read_end_of_results(object: &Map<String, Value>) -> Result<bool, ResponseError> {
    let flags = match object.get("flags") {
        None | Some(Value::Null) => return Err(ResponseError::MissingFlags),
        Some(Value::Object(flags)) => flags,
        Some(other) => {
            return Err(ResponseError::InvalidFlags {
                found: json_type_name(other),
            });
        }
    };

    match flags.get("endOfResults") {
        None | Some(Value::Null) => Err(ResponseError::MissingEndOfResults),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(ResponseError::InvalidEndOfResults {
            found: json_type_name(other),
        }),
    }
}

fn read_entries<E>(items: &[Value]) -> Result<Vec<E>, ResponseError>
where
    E: Keyed + DeserializeOwned,
{
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(ResponseError::InvalidEntry {
                index,
                found: json_type_name(item),
            });
        };
        let key = match fields.get("key") {
            None | Some(Value::Null) => return Err(ResponseError::MissingEntryKey { index }),
            Some(Value::String(key)) => key,
            Some(other) => {
                return Err(ResponseError::InvalidEntryKey {
                    index,
                    found: json_type_name(other),
                });
            }
        };
        let entry = E::deserialize(item).map_err(|e| ResponseError::UndecodableEntry {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Largest boundary accepted from a source. Request ranges are computed in `i64`.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Reads a non-negative integer offset no greater than [`MAX_OFFSET`]. Integral floats such as
/// `30.0` are accepted.
fn offset(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    let v = match n.as_u64() {
        Some(v) => v,
        None => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < MAX_OFFSET as f64)
            .map(|f| f as u64)?,
    };
    (v <= MAX_OFFSET).then_some(v)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("Number {n}"),
        other => json_type_name(other).to_owned(),
    }
}
