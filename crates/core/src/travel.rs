//! Travel option output shape.
//!
//! The search proxy promises callers a list of objects with a fixed
//! attribute set, but the upstream model is free-form and regularly omits,
//! renames, or mistypes fields. Shaping is therefore best-effort: known
//! aliases are folded in, prices tolerate numeric strings, and anything that
//! is not an object at all is dropped rather than failing the request.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized travel suggestion returned by `POST /search`.
///
/// Ephemeral: constructed fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOption {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "location")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_highlights")]
    pub highlights: Vec<String>,
    #[serde(default, alias = "url", alias = "link")]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub info_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TravelOption {
    /// Shape a raw JSON value into a travel option.
    ///
    /// Returns `None` for non-objects and for objects whose fields cannot
    /// be coerced.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Shape a raw result array, dropping elements that cannot be coerced.
pub fn shape_options(values: Vec<Value>) -> Vec<TravelOption> {
    values.into_iter().filter_map(TravelOption::from_value).collect()
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

/// Accept a price as a JSON number or a numeric string (`"1299"`,
/// `"$1,299"`); anything else becomes `None`.
fn de_lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    })
}

/// Accept highlights as an array of strings or a single bare string.
fn de_lenient_highlights<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_object_shapes_cleanly() {
        let option = TravelOption::from_value(json!({
            "title": "Amalfi Coast Week",
            "country": "Italy",
            "price": 1450.0,
            "duration": "7 days",
            "highlights": ["Positano", "Capri day trip"],
            "booking_url": "https://example.com/book/amalfi",
            "info_url": "https://example.com/amalfi",
            "description": "Cliffside villages and slow lunches."
        }))
        .unwrap();

        assert_eq!(option.title.as_deref(), Some("Amalfi Coast Week"));
        assert_eq!(option.price, Some(1450.0));
        assert_eq!(option.highlights.len(), 2);
    }

    #[test]
    fn location_and_url_aliases_are_folded_in() {
        let option = TravelOption::from_value(json!({
            "title": "Kyoto in Autumn",
            "location": "Japan",
            "url": "https://example.com/kyoto"
        }))
        .unwrap();

        assert_eq!(option.country.as_deref(), Some("Japan"));
        assert_eq!(option.booking_url.as_deref(), Some("https://example.com/kyoto"));
    }

    #[test]
    fn price_tolerates_numeric_strings() {
        let option = TravelOption::from_value(json!({"title": "x", "price": "$1,299"})).unwrap();
        assert_eq!(option.price, Some(1299.0));

        let option = TravelOption::from_value(json!({"title": "x", "price": "cheap"})).unwrap();
        assert_eq!(option.price, None);
    }

    #[test]
    fn highlights_tolerate_a_bare_string() {
        let option =
            TravelOption::from_value(json!({"title": "x", "highlights": "great food"})).unwrap();
        assert_eq!(option.highlights, vec!["great food".to_string()]);
    }

    #[test]
    fn missing_fields_become_defaults() {
        let option = TravelOption::from_value(json!({"title": "Bare"})).unwrap();
        assert_eq!(option.country, None);
        assert_eq!(option.price, None);
        assert!(option.highlights.is_empty());

        let json = serde_json::to_value(&option).unwrap();
        // Price is part of the output contract even when unknown.
        assert!(json["price"].is_null());
    }

    #[test]
    fn non_objects_are_dropped() {
        assert!(TravelOption::from_value(json!("just a string")).is_none());
        assert!(TravelOption::from_value(json!(42)).is_none());
        assert!(TravelOption::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn shape_options_keeps_order_and_drops_junk() {
        let shaped = shape_options(vec![
            json!({"title": "A"}),
            json!("noise"),
            json!({"title": "B"}),
        ]);
        let titles: Vec<_> = shaped.iter().map(|o| o.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
