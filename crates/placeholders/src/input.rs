use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw business data for one offer.
///
/// All four records are loosely typed JSON objects; field names are a
/// contract with the simulation and catalog layers. Any record may be
/// missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferInput {
    #[serde(deserialize_with = "object_or_empty")]
    pub customer: Map<String, Value>,
    #[serde(deserialize_with = "object_or_empty")]
    pub project_details: Map<String, Value>,
    #[serde(deserialize_with = "object_or_empty")]
    pub analysis: Map<String, Value>,
    #[serde(deserialize_with = "object_or_empty")]
    pub company: Map<String, Value>,
    /// The whole project record, consulted for consumption figures that
    /// are not part of `project_details`.
    #[serde(deserialize_with = "object_or_empty")]
    pub project: Map<String, Value>,
    /// Printed in the footer as "Angebot, DD.MM.YYYY". Without a date the footer
    /// reads "Angebot".
    pub offer_date: Option<NaiveDate>,
}

impl OfferInput {
    /// Splits an application project record (`customer_data`,
    /// `project_details`, ...) into the resolver's input.
    pub fn from_project_data(project: Value, analysis: Value, company: Value) -> Self {
        let project = into_object(project);
        let customer = project.get("customer_data").cloned().map(into_object).unwrap_or_default();
        let project_details = project
            .get("project_details")
            .cloned()
            .map(into_object)
            .unwrap_or_default();
        Self {
            customer,
            project_details,
            analysis: into_object(analysis),
            company: into_object(company),
            project,
            offer_date: None,
        }
    }

    pub fn with_offer_date(mut self, date: NaiveDate) -> Self {
        self.offer_date = Some(date);
        self
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(into_object(Value::deserialize(deserializer)?))
}

/// Reads a number from a JSON value, tolerating strings such as
/// `"10,0 kWh"`, `"1.234,5"` or `"1,234.5"`. When both separators occur the
/// rightmost one is the decimal separator.
pub fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_tolerant(s),
        _ => None,
    }
}

/// Reads a display string from a JSON value. `null`, arrays and objects
/// read as empty.
pub fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn parse_tolerant(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() || cleaned == "-" || cleaned == "." || cleaned == "," {
        return None;
    }

    let commas = cleaned.matches(',').count();
    let periods = cleaned.matches('.').count();
    let normalized = match (commas, periods) {
        (0, 0) => cleaned,
        (_, 0) if commas > 1 => cleaned.replace(',', ""),
        (_, 0) => cleaned.replace(',', "."),
        (0, _) if periods > 1 => cleaned.replace('.', ""),
        (0, _) => cleaned,
        _ => {
            let last_comma = cleaned.rfind(',').unwrap_or(0);
            let last_period = cleaned.rfind('.').unwrap_or(0);
            if last_comma > last_period {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Typed access to one loosely typed record.
pub(crate) trait RecordExt {
    fn number(&self, key: &str) -> Option<f64>;
    fn text(&self, key: &str) -> String;
}

impl RecordExt for Map<String, Value> {
    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(number_value)
    }

    fn text(&self, key: &str) -> String {
        self.get(key).map(text_value).unwrap_or_default()
    }
}

/// First candidate that reads as a non-zero number.
pub(crate) fn first_nonzero<I>(candidates: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    candidates.into_iter().flatten().find(|v| *v != 0.0)
}

/// First candidate that reads as non-empty text.
pub(crate) fn first_text<I>(candidates: I) -> String
where
    I: IntoIterator<Item = String>,
{
    candidates.into_iter().find(|s| !s.is_empty()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tolerant_numbers() {
        assert_eq!(number_value(&json!(10)), Some(10.0));
        assert_eq!(number_value(&json!("10,0 kWh")), Some(10.0));
        assert_eq!(number_value(&json!("10.5")), Some(10.5));
        assert_eq!(number_value(&json!("1.234,5")), Some(1234.5));
        assert_eq!(number_value(&json!("1,234.5")), Some(1234.5));
        assert_eq!(number_value(&json!("1.234.567")), Some(1234567.0));
        assert_eq!(number_value(&json!("-3,5")), Some(-3.5));
        assert_eq!(number_value(&json!("kWh")), None);
        assert_eq!(number_value(&json!("-")), None);
        assert_eq!(number_value(&json!(true)), None);
        assert_eq!(number_value(&Value::Null), None);
    }

    #[test]
    fn text_reads_scalars_only() {
        assert_eq!(text_value(&json!("  Hamburg ")), "Hamburg");
        assert_eq!(text_value(&json!(22359)), "22359");
        assert_eq!(text_value(&json!(null)), "");
        assert_eq!(text_value(&json!({"a": 1})), "");
    }

    #[test]
    fn nulls_deserialize_as_empty_records() {
        let input: OfferInput = serde_json::from_value(json!({
            "customer": null,
            "analysis": { "anlage_kwp": 8.4 },
            "offer_date": "2024-11-29"
        }))
        .unwrap();
        assert!(input.customer.is_empty());
        assert!(input.company.is_empty());
        assert_eq!(input.analysis.number("anlage_kwp"), Some(8.4));
        assert_eq!(input.offer_date, NaiveDate::from_ymd_opt(2024, 11, 29));
    }

    #[test]
    fn splits_application_project_record() {
        let input = OfferInput::from_project_data(
            json!({
                "customer_data": { "last_name": "Muster" },
                "project_details": { "module_quantity": 10 },
                "annual_consumption_kwh": 4500
            }),
            json!({ "anlage_kwp": 4.0 }),
            Value::Null,
        );
        assert_eq!(input.customer.text("last_name"), "Muster");
        assert_eq!(input.project_details.number("module_quantity"), Some(10.0));
        assert_eq!(input.project.number("annual_consumption_kwh"), Some(4500.0));
        assert!(input.company.is_empty());
    }

    #[test]
    fn first_nonzero_skips_zero_and_missing() {
        assert_eq!(first_nonzero([None, Some(0.0), Some(7.5), Some(3.0)]), Some(7.5));
        assert_eq!(first_nonzero([None, Some(0.0)]), None);
    }
}
