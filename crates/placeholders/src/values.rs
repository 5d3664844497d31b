use crate::key::PlaceholderKey;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Display strings for every [`PlaceholderKey`].
///
/// A fresh set holds an empty string for each key; keys are never removed,
/// so lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicValueSet {
    values: BTreeMap<PlaceholderKey, String>,
}

impl Default for DynamicValueSet {
    fn default() -> Self {
        Self {
            values: PlaceholderKey::ALL
                .iter()
                .map(|key| (*key, String::new()))
                .collect(),
        }
    }
}

impl DynamicValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PlaceholderKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: PlaceholderKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Whether `key` holds a non-empty value.
    pub fn is_set(&self, key: PlaceholderKey) -> bool {
        !self.get(key).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceholderKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of keys holding a non-empty value.
    pub fn populated(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }
}

impl Serialize for DynamicValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_fully_keyed_and_empty() {
        let values = DynamicValueSet::new();
        assert_eq!(values.len(), PlaceholderKey::ALL.len());
        assert_eq!(values.populated(), 0);
        assert!(values.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn set_overwrites_without_changing_key_count() {
        let mut values = DynamicValueSet::new();
        values.set(PlaceholderKey::SystemSizeKwp, "4,00 kWp");
        values.set(PlaceholderKey::SystemSizeKwp, "8,40 kWp");
        assert_eq!(values.get(PlaceholderKey::SystemSizeKwp), "8,40 kWp");
        assert!(values.is_set(PlaceholderKey::SystemSizeKwp));
        assert_eq!(values.len(), PlaceholderKey::ALL.len());
        assert_eq!(values.populated(), 1);
    }

    #[test]
    fn serializes_with_key_names() {
        let mut values = DynamicValueSet::new();
        values.set(PlaceholderKey::CustomerName, "Herr Max Muster");
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["customer_name"], "Herr Max Muster");
        assert_eq!(json["footer_date"], "");
    }
}
