use super::HumanName;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Serializes as the dictionary form (empty buckets left out), plus an
/// `additional_name` entry holding the coupled name, if any.
impl Serialize for HumanName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dict = self.as_dictionary(false);
        let additional = self.additional_name();

        let mut map = serializer.serialize_map(Some(dict.len() + additional.is_some() as usize))?;
        for (key, value) in &dict {
            map.serialize_entry(key, value)?;
        }
        if let Some(name) = additional {
            map.serialize_entry("additional_name", name)?;
        }
        map.end()
    }
}

impl HumanName {
    /// The serialized form as a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl From<&HumanName> for serde_json::Value {
    fn from(name: &HumanName) -> serde_json::Value {
        serde_json::to_value(name).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use crate::{HumanName, Preferences, RuleSet};
    use serde_json::json;

    #[test]
    fn serializes_populated_buckets() {
        let name = HumanName::parse("Dr. John Doe Jr.");
        assert_eq!(
            json!({
                "title": "Dr.",
                "first": "John",
                "last": "Doe",
                "lastbase": "Doe",
                "suffix": "Jr.",
            }),
            serde_json::Value::from(&name)
        );
    }

    #[test]
    fn serializes_additional_name() {
        let prefs = Preferences {
            parse_multiple_names: true,
            ..Preferences::default()
        };
        let name = HumanName::parse_with("John & Jane Doe", &RuleSet::new(), prefs);
        assert_eq!(
            json!({
                "first": "John",
                "last": "Doe",
                "lastbase": "Doe",
                "additional_name": {
                    "first": "Jane",
                    "last": "Doe",
                    "lastbase": "Doe",
                },
            }),
            serde_json::Value::from(&name)
        );
        assert!(name.to_json().starts_with("{\"additional_name\":"));
    }
}
