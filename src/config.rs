//! Rule configuration loaded from JSON.
//!
//! ```json
//! {
//!   "suffixes": ["LUTCF"],
//!   "titles": ["Grand Poobah"],
//!   "capitalization_exceptions": { "cfa": "CFA" },
//!   "preferences": { "first_over_prefix": true }
//! }
//! ```
//!
//! Every key is optional; entries are added on top of the built-in tables.

use crate::{Preferences, Result, RuleKind, RuleSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub titles: Vec<String>,
    pub first_name_titles: Vec<String>,
    pub conjunctions: Vec<String>,
    pub prefixes: Vec<String>,
    /// Acronym suffixes, matched with periods removed.
    pub suffixes: Vec<String>,
    pub suffixes_not_acronyms: Vec<String>,
    pub roman_numerals: Vec<String>,
    pub capitalization_exceptions: BTreeMap<String, String>,
    pub preferences: Preferences,
}

impl RuleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RuleConfig> {
        let text = fs::read_to_string(path)?;
        RuleConfig::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<RuleConfig> {
        Ok(serde_json::from_str(text)?)
    }

    /// The built-in rules plus this configuration's entries.
    pub fn into_rules(&self) -> Result<RuleSet> {
        let mut rules = RuleSet::new();

        let tables = [
            (RuleKind::Title, &self.titles),
            (RuleKind::FirstNameTitle, &self.first_name_titles),
            (RuleKind::Conjunction, &self.conjunctions),
            (RuleKind::Prefix, &self.prefixes),
            (RuleKind::Suffix, &self.suffixes),
            (RuleKind::SuffixNotAcronym, &self.suffixes_not_acronyms),
            (RuleKind::RomanNumeral, &self.roman_numerals),
        ];
        for (kind, entries) in tables {
            rules.extend(kind, entries)?;
        }

        for (word, replacement) in &self.capitalization_exceptions {
            rules.add_capitalization_exception(word, replacement);
        }

        tracing::debug!(
            entries = tables.iter().map(|(_, e)| e.len()).sum::<usize>(),
            exceptions = self.capitalization_exceptions.len(),
            "loaded rule configuration"
        );
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, HumanName};

    #[test]
    fn extends_builtin_rules() {
        let config = RuleConfig::from_json(
            r#"{"suffixes": ["LUTCF"], "preferences": {"first_over_prefix": true}}"#,
        )
        .unwrap();
        assert!(config.preferences.first_over_prefix);
        assert!(!config.preferences.parse_multiple_names);

        let rules = config.into_rules().unwrap();
        let name = HumanName::parse_with("John Doe LUTCF", &rules, config.preferences);
        assert_eq!("Doe", name.last());
        assert_eq!("LUTCF", name.suffix());
    }

    #[test]
    fn empty_document() {
        let config = RuleConfig::from_json("{}").unwrap();
        assert!(config.into_rules().is_ok());
    }

    #[test]
    fn bad_documents() {
        assert!(matches!(RuleConfig::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            RuleConfig::from_json(r#"{"surnames": []}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            RuleConfig::load("/nonexistent/rules.json"),
            Err(Error::Io(_))
        ));

        let config = RuleConfig::from_json(r#"{"prefixes": ["..."]}"#).unwrap();
        assert!(matches!(
            config.into_rules(),
            Err(Error::InvalidEntry { kind: RuleKind::Prefix, .. })
        ));
    }
}
