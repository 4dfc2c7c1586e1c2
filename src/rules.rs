//! Classification tables consulted while parsing.
//!
//! The built-in tables are compiled from `build/rule_data.json`; a
//! [`RuleSet`](struct.RuleSet.html) layers caller-supplied entries on top of
//! them. Parsing never mutates a rule set: compound tokens discovered along
//! the way are reported as [`Discoveries`](struct.Discoveries.html), which the
//! caller may fold back in with [`RuleSet::absorb`](struct.RuleSet.html#method.absorb).

use crate::Error;
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;

static TITLES: phf::Set<&'static str> = include!(concat!(env!("OUT_DIR"), "/titles.rs"));

static FIRST_NAME_TITLES: phf::Set<&'static str> =
    include!(concat!(env!("OUT_DIR"), "/first_name_titles.rs"));

static CONJUNCTIONS: phf::Set<&'static str> =
    include!(concat!(env!("OUT_DIR"), "/conjunctions.rs"));

static PREFIXES: phf::Set<&'static str> = include!(concat!(env!("OUT_DIR"), "/prefixes.rs"));

static SUFFIX_ACRONYMS: phf::Set<&'static str> =
    include!(concat!(env!("OUT_DIR"), "/suffix_acronyms.rs"));

static SUFFIXES_NOT_ACRONYMS: phf::Set<&'static str> =
    include!(concat!(env!("OUT_DIR"), "/suffixes_not_acronyms.rs"));

static ROMAN_NUMERALS: phf::Set<&'static str> =
    include!(concat!(env!("OUT_DIR"), "/roman_numerals.rs"));

static CAPITALIZATION_EXCEPTIONS: phf::Map<&'static str, &'static str> =
    include!(concat!(env!("OUT_DIR"), "/capitalization_exceptions.rs"));

/// The tables a caller can extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum RuleKind {
    Title,
    FirstNameTitle,
    Conjunction,
    Prefix,
    /// Post-nominal acronyms, matched with all periods removed ("M.B.A.").
    Suffix,
    /// Suffixes matched with their interior periods intact ("Jr", "esq").
    SuffixNotAcronym,
    RomanNumeral,
}

impl RuleKind {
    /// Reduce an entry to the form it is looked up in.
    pub(crate) fn key(self, entry: &str) -> CompactString {
        let lower = entry.trim().to_lowercase();
        match self {
            RuleKind::Conjunction | RuleKind::RomanNumeral => CompactString::from(lower),
            RuleKind::Suffix => lower.trim_matches('.').chars().filter(|&c| c != '.').collect(),
            _ => CompactString::from(lower.trim_matches('.')),
        }
    }
}

#[derive(Debug, Clone)]
struct Table {
    builtin: &'static phf::Set<&'static str>,
    extra: AHashSet<CompactString>,
}

impl Table {
    fn new(builtin: &'static phf::Set<&'static str>) -> Table {
        Table {
            builtin,
            extra: AHashSet::new(),
        }
    }

    #[inline]
    fn contains(&self, key: &str) -> bool {
        self.builtin.contains(key) || (!self.extra.is_empty() && self.extra.contains(key))
    }
}

/// Known titles, prefixes, suffixes, conjunctions and capitalization
/// exceptions.
///
/// Lookups ignore case and leading or trailing periods; acronym suffixes
/// ignore every period ("M.B.A." is "mba").
///
/// # Examples
/// ```
/// use nameparser::{HumanName, Preferences, RuleKind, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.add(RuleKind::Suffix, "LUTCF").unwrap();
///
/// let name = HumanName::parse_with("John Doe LUTCF", &rules, Preferences::default());
/// assert_eq!("Doe", name.last());
/// assert_eq!("LUTCF", name.suffix());
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    titles: Table,
    first_name_titles: Table,
    conjunctions: Table,
    prefixes: Table,
    suffix_acronyms: Table,
    suffixes_not_acronyms: Table,
    roman_numerals: Table,
    capitalization_exceptions: AHashMap<CompactString, CompactString>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::new()
    }
}

impl RuleSet {
    /// The built-in tables, with no caller entries.
    pub fn new() -> RuleSet {
        RuleSet {
            titles: Table::new(&TITLES),
            first_name_titles: Table::new(&FIRST_NAME_TITLES),
            conjunctions: Table::new(&CONJUNCTIONS),
            prefixes: Table::new(&PREFIXES),
            suffix_acronyms: Table::new(&SUFFIX_ACRONYMS),
            suffixes_not_acronyms: Table::new(&SUFFIXES_NOT_ACRONYMS),
            roman_numerals: Table::new(&ROMAN_NUMERALS),
            capitalization_exceptions: AHashMap::new(),
        }
    }

    fn table_mut(&mut self, kind: RuleKind) -> &mut Table {
        match kind {
            RuleKind::Title => &mut self.titles,
            RuleKind::FirstNameTitle => &mut self.first_name_titles,
            RuleKind::Conjunction => &mut self.conjunctions,
            RuleKind::Prefix => &mut self.prefixes,
            RuleKind::Suffix => &mut self.suffix_acronyms,
            RuleKind::SuffixNotAcronym => &mut self.suffixes_not_acronyms,
            RuleKind::RomanNumeral => &mut self.roman_numerals,
        }
    }

    /// Add an entry to one of the tables. A first-name title is also
    /// registered as a title.
    pub fn add(&mut self, kind: RuleKind, entry: &str) -> Result<(), Error> {
        let key = kind.key(entry);
        if key.is_empty() {
            return Err(Error::InvalidEntry {
                kind,
                entry: entry.to_string(),
            });
        }

        if kind == RuleKind::FirstNameTitle {
            self.titles.extra.insert(key.clone());
        }
        self.table_mut(kind).extra.insert(key);
        Ok(())
    }

    /// Add several entries to one table.
    pub fn extend<I, S>(&mut self, kind: RuleKind, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.add(kind, entry.as_ref())?;
        }
        Ok(())
    }

    /// Spell `word` as `replacement` whenever a name is normalized, e.g.
    /// `("phd", "Ph.D.")`.
    pub fn add_capitalization_exception(&mut self, word: &str, replacement: &str) {
        self.capitalization_exceptions
            .insert(exception_key(word), CompactString::from(replacement));
    }

    /// Fold the compound tokens found by an earlier parse into this rule set,
    /// so later parses classify them without rediscovering them.
    pub fn absorb(&mut self, discovered: &Discoveries) {
        self.titles.extra.extend(discovered.titles.iter().cloned());
        self.suffixes_not_acronyms
            .extra
            .extend(discovered.suffixes.iter().cloned());
        self.conjunctions
            .extra
            .extend(discovered.conjunctions.iter().cloned());
    }

    #[inline]
    pub(crate) fn is_title(&self, trimmed_lower: &str) -> bool {
        self.titles.contains(trimmed_lower)
    }

    #[inline]
    pub(crate) fn is_first_name_title(&self, lower: &str) -> bool {
        self.first_name_titles.contains(lower)
    }

    #[inline]
    pub(crate) fn is_conjunction(&self, lower: &str) -> bool {
        self.conjunctions.contains(lower)
    }

    #[inline]
    pub(crate) fn is_prefix(&self, trimmed_lower: &str) -> bool {
        self.prefixes.contains(trimmed_lower)
    }

    #[inline]
    pub(crate) fn is_suffix_acronym(&self, key: &str) -> bool {
        self.suffix_acronyms.contains(key)
    }

    #[inline]
    pub(crate) fn is_suffix_not_acronym(&self, trimmed_lower: &str) -> bool {
        self.suffixes_not_acronyms.contains(trimmed_lower)
    }

    #[inline]
    pub(crate) fn is_roman_numeral(&self, lower: &str) -> bool {
        self.roman_numerals.contains(lower)
    }

    pub(crate) fn capitalization_exception(&self, word: &str) -> Option<&str> {
        let key = exception_key(word);
        self.capitalization_exceptions
            .get(&key)
            .map(CompactString::as_str)
            .or_else(|| CAPITALIZATION_EXCEPTIONS.get(key.as_str()).copied())
    }
}

// Periods are ignored so that "M.D." maps back to itself
fn exception_key(word: &str) -> CompactString {
    word.chars()
        .filter(|&c| c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compound tokens recognized during a single parse.
///
/// Titles cover both period-joined abbreviations ("lt.gov") and
/// conjunction-joined titles ("secretary of state"); suffixes cover
/// period-joined post-nominals; conjunctions cover runs like "and the".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discoveries {
    pub titles: Vec<CompactString>,
    pub suffixes: Vec<CompactString>,
    pub conjunctions: Vec<CompactString>,
}

impl Discoveries {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.suffixes.is_empty() && self.conjunctions.is_empty()
    }

    pub(crate) fn title(&mut self, text: &str) {
        push_unique(&mut self.titles, RuleKind::Title.key(text));
    }

    pub(crate) fn suffix(&mut self, text: &str) {
        push_unique(&mut self.suffixes, RuleKind::SuffixNotAcronym.key(text));
    }

    pub(crate) fn conjunction(&mut self, text: &str) {
        push_unique(&mut self.conjunctions, RuleKind::Conjunction.key(text));
    }

    pub(crate) fn merge(&mut self, other: Discoveries) {
        for t in other.titles {
            push_unique(&mut self.titles, t);
        }
        for s in other.suffixes {
            push_unique(&mut self.suffixes, s);
        }
        for c in other.conjunctions {
            push_unique(&mut self.conjunctions, c);
        }
    }
}

fn push_unique(list: &mut Vec<CompactString>, key: CompactString) {
    if !key.is_empty() && !list.contains(&key) {
        list.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookups() {
        let rules = RuleSet::new();
        assert!(rules.is_title("dr"));
        assert!(rules.is_title("sir"));
        assert!(rules.is_first_name_title("sir"));
        assert!(!rules.is_first_name_title("dr"));
        assert!(rules.is_conjunction("&"));
        assert!(rules.is_prefix("van"));
        assert!(rules.is_suffix_acronym("phd"));
        assert!(rules.is_suffix_not_acronym("jr"));
        assert!(rules.is_roman_numeral("xiv"));
        assert!(!rules.is_title("john"));
    }

    #[test]
    fn added_entries_use_lookup_form() {
        let mut rules = RuleSet::new();
        rules.add(RuleKind::Suffix, "L.U.T.C.F.").unwrap();
        rules.add(RuleKind::Title, "Grand Poobah.").unwrap();
        rules.add(RuleKind::FirstNameTitle, "Brother-In-Arms").unwrap();

        assert!(rules.is_suffix_acronym("lutcf"));
        assert!(rules.is_title("grand poobah"));
        assert!(rules.is_first_name_title("brother-in-arms"));
        assert!(rules.is_title("brother-in-arms"));
    }

    #[test]
    fn empty_entry_is_rejected() {
        let mut rules = RuleSet::new();
        assert!(rules.add(RuleKind::Prefix, " .. ").is_err());
    }

    #[test]
    fn capitalization_exceptions() {
        let mut rules = RuleSet::new();
        assert_eq!(Some("Ph.D."), rules.capitalization_exception("phd"));
        assert_eq!(Some("M.D."), rules.capitalization_exception("m.d."));
        assert_eq!(None, rules.capitalization_exception("cfa"));

        rules.add_capitalization_exception("cfa", "CFA");
        assert_eq!(Some("CFA"), rules.capitalization_exception("CFA"));
    }

    #[test]
    fn absorb_discoveries() {
        let mut found = Discoveries::default();
        found.title("Lt.Gov.");
        found.suffix("Msc.Ed.");
        found.conjunction("and the");
        found.title("lt.gov");

        assert_eq!(1, found.titles.len());

        let mut rules = RuleSet::new();
        assert!(!rules.is_title("lt.gov"));
        rules.absorb(&found);
        assert!(rules.is_title("lt.gov"));
        assert!(rules.is_suffix_not_acronym("msc.ed"));
        assert!(rules.is_conjunction("and the"));
    }
}
