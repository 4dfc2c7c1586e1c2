//! A library for splitting a person's full name into its title, first,
//! middle and last names, suffixes and nickname.
//!
//! ```
//! use nameparser::HumanName;
//!
//! let name = HumanName::parse("Dr. Juan Q. Xavier de la Vega III (Doc Vega)");
//! assert_eq!("Dr.", name.title());
//! assert_eq!("Juan", name.first());
//! assert_eq!("Q. Xavier", name.middle());
//! assert_eq!("de la Vega", name.last());
//! assert_eq!("III", name.suffix());
//! assert_eq!("Doc Vega", name.nickname());
//! assert_eq!("de la", name.last_prefixes());
//! assert_eq!("Vega", name.last_base());
//! ```
//!
//! Parsing never fails: input with no recognizable structure gives a name
//! whose buckets are all empty, flagged by [`HumanName::is_unparsable`].

use compact_str::CompactString;
use once_cell::sync::Lazy;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

mod case;
mod eq;
mod error;
mod join;
mod namecase;
mod parse;
mod piece;
mod preprocess;
mod rules;
mod surname;

#[cfg(feature = "serialization")]
pub mod config;
#[cfg(feature = "ffi")]
pub mod external;
#[cfg(feature = "serialization")]
mod serialization;

pub use error::{Error, Result};
pub use rules::{Discoveries, RuleKind, RuleSet};

use join::Pieces;
use namecase::{capitalize_piece, Bucket};
use piece::Piece;

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::new);

/// Settings for genuinely ambiguous input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Preferences {
    /// Read a lone leading particle as a first name rather than part of the
    /// surname when nothing else could be the first name ("Van Johnson").
    pub first_over_prefix: bool,
    /// Split "John and Jane Doe" into two names, linked through
    /// [`HumanName::additional_name`].
    pub parse_multiple_names: bool,
}

/// A parsed name.
#[derive(Debug, Clone)]
pub struct HumanName {
    full_name: String,
    title: Pieces,
    first: Pieces,
    middle: Pieces,
    last: Pieces,
    suffix: Pieces,
    nickname: Pieces,
    last_base: Pieces,
    last_prefixes: Pieces,
    unparsable: bool,
    discovered: Discoveries,
    additional: Option<Box<HumanName>>,
}

impl HumanName {
    /// Parse with the built-in rules and default preferences.
    pub fn parse(text: &str) -> HumanName {
        HumanName::parse_with(text, &DEFAULT_RULES, Preferences::default())
    }

    /// Parse with the given rules and preferences.
    ///
    /// With `parse_multiple_names` set, "A and B" is split into a chain of
    /// names, each parsed on its own; the chain is then walked so that a name
    /// missing its last name borrows one from its neighbor. `first_over_prefix`
    /// applies to the first name of the chain only.
    pub fn parse_with(text: &str, rules: &RuleSet, prefs: Preferences) -> HumanName {
        let mut segments: SmallVec<[&str; 2]> = SmallVec::new();
        segments.push(text);

        if prefs.parse_multiple_names {
            while let Some((primary, secondary)) =
                segments.last().copied().and_then(preprocess::split_coupled)
            {
                tracing::debug!(primary, secondary, "split coupled name");
                segments.pop();
                segments.push(primary);
                segments.push(secondary);
            }
        }

        let mut chain: Option<Box<HumanName>> = None;
        for (i, segment) in segments.into_iter().enumerate().rev() {
            let prefs = if i == 0 {
                prefs
            } else {
                Preferences {
                    first_over_prefix: false,
                    ..prefs
                }
            };
            let mut name = HumanName::parse_single(segment, rules, prefs, chain.as_deref());
            if let Some(additional) = chain {
                name.discovered.merge(additional.discovered.clone());
                name.additional = Some(additional);
                name.propagate_last_name(rules);
            }
            chain = Some(Box::new(name));
        }

        match chain {
            Some(name) => *name,
            None => HumanName::parse_single(text, rules, prefs, None),
        }
    }

    /// Like [`HumanName::parse_with`], but a missing input is an error
    /// rather than an empty name.
    pub fn try_parse(text: Option<&str>, rules: &RuleSet, prefs: Preferences) -> Result<HumanName> {
        text.map(|t| HumanName::parse_with(t, rules, prefs))
            .ok_or(Error::MissingInput)
    }

    fn parse_single(
        text: &str,
        rules: &RuleSet,
        prefs: Preferences,
        additional: Option<&HumanName>,
    ) -> HumanName {
        let mut working = text.to_string();

        let mut suffix = Pieces::new();
        if let Some(phd) = preprocess::extract_phd(&mut working) {
            suffix.push(Piece::plain(&phd, rules));
        }

        let nickname: Pieces = preprocess::extract_nicknames(&mut working)
            .iter()
            .map(|n| Piece::plain(n, rules))
            .collect();

        let full_name = preprocess::collapse_whitespace(&working);
        let parts = preprocess::split_parts(&full_name);

        let context = parse::Context {
            has_nickname: !nickname.is_empty(),
            additional_has_last: additional.map(|a| !a.last.is_empty()),
        };
        let (assigned, discovered) = parse::assign(&parts, suffix, context, rules);

        let mut name = HumanName {
            full_name: full_name.clone(),
            title: assigned.title,
            first: assigned.first,
            middle: assigned.middle,
            last: assigned.last,
            suffix: assigned.suffix,
            nickname,
            last_base: Pieces::new(),
            last_prefixes: Pieces::new(),
            unparsable: false,
            discovered,
            additional: None,
        };

        name.unparsable = name.title.is_empty()
            && name.first.is_empty()
            && name.middle.is_empty()
            && name.last.is_empty()
            && name.suffix.is_empty()
            && name.nickname.is_empty();

        name.swap_lone_name(rules);
        name.split_last_name(rules, prefs.first_over_prefix);
        name
    }

    // With a generic title a lone name swaps buckets: "Mr. Jones" is a
    // surname and "Jones, Mr." a first name. "Sir Gerald" stays put.
    fn swap_lone_name(&mut self, rules: &RuleSet) {
        if self.title.is_empty() || self.first.len() + self.last.len() != 1 {
            return;
        }

        let title = join(&self.title, " ").to_lowercase();
        if !rules.is_first_name_title(&title) {
            std::mem::swap(&mut self.first, &mut self.last);
        }
    }

    fn split_last_name(&mut self, rules: &RuleSet, first_over_prefix: bool) {
        let split =
            surname::split_surname(&self.last, !self.first.is_empty(), first_over_prefix, rules);

        if let Some(first) = split.first {
            self.first.push(first);
            self.last = split.base.clone();
        }
        self.last_prefixes = split.prefixes;
        self.last_base = split.base;
    }

    // Borrow a missing last name from the next name in the chain, or lend
    // ours to any later names without one ("Smith, John and Jane").
    fn propagate_last_name(&mut self, rules: &RuleSet) {
        if self.last.is_empty() {
            if let Some(additional) = &self.additional {
                self.last = additional.last.clone();
                self.split_last_name(rules, false);
            }
            return;
        }

        let last = self.last.clone();
        let mut next = self.additional.as_deref_mut();
        while let Some(name) = next {
            if !name.last.is_empty() {
                break;
            }
            name.last = last.clone();
            name.split_last_name(rules, false);
            next = name.additional.as_deref_mut();
        }
    }

    /// The text that was parsed, with the coupled name, nicknames and any
    /// spaced-out "Ph. D." removed.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn title(&self) -> String {
        join(&self.title, " ")
    }

    pub fn first(&self) -> String {
        join(&self.first, " ")
    }

    pub fn middle(&self) -> String {
        join(&self.middle, " ")
    }

    pub fn last(&self) -> String {
        join(&self.last, " ")
    }

    /// Suffixes are separated by commas ("Jr., MD").
    pub fn suffix(&self) -> String {
        join(&self.suffix, ", ")
    }

    pub fn nickname(&self) -> String {
        join(&self.nickname, " ")
    }

    /// The last name without its leading particles, for sorting.
    pub fn last_base(&self) -> String {
        join(&self.last_base, " ")
    }

    /// The leading particles of the last name ("van der").
    pub fn last_prefixes(&self) -> String {
        join(&self.last_prefixes, " ")
    }

    /// True when nothing at all was found in the input.
    pub fn is_unparsable(&self) -> bool {
        self.unparsable
    }

    /// The second name of a coupled input like "John and Jane Doe", which
    /// may itself link to a third, and so on.
    pub fn additional_name(&self) -> Option<&HumanName> {
        self.additional.as_deref()
    }

    /// Compound titles, suffixes and conjunctions this parse recognized but
    /// the rules did not list. Pass to [`RuleSet::absorb`] to remember them.
    pub fn discovered(&self) -> &Discoveries {
        &self.discovered
    }

    /// The buckets by name: `title`, `first`, `middle`, `last`, `lastbase`,
    /// `lastprefixes`, `suffix` and `nickname`. Empty buckets are left out
    /// unless `include_empty` is set.
    pub fn as_dictionary(&self, include_empty: bool) -> BTreeMap<&'static str, String> {
        let entries = [
            ("title", self.title()),
            ("first", self.first()),
            ("middle", self.middle()),
            ("last", self.last()),
            ("lastbase", self.last_base()),
            ("lastprefixes", self.last_prefixes()),
            ("suffix", self.suffix()),
            ("nickname", self.nickname()),
        ];

        entries
            .into_iter()
            .filter(|(_, value)| include_empty || !value.is_empty())
            .collect()
    }

    /// Fix the capitalization of a name given in all upper- or all lowercase.
    /// Mixed-case input is left alone unless `force` is set.
    ///
    /// ```
    /// use nameparser::HumanName;
    ///
    /// let mut name = HumanName::parse("JUAN DE LA VEGA PHD");
    /// name.normalize(false);
    /// assert_eq!("Juan", name.first());
    /// assert_eq!("de la Vega", name.last());
    /// assert_eq!("Ph.D.", name.suffix());
    /// ```
    pub fn normalize(&mut self, force: bool) {
        self.normalize_with(&DEFAULT_RULES, force)
    }

    /// [`HumanName::normalize`] with caller-supplied rules.
    pub fn normalize_with(&mut self, rules: &RuleSet, force: bool) {
        if !force && case::is_mixed_case(&self.full_name) {
            return;
        }

        capitalize_all(&mut self.title, Bucket::Title, rules);
        capitalize_all(&mut self.first, Bucket::First, rules);
        capitalize_all(&mut self.middle, Bucket::Middle, rules);
        capitalize_all(&mut self.last, Bucket::Last, rules);
        capitalize_all(&mut self.suffix, Bucket::Suffix, rules);
        capitalize_all(&mut self.nickname, Bucket::Nickname, rules);
        capitalize_all(&mut self.last_base, Bucket::Last, rules);
        // Prefixes are kept lowercase in the last name, so normalizing them
        // again would change nothing
    }
}

// Unlink the chain one name at a time; a long run of "&"s would otherwise
// recurse once per name.
impl Drop for HumanName {
    fn drop(&mut self) {
        let mut next = self.additional.take();
        while let Some(mut name) = next {
            next = name.additional.take();
        }
    }
}

fn capitalize_all(pieces: &mut Pieces, bucket: Bucket, rules: &RuleSet) {
    for piece in pieces.iter_mut() {
        let text = capitalize_piece(piece.text(), bucket, rules);
        *piece = piece.with_text(CompactString::from(text));
    }
}

fn join(pieces: &[Piece], separator: &str) -> String {
    let mut result = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.push_str(piece.text());
    }
    result
}

impl fmt::Display for HumanName {
    /// "Title First Middle Last Suffix (Nickname)", leaving out anything empty.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let full = format!(
            "{} {} {} {} {} ({})",
            self.title(),
            self.first(),
            self.middle(),
            self.last(),
            self.suffix(),
            self.nickname()
        )
        .replace(" ()", "")
        .replace(" ''", "")
        .replace(" \"\"", "");

        let trimmed = full.trim_matches(|c| c == ',' || c == ' ');
        f.write_str(&preprocess::collapse_whitespace(trimmed))
    }
}
