use crate::rules::{Discoveries, RuleSet};
use compact_str::CompactString;
use std::fmt;

/// What the rule tables say about one token. Computed once, when the piece
/// is built, and never updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub title: bool,
    pub conjunction: bool,
    pub prefix: bool,
    pub suffix: bool,
    pub initial: bool,
    pub roman_numeral: bool,
    /// Not a prefix, suffix, title or initial; only used to size up how many
    /// real name words a part has.
    pub rootname: bool,
}

/// A classified token, or several tokens merged into one unit ("van der",
/// "Secretary of State").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    text: CompactString,
    class: Classification,
}

impl Piece {
    /// Classify a single token.
    ///
    /// A token with an interior period ("Lt.Gov.", "Msc.Ed.") is also checked
    /// chunk by chunk; if one of the chunks is a known title (or failing that
    /// a known suffix), the whole token is treated as one, and reported in
    /// `found` unless the tables already knew it.
    pub fn classify(text: &str, rules: &RuleSet, found: &mut Discoveries) -> Piece {
        let mut class = classification(text, rules);

        if has_interior_period(text) {
            let chunks = || text.split('.').filter(|c| !c.is_empty());
            if chunks().any(|c| is_title_chunk(c, rules)) {
                if !class.title {
                    tracing::debug!(token = text, "found compound title");
                    found.title(text);
                    class.title = true;
                }
                class.rootname = false;
            } else if chunks().any(|c| is_suffix_token(c, rules)) {
                if !class.suffix && !class.initial {
                    tracing::debug!(token = text, "found compound suffix");
                    found.suffix(text);
                    class.suffix = true;
                }
                class.rootname = false;
            }
        }

        Piece {
            text: CompactString::from(text),
            class,
        }
    }

    /// Join `pieces` with spaces into a single piece, classified from the
    /// joined text. `title` and `conjunction` force the matching flag on.
    pub(crate) fn merge(
        pieces: &[Piece],
        rules: &RuleSet,
        title: bool,
        conjunction: bool,
    ) -> Piece {
        let mut text = CompactString::default();
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&piece.text);
        }

        let mut class = classification(&text, rules);
        class.title |= title;
        class.conjunction |= conjunction;

        Piece { text, class }
    }

    /// Classify text that does not need compound-period checks, such as a
    /// whole comma-separated suffix part or one word of a surname.
    pub(crate) fn plain(text: &str, rules: &RuleSet) -> Piece {
        Piece {
            text: CompactString::from(text),
            class: classification(text, rules),
        }
    }

    pub(crate) fn with_text(&self, text: CompactString) -> Piece {
        Piece {
            text,
            class: self.class,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_title(&self) -> bool {
        self.class.title
    }

    #[inline]
    pub fn is_conjunction(&self) -> bool {
        self.class.conjunction
    }

    #[inline]
    pub fn is_prefix(&self) -> bool {
        self.class.prefix
    }

    #[inline]
    pub fn is_suffix(&self) -> bool {
        self.class.suffix
    }

    #[inline]
    pub fn is_initial(&self) -> bool {
        self.class.initial
    }

    #[inline]
    pub fn is_roman_numeral(&self) -> bool {
        self.class.roman_numeral
    }

    #[inline]
    pub fn is_rootname(&self) -> bool {
        self.class.rootname
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One uppercase letter, or one letter followed by a period.
pub fn is_initial(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, None) => c.is_uppercase(),
        (Some(c), Some('.'), None) => c.is_alphabetic(),
        _ => false,
    }
}

fn classification(text: &str, rules: &RuleSet) -> Classification {
    let lower = text.to_lowercase();
    let trimmed = lower.trim_matches('.');
    let initial = is_initial(text);

    let prefix = rules.is_prefix(trimmed);
    let title = rules.is_title(trimmed);

    Classification {
        title,
        conjunction: rules.is_conjunction(&lower) && !initial,
        prefix,
        suffix: is_suffix(trimmed, initial, rules),
        initial,
        roman_numeral: rules.is_roman_numeral(&lower),
        rootname: !prefix
            && !title
            && !initial
            && !rules.is_suffix_acronym(trimmed)
            && !rules.is_suffix_not_acronym(trimmed),
    }
}

/// Suffix by table membership, for a bare token.
fn is_suffix_token(text: &str, rules: &RuleSet) -> bool {
    let lower = text.to_lowercase();
    is_suffix(lower.trim_matches('.'), is_initial(text), rules)
}

fn is_suffix(trimmed_lower: &str, initial: bool, rules: &RuleSet) -> bool {
    if initial {
        return false;
    }

    if trimmed_lower.contains('.') {
        let no_periods: CompactString = trimmed_lower.chars().filter(|&c| c != '.').collect();
        rules.is_suffix_acronym(&no_periods) || rules.is_suffix_not_acronym(trimmed_lower)
    } else {
        rules.is_suffix_acronym(trimmed_lower) || rules.is_suffix_not_acronym(trimmed_lower)
    }
}

fn has_interior_period(text: &str) -> bool {
    let mut chars = text.chars();
    if chars.clone().count() <= 3 {
        return false;
    }

    chars.next();
    chars.next_back();
    chars.any(|c| c == '.')
}

fn is_title_chunk(chunk: &str, rules: &RuleSet) -> bool {
    rules.is_title(chunk.to_lowercase().trim_matches('.'))
}
