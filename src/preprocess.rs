//! Clean-up applied to the raw input before it is tokenized: splitting off a
//! coupled second name, pulling out nicknames and "Ph. D." spellings, and
//! collapsing whitespace.

use compact_str::CompactString;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static PHD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s(ph\.?\s+d\.?)").unwrap());
static DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).unwrap());
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split "John and Jane Doe" or "John & Jane Doe" at the first separator,
/// returning the text before and after it.
pub fn split_coupled(text: &str) -> Option<(&str, &str)> {
    if let Some(i) = text.find('&') {
        return Some((&text[..i], &text[i + 1..]));
    }

    const AND: &[u8] = b" and ";
    text.as_bytes()
        .windows(AND.len())
        .position(|w| w.eq_ignore_ascii_case(AND))
        .map(|i| (&text[..i], &text[i + AND.len()..]))
}

/// Remove any "Ph. D." written with a space between its halves, returning
/// the first one found.
pub fn extract_phd(text: &mut String) -> Option<CompactString> {
    let found = PHD
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| CompactString::from(m.as_str()))?;

    *text = PHD.replace_all(text, "").into_owned();
    Some(found)
}

/// Remove quoted and parenthesized nicknames from `text`, returning their
/// contents in the order found.
///
/// Single-quoted words are taken first, then double-quoted spans, then
/// parenthesized spans. Each match is removed everywhere it occurs before
/// searching again.
pub fn extract_nicknames(text: &mut String) -> SmallVec<[CompactString; 1]> {
    let mut found = SmallVec::new();

    while let Some((whole, inner)) = find_single_quoted(text) {
        strip(text, whole, inner, &mut found);
    }

    for re in [&*DOUBLE_QUOTED, &*PARENTHESIZED] {
        while let Some((whole, inner)) = re
            .captures(text)
            .and_then(|c| Some((c.get(0)?.range(), c.get(1)?.range())))
        {
            strip(text, whole, inner, &mut found);
        }
    }

    found
}

fn strip(
    text: &mut String,
    whole: std::ops::Range<usize>,
    inner: std::ops::Range<usize>,
    found: &mut SmallVec<[CompactString; 1]>,
) {
    // Empty delimiters still count as a nickname
    found.push(CompactString::from(&text[inner]));

    let matched = text[whole].to_string();
    *text = text.replace(&matched, "");
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// A quote not preceded by a word character, then the shortest run of
// non-whitespace ending in a quote not followed by a word character.
// Apostrophes inside a word ("O'Connor") never open a nickname.
fn find_single_quoted(text: &str) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    let mut prev: Option<char> = None;

    for (open, c) in text.char_indices() {
        let opens = c == '\'' && !prev.map_or(false, is_word_char);
        prev = Some(c);
        if !opens {
            continue;
        }

        let body = open + 1;
        let mut rest = text[body..].char_indices().peekable();
        while let Some((offset, c)) = rest.next() {
            if c.is_whitespace() {
                break;
            }

            if c == '\'' && !rest.peek().map_or(false, |&(_, next)| is_word_char(next)) {
                let close = body + offset;
                return Some((open..close + 1, body..close));
            }
        }
    }

    None
}

/// Trim, collapse each whitespace run to one space, and drop one trailing
/// comma.
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = WHITESPACE.replace_all(text.trim(), " ").into_owned();
    if collapsed.ends_with(',') {
        collapsed.pop();
    }
    collapsed
}

/// The comma-separated parts of `text`, each trimmed. Empty text has no
/// parts, and a trailing empty part is dropped.
pub fn split_parts(text: &str) -> SmallVec<[&str; 3]> {
    let mut parts: SmallVec<[&str; 3]> = text.split(',').map(str::trim).collect();
    if text.is_empty() || text.ends_with(',') {
        parts.pop();
    }
    parts
}

/// The space-separated tokens of one part, with stray commas trimmed.
pub fn split_tokens(part: &str) -> impl Iterator<Item = &str> {
    part.split(' ')
        .map(|t| t.trim_matches(','))
        .filter(|t| !t.is_empty())
}
