use crate::case::title_case;
use crate::piece::is_initial;
use crate::rules::RuleSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.]+").unwrap());
static MAC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(ma?c)(\w{2,})").unwrap());

/// Which part of the name a piece belongs to; particles stay lowercase only
/// in the middle and last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Title,
    First,
    Middle,
    Last,
    Suffix,
    Nickname,
}

/// Capitalize each word of a piece on its own, so "o'neil-smith" becomes
/// "O'Neil-Smith".
pub fn capitalize_piece(text: &str, bucket: Bucket, rules: &RuleSet) -> String {
    WORD.replace_all(text, |caps: &Captures| {
        capitalize_word(&caps[0], bucket, rules)
    })
    .into_owned()
}

fn capitalize_word(word: &str, bucket: Bucket, rules: &RuleSet) -> String {
    let lower = word.to_lowercase();
    let trimmed = lower.trim_matches('.');

    let particle = matches!(bucket, Bucket::Middle | Bucket::Last) && rules.is_prefix(trimmed);
    let conjunction = rules.is_conjunction(&lower) && !is_initial(word);
    if particle || conjunction {
        return trimmed.to_string();
    }

    // "phd" -> "Ph.D."
    if let Some(exception) = rules.capitalization_exception(trimmed) {
        return exception.to_string();
    }

    // "mcbride" -> "McBride"
    if let Some(caps) = MAC.captures(word) {
        if let (Some(whole), Some(mac), Some(rest)) = (caps.get(0), caps.get(1), caps.get(2)) {
            return title_case(mac.as_str()) + &title_case(rest.as_str()) + &word[whole.end()..];
        }
    }

    title_case(word)
}
