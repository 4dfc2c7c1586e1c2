use crate::join::Pieces;
use crate::piece::Piece;
use crate::rules::RuleSet;

/// A surname broken into its leading particles and the rest, for sorting
/// ("van der" + "Waals").
#[derive(Debug, Default)]
pub struct SurnameSplit {
    pub prefixes: Pieces,
    pub base: Pieces,
    /// Set when a lone leading particle was taken as the first name instead
    /// ("Van Johnson" with no other first name); the surname is then `base`.
    pub first: Option<Piece>,
}

pub fn split_surname(
    last: &[Piece],
    has_first: bool,
    first_over_prefix: bool,
    rules: &RuleSet,
) -> SurnameSplit {
    let mut words: Pieces = last
        .iter()
        .flat_map(|piece| piece.text().split(' '))
        .filter(|w| !w.is_empty())
        .map(|w| Piece::plain(w, rules))
        .collect();

    let prefix_count = words.iter().take_while(|w| w.is_prefix()).count();

    if first_over_prefix && !has_first && prefix_count == 1 && words.len() > 1 {
        let first = words.remove(0);
        return SurnameSplit {
            prefixes: Pieces::new(),
            base: words,
            first: Some(first),
        };
    }

    let base = words.drain(prefix_count..).collect();
    SurnameSplit {
        prefixes: words,
        base,
        first: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(words: &[&str]) -> Pieces {
        let rules = RuleSet::new();
        words.iter().map(|w| Piece::plain(w, &rules)).collect()
    }

    fn texts(pieces: &[Piece]) -> Vec<&str> {
        pieces.iter().map(Piece::text).collect()
    }

    #[test]
    fn no_prefix() {
        let split = split_surname(&pieces(&["Doe"]), true, false, &RuleSet::new());
        assert!(split.prefixes.is_empty());
        assert_eq!(vec!["Doe"], texts(&split.base));
    }

    #[test]
    fn joined_prefixes() {
        let split = split_surname(&pieces(&["van der waals"]), true, false, &RuleSet::new());
        assert_eq!(vec!["van", "der"], texts(&split.prefixes));
        assert_eq!(vec!["waals"], texts(&split.base));
        assert!(split.first.is_none());
    }

    #[test]
    fn prefix_as_first_name() {
        let last = pieces(&["Van Johnson"]);
        let rules = RuleSet::new();

        let split = split_surname(&last, false, true, &rules);
        assert_eq!(Some("Van"), split.first.as_ref().map(Piece::text));
        assert!(split.prefixes.is_empty());
        assert_eq!(vec!["Johnson"], texts(&split.base));

        let split = split_surname(&last, true, true, &rules);
        assert!(split.first.is_none());
        assert_eq!(vec!["Van"], texts(&split.prefixes));

        let split = split_surname(&last, false, false, &rules);
        assert!(split.first.is_none());
    }
}
