use crate::join::{join_pieces, Pieces};
use crate::piece::Piece;
use crate::preprocess::split_tokens;
use crate::rules::{Discoveries, RuleSet};

/// What the assigner needs to know about the rest of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// A nickname was pulled out of the text.
    pub has_nickname: bool,
    /// `None` when there is no coupled name; otherwise whether that name
    /// has a last name the primary can borrow.
    pub additional_has_last: Option<bool>,
}

/// The name pieces, sorted into buckets.
#[derive(Debug, Default)]
pub struct Assignment {
    pub title: Pieces,
    pub first: Pieces,
    pub middle: Pieces,
    pub last: Pieces,
    pub suffix: Pieces,
}

#[derive(Debug)]
struct ParseOp<'a> {
    rules: &'a RuleSet,
    context: Context,
    found: Discoveries,
    out: Assignment,
}

/// Assign the comma-separated `parts` of a cleaned-up name to buckets.
///
/// `suffix` holds any suffix found during preprocessing; suffixes found
/// here are added around it in input order.
pub fn assign(
    parts: &[&str],
    suffix: Pieces,
    context: Context,
    rules: &RuleSet,
) -> (Assignment, Discoveries) {
    let mut op = ParseOp {
        rules,
        context,
        found: Discoveries::default(),
        out: Assignment {
            suffix,
            ..Assignment::default()
        },
    };

    op.run(parts);
    (op.out, op.found)
}

impl<'a> ParseOp<'a> {
    fn run(&mut self, parts: &[&str]) {
        match parts {
            // Everything was a nickname
            [] => {}
            [part] => {
                tracing::debug!(part, "no comma");
                self.handle_no_comma(part);
            }
            [first_part, second_part, ..] => {
                let before_comma = split_tokens(first_part).count();
                // Classified in full so compounds like "Msc.Ed." count
                let after_comma: Pieces = split_tokens(second_part)
                    .map(|token| Piece::classify(token, self.rules, &mut self.found))
                    .collect();

                if before_comma > 1 && are_suffixes(&after_comma) {
                    // "John Doe, Jr., MD"
                    tracing::debug!(parts = parts.len(), "suffix comma");
                    self.handle_suffix_comma(parts);
                } else {
                    // "Doe, John"
                    tracing::debug!(parts = parts.len(), "last name comma");
                    self.handle_lastname_comma(parts);
                }
            }
        }
    }

    fn pieces(&mut self, part: &str, additional: usize) -> Pieces {
        let pieces: Pieces = split_tokens(part)
            .map(|token| Piece::classify(token, self.rules, &mut self.found))
            .collect();
        join_pieces(pieces, additional, self.rules, &mut self.found)
    }

    // Title First Middle Last Suffix
    fn handle_no_comma(&mut self, part: &str) {
        let pieces = self.pieces(part, 0);
        let len = pieces.len();

        for (i, piece) in pieces.iter().enumerate() {
            let next = pieces.get(i + 1);

            if self.out.first.is_empty() {
                if (next.is_some() || len == 1) && piece.is_title() {
                    self.out.title.push(piece.clone());
                } else if len == 1 && self.context.has_nickname {
                    // A lone name beside a nickname is more often a surname
                    self.out.last.push(piece.clone());
                } else {
                    self.out.first.push(piece.clone());
                }
                continue;
            }

            let rest = &pieces[i + 1..];
            let roman_numeral_follows = next.map_or(false, Piece::is_roman_numeral)
                && i + 2 == len
                && !piece.is_initial();

            if are_suffixes(rest) || roman_numeral_follows {
                self.out.last.push(piece.clone());
                self.out.suffix.extend(rest.iter().cloned());
                break;
            }

            self.place_after_first(piece, next.is_some());
        }
    }

    // Title First Middle Last [Suffix], Suffix [, Suffix]...
    fn handle_suffix_comma(&mut self, parts: &[&str]) {
        let whole_suffixes: Pieces = parts[1..]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| Piece::plain(p, self.rules))
            .collect();
        self.out.suffix.extend(whole_suffixes);

        let pieces = self.pieces(parts[0], 0);
        let len = pieces.len();

        for (i, piece) in pieces.iter().enumerate() {
            let next = pieces.get(i + 1);

            if self.out.first.is_empty() {
                if (next.is_some() || len == 1) && piece.is_title() {
                    self.out.title.push(piece.clone());
                } else {
                    self.out.first.push(piece.clone());
                }
                continue;
            }

            let rest = &pieces[i + 1..];
            if are_suffixes(rest) {
                // Suffixes before the comma come before those after it
                self.out.last.push(piece.clone());
                self.out.suffix.insert_many(0, rest.iter().cloned());
                break;
            }

            self.place_after_first(piece, next.is_some());
        }
    }

    // Last [Suffix], Title First Middles [Suffix] [, Suffix]...
    fn handle_lastname_comma(&mut self, parts: &[&str]) {
        for piece in self.pieces(parts[0], 1) {
            // The first piece is the last name even if it looks like a suffix
            if !self.out.last.is_empty() && piece.is_suffix() {
                self.out.suffix.push(piece);
            } else {
                self.out.last.push(piece);
            }
        }

        let pieces = self.pieces(parts[1], 0);
        let len = pieces.len();

        for (i, piece) in pieces.into_iter().enumerate() {
            if self.out.first.is_empty() {
                if (i + 1 < len || len == 1) && piece.is_title() {
                    self.out.title.push(piece);
                } else {
                    self.out.first.push(piece);
                }
            } else if piece.is_suffix() {
                self.out.suffix.push(piece);
            } else {
                self.out.middle.push(piece);
            }
        }

        for part in parts[2..].iter().filter(|p| !p.is_empty()) {
            self.out.suffix.push(Piece::plain(part, self.rules));
        }
    }

    // A piece after the first name that is not followed by only suffixes
    fn place_after_first(&mut self, piece: &Piece, has_next: bool) {
        if has_next {
            self.out.middle.push(piece.clone());
            return;
        }

        match self.context.additional_has_last {
            // "John D. and Catherine T. MacArthur": the trailing initial is a
            // middle name and the last name comes from the coupled name
            Some(true) if piece.is_initial() => self.out.middle.push(piece.clone()),
            _ => self.out.last.push(piece.clone()),
        }
    }
}

fn are_suffixes(pieces: &[Piece]) -> bool {
    !pieces.is_empty() && pieces.iter().all(Piece::is_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::split_parts;

    fn parse(text: &str) -> Assignment {
        parse_with(text, Context::default())
    }

    fn parse_with(text: &str, context: Context) -> Assignment {
        let parts = split_parts(text);
        assign(&parts, Pieces::new(), context, &RuleSet::new()).0
    }

    fn texts(pieces: &Pieces) -> Vec<&str> {
        pieces.iter().map(Piece::text).collect()
    }

    #[test]
    fn first_last() {
        let name = parse("John Doe");
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert!(name.middle.is_empty());
    }

    #[test]
    fn title_first_middle_last_suffix() {
        let name = parse("Lt.Gen. John A. Kenneth Doe IV");
        assert_eq!(vec!["Lt.Gen."], texts(&name.title));
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["A.", "Kenneth"], texts(&name.middle));
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert_eq!(vec!["IV"], texts(&name.suffix));
    }

    #[test]
    fn roman_numeral_after_initial() {
        let name = parse("King John V.");
        assert_eq!(vec!["King"], texts(&name.title));
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["V."], texts(&name.last));
        assert!(name.suffix.is_empty());
    }

    #[test]
    fn lone_title() {
        let name = parse("Dr.");
        assert_eq!(vec!["Dr."], texts(&name.title));
        assert!(name.first.is_empty());
    }

    #[test]
    fn lone_name_beside_nickname() {
        let context = Context {
            has_nickname: true,
            ..Context::default()
        };
        let name = parse_with("Franklin", context);
        assert_eq!(vec!["Franklin"], texts(&name.last));
        assert!(name.first.is_empty());
    }

    #[test]
    fn last_name_comma() {
        let name = parse("Doe, Rev. John V, Jr.");
        assert_eq!(vec!["Rev."], texts(&name.title));
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["V"], texts(&name.middle));
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert_eq!(vec!["Jr."], texts(&name.suffix));
    }

    #[test]
    fn suffix_in_last_name_part() {
        let name = parse("Smith Jr., John");
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["Smith"], texts(&name.last));
        assert_eq!(vec!["Jr."], texts(&name.suffix));
    }

    #[test]
    fn suffix_comma() {
        let name = parse("John Doe, CLU, CFP, LUTC");
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert_eq!(vec!["CLU", "CFP", "LUTC"], texts(&name.suffix));
    }

    #[test]
    fn compound_suffix_after_comma() {
        let parts = split_parts("John Doe, Msc.Ed.");
        let (name, found) = assign(&parts, Pieces::new(), Context::default(), &RuleSet::new());
        assert_eq!(vec!["John"], texts(&name.first));
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert_eq!(vec!["Msc.Ed."], texts(&name.suffix));
        assert_eq!(found.suffixes, vec!["msc.ed"]);
    }

    #[test]
    fn suffixes_on_both_sides_of_comma() {
        let name = parse("John Doe Jr., MD");
        assert_eq!(vec!["Doe"], texts(&name.last));
        assert_eq!(vec!["Jr.", "MD"], texts(&name.suffix));
    }

    #[test]
    fn trailing_initial_waits_for_coupled_last_name() {
        let context = Context {
            additional_has_last: Some(true),
            ..Context::default()
        };
        let name = parse_with("John D.", context);
        assert_eq!(vec!["D."], texts(&name.middle));
        assert!(name.last.is_empty());

        let name = parse_with("John Doe", context);
        assert_eq!(vec!["Doe"], texts(&name.last));
    }

    #[test]
    fn nothing_to_assign() {
        let name = parse("");
        assert!(name.first.is_empty() && name.last.is_empty() && name.title.is_empty());
    }
}
