use crate::piece::Piece;
use crate::rules::{Discoveries, RuleSet};
use smallvec::SmallVec;

pub type Pieces = SmallVec<[Piece; 6]>;

/// Merge conjunctions with their neighbors ("Secretary of State", "John and
/// Jane") and surname prefixes with what follows them ("van der Waals").
///
/// `additional` is how many pieces other comma-separated parts are assumed
/// to hold; it only feeds the length heuristics.
pub fn join_pieces(
    pieces: Pieces,
    additional: usize,
    rules: &RuleSet,
    found: &mut Discoveries,
) -> Pieces {
    // Too short to tell a conjunction or prefix from a name, e.g. "Van Nguyen"
    if pieces.len() + additional < 3 {
        return pieces;
    }

    let total_length = pieces.iter().filter(|p| p.is_rootname()).count() + additional;

    let pieces = join_conjunction_runs(pieces, rules, found);
    if pieces.len() == 1 {
        return pieces;
    }

    let pieces = join_on_conjunctions(pieces, total_length, rules, found);
    let pieces = join_prefixes(pieces, total_length, rules);

    tracing::trace!(
        pieces = ?pieces.iter().map(Piece::text).collect::<SmallVec<[&str; 6]>>(),
        "joined"
    );
    pieces
}

// "and the" -> one conjunction
fn join_conjunction_runs(pieces: Pieces, rules: &RuleSet, found: &mut Discoveries) -> Pieces {
    let mut output = Pieces::new();
    let mut i = 0;

    while i < pieces.len() {
        let run = pieces[i..]
            .iter()
            .take_while(|p| p.is_conjunction())
            .count();

        if run > 1 {
            let merged = Piece::merge(&pieces[i..i + run], rules, false, true);
            found.conjunction(merged.text());
            output.push(merged);
            i += run;
        } else {
            output.push(pieces[i].clone());
            i += 1;
        }
    }

    output
}

fn join_on_conjunctions(
    pieces: Pieces,
    total_length: usize,
    rules: &RuleSet,
    found: &mut Discoveries,
) -> Pieces {
    let mut output = Pieces::new();
    let mut source = pieces.into_iter();

    while let Some(piece) = source.next() {
        // For short names, a one-letter "conjunction" is more likely an initial
        if !piece.is_conjunction() || (piece.text().chars().count() == 1 && total_length < 4) {
            output.push(piece);
            continue;
        }

        let (merged, title) = match output.pop() {
            None => match source.next() {
                Some(next) => {
                    let title = next.is_title();
                    (Piece::merge(&[piece, next], rules, title, false), title)
                }
                None => (piece, false),
            },
            Some(prev) => {
                let title = prev.is_title();
                let merged = match source.next() {
                    Some(next) => Piece::merge(&[prev, piece, next], rules, title, false),
                    None => Piece::merge(&[prev, piece], rules, title, false),
                };
                (merged, title)
            }
        };

        if title {
            found.title(merged.text());
        }
        output.push(merged);
    }

    output
}

// Pieces are tagged with the position they entered with; merged pieces get
// fresh tags, so a prefix already swallowed by an earlier merge is no longer
// found and the previous position is reused.
fn join_prefixes(pieces: Pieces, total_length: usize, rules: &RuleSet) -> Pieces {
    let prefix_ids: SmallVec<[usize; 4]> = pieces
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_prefix())
        .map(|(id, _)| id)
        .collect();

    if prefix_ids.is_empty() {
        return pieces;
    }

    let mut next_id = pieces.len();
    let mut tagged: SmallVec<[(usize, Piece); 6]> = pieces.into_iter().enumerate().collect();
    let mut i = 0;

    for prefix_id in prefix_ids {
        if let Some(found_at) = tagged.iter().position(|(id, _)| *id == prefix_id) {
            i = found_at;
        }

        // A leading prefix is a first name when there are other names around
        if i == 0 && total_length >= 1 {
            continue;
        }

        let end = match tagged[i + 1..].iter().position(|(_, p)| p.is_prefix()) {
            Some(0) => i + 2,
            Some(offset) => i + 1 + offset,
            None => tagged[i + 1..]
                .iter()
                .position(|(_, p)| p.is_suffix())
                .map_or(tagged.len(), |offset| i + 1 + offset),
        };

        let span: SmallVec<[Piece; 4]> = tagged[i..end].iter().map(|(_, p)| p.clone()).collect();
        let merged = Piece::merge(&span, rules, false, false);
        tagged.drain(i..end);
        tagged.insert(i, (next_id, merged));
        next_id += 1;
    }

    tagged.into_iter().map(|(_, p)| p).collect()
}
