use super::CamelRule;

/// Byte offsets inside `piece` where a case transition starts a new segment.
pub fn boundaries(piece: &str, rule: CamelRule, defensive: bool) -> Vec<usize> {
    if rule == CamelRule::Off || (defensive && has_adjacent_capitals(piece)) {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut cuts = Vec::new();

    for k in 1..chars.len() {
        let (pos, cur) = chars[k];
        let prev = chars[k - 1].1;
        if !cur.is_uppercase() {
            continue;
        }

        if prev.is_lowercase() || prev.is_ascii_digit() {
            cuts.push(pos);
        } else if rule == CamelRule::ForwardAcronym
            && prev.is_uppercase()
            && chars.get(k + 1).is_some_and(|&(_, next)| next.is_lowercase())
            && leading_run(&chars, k - 1)
        {
            // ABCFoo: the last capital belongs to the word that follows.
            cuts.push(pos);
        }
    }

    cuts
}

/// Whether the uppercase run ending at `last` opens the piece or follows a
/// digit. Runs after a lowercase letter are camel humps (fooBARbif).
fn leading_run(chars: &[(usize, char)], last: usize) -> bool {
    let mut first = last;
    while first > 0 && chars[first - 1].1.is_uppercase() {
        first -= 1;
    }
    first == 0 || chars[first - 1].1.is_ascii_digit()
}

fn has_adjacent_capitals(piece: &str) -> bool {
    piece
        .chars()
        .zip(piece.chars().skip(1))
        .any(|(a, b)| a.is_uppercase() && b.is_uppercase())
}
