use super::{DigitRule, Segment};
use crate::kb::SpecialTerms;

const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Apply the digit rule to one case-delimited piece starting at `offset`.
pub fn push_pieces<'a>(
    piece: &'a str,
    offset: usize,
    rule: DigitRule,
    terms: &SpecialTerms,
    out: &mut Vec<Segment<'a>>,
) {
    let cuts = match rule {
        DigitRule::Keep => Vec::new(),
        DigitRule::Split => transitions(piece, false),
        DigitRule::Guarded if terms.is_atomic(piece) => {
            out.push(Segment {
                text: piece,
                start: offset,
                atomic: true,
            });
            return;
        }
        DigitRule::Guarded => transitions(piece, true),
    };

    for (start, end) in super::ranges(piece.len(), &cuts) {
        out.push(Segment {
            text: &piece[start..end],
            start: offset + start,
            atomic: false,
        });
    }
}

/// Byte offsets of letter/digit transitions. With `keep_ordinals`, a digit
/// run followed by st/nd/rd/th (and then the end or a non-lowercase
/// character) stays one piece.
fn transitions(piece: &str, keep_ordinals: bool) -> Vec<usize> {
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut cuts = Vec::new();
    let mut k = 1;

    while k < chars.len() {
        let prev_digit = chars[k - 1].1.is_ascii_digit();
        let cur_digit = chars[k].1.is_ascii_digit();

        if keep_ordinals && prev_digit && !cur_digit && is_ordinal_suffix(&chars[k..]) {
            let after = k + 2;
            if after < chars.len() {
                cuts.push(chars[after].0);
            }
            k = after + 1;
            continue;
        }

        if prev_digit != cur_digit {
            cuts.push(chars[k].0);
        }
        k += 1;
    }

    cuts
}

fn is_ordinal_suffix(rest: &[(usize, char)]) -> bool {
    if rest.len() < 2 {
        return false;
    }
    let suffix: String = rest[..2].iter().map(|&(_, c)| c.to_ascii_lowercase()).collect();
    ORDINAL_SUFFIXES.contains(&suffix.as_str())
        && rest.get(2).map_or(true, |&(_, c)| !c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(piece: &str, rule: DigitRule) -> Vec<&str> {
        let mut out = Vec::new();
        push_pieces(piece, 0, rule, SpecialTerms::builtin(), &mut out);
        out.into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_split_every_transition() {
        assert_eq!(texts("2foo2bar2", DigitRule::Split), vec!["2", "foo", "2", "bar", "2"]);
        assert_eq!(texts("utf8", DigitRule::Split), vec!["utf", "8"]);
    }

    #[test]
    fn test_guarded_keeps_special_terms_and_ordinals() {
        assert_eq!(texts("utf8", DigitRule::Guarded), vec!["utf8"]);
        assert_eq!(texts("The2nd", DigitRule::Guarded), vec!["The", "2nd"]);
        assert_eq!(texts("10th3", DigitRule::Guarded), vec!["10th", "3"]);
        assert_eq!(texts("2stages", DigitRule::Guarded), vec!["2", "stages"]);
        assert_eq!(texts("row10", DigitRule::Guarded), vec!["row", "10"]);
    }
}
