//! Hard-boundary segmentation: delimiters, case transitions and digits.
//!
//! Every variant is a [`Mode`] that switches rules on or off. Delimiter
//! characters are always dropped; nothing else ever is, so the segments of an
//! identifier concatenate back to the identifier minus its delimiters.

pub mod camel;
pub mod digits;

use crate::kb::SpecialTerms;

pub const DELIMITERS: [char; 7] = ['$', '~', '_', '.', ':', '/', '@'];

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamelRule {
    Off,
    /// Lower or digit followed by upper.
    Forward,
    /// Forward, plus `ABCFoo` -> `ABC`, `Foo` for leading uppercase runs.
    ForwardAcronym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitRule {
    Keep,
    Split,
    /// Split, except atomic special terms and ordinals.
    Guarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub camel: CamelRule,
    pub digits: DigitRule,
    /// Carve atomic special terms out of a piece before anything else.
    pub embedded_terms: bool,
    /// Skip camel splitting of pieces with two adjacent capitals.
    pub defensive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Delimiter,
    Digit,
    PureCamelCase,
    SafeSimple,
    Simple,
    Elementary,
    Heuristic,
    /// Pre-segmentation for the frequency-guided splitters. Upper-to-lower
    /// transitions are left for scoring to decide.
    Refinement,
}

impl Mode {
    pub const fn rules(self) -> Rules {
        let (camel, digits, embedded_terms, defensive) = match self {
            Mode::Delimiter => (CamelRule::Off, DigitRule::Keep, false, false),
            Mode::Digit => (CamelRule::Off, DigitRule::Split, false, false),
            Mode::PureCamelCase => (CamelRule::ForwardAcronym, DigitRule::Keep, false, false),
            Mode::SafeSimple => (CamelRule::Forward, DigitRule::Keep, false, true),
            Mode::Simple => (CamelRule::Forward, DigitRule::Keep, false, false),
            Mode::Elementary => (CamelRule::ForwardAcronym, DigitRule::Guarded, false, false),
            Mode::Heuristic => (CamelRule::ForwardAcronym, DigitRule::Guarded, true, false),
            Mode::Refinement => (CamelRule::Forward, DigitRule::Guarded, true, false),
        };
        Rules {
            camel,
            digits,
            embedded_terms,
            defensive,
        }
    }
}

/// A contiguous, non-empty slice of the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// Byte offset in the identifier.
    pub start: usize,
    /// Matched an atomic special term; never split further.
    pub atomic: bool,
}

impl Segment<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Segment with the built-in special terms.
pub fn segment(identifier: &str, mode: Mode) -> Vec<Segment<'_>> {
    segment_with(identifier, mode, SpecialTerms::builtin())
}

pub fn segment_with<'a>(identifier: &'a str, mode: Mode, terms: &SpecialTerms) -> Vec<Segment<'a>> {
    let rules = mode.rules();
    let mut out = Vec::new();

    for (offset, part) in delimited(identifier) {
        if !rules.embedded_terms {
            push_piece(part, offset, &rules, terms, &mut out);
            continue;
        }

        let mut cursor = 0;
        for (start, end) in terms.find_embedded(part) {
            push_piece(&part[cursor..start], offset + cursor, &rules, terms, &mut out);
            out.push(Segment {
                text: &part[start..end],
                start: offset + start,
                atomic: true,
            });
            cursor = end;
        }
        push_piece(&part[cursor..], offset + cursor, &rules, terms, &mut out);
    }

    out
}

/// Segment texts as owned strings.
pub fn tokens(identifier: &str, mode: Mode) -> Vec<String> {
    segment(identifier, mode)
        .into_iter()
        .map(|s| s.text.to_string())
        .collect()
}

pub fn delimiter_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::Delimiter)
}

pub fn digit_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::Digit)
}

pub fn pure_camelcase_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::PureCamelCase)
}

/// Like [`simple_split`], but leaves pieces with adjacent capitals alone
/// rather than guess where an acronym ends.
pub fn safe_simple_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::SafeSimple)
}

pub fn simple_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::Simple)
}

pub fn elementary_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::Elementary)
}

pub fn heuristic_split(identifier: &str) -> Vec<String> {
    tokens(identifier, Mode::Heuristic)
}

fn push_piece<'a>(
    piece: &'a str,
    offset: usize,
    rules: &Rules,
    terms: &SpecialTerms,
    out: &mut Vec<Segment<'a>>,
) {
    if piece.is_empty() {
        return;
    }
    let cuts = camel::boundaries(piece, rules.camel, rules.defensive);
    for (start, end) in ranges(piece.len(), &cuts) {
        digits::push_pieces(&piece[start..end], offset + start, rules.digits, terms, out);
    }
}

/// Non-empty runs between delimiters, with their byte offsets.
fn delimited(identifier: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, c) in identifier.char_indices() {
        if is_delimiter(c) {
            if i > start {
                parts.push((start, &identifier[start..i]));
            }
            start = i + c.len_utf8();
        }
    }
    if start < identifier.len() {
        parts.push((start, &identifier[start..]));
    }

    parts
}

/// `(start, end)` pairs for a string of length `len` cut at sorted `cuts`.
pub(crate) fn ranges(len: usize, cuts: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    std::iter::once(0)
        .chain(cuts.iter().copied())
        .zip(cuts.iter().copied().chain(std::iter::once(len)))
}
