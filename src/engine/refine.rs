use super::affixes;
use super::scoring::Scorer;
use crate::config::{Flavor, SplitterConfig};
use crate::kb::Directive;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

type Span = (usize, usize);

/// Pieces longer than this many characters are returned whole. Recursion
/// depth is at most this many frames and the search is cubic in it.
pub(crate) const MAX_PIECE_CHARS: usize = 128;

/// Same-case refinement of one piece.
///
/// Works on byte ranges of the piece. Scores and sub-results are memoized per
/// range; the split floor is the frequency of the whole piece, so memoized
/// results never leak across pieces.
pub(crate) struct Refiner<'p, 's, 'a> {
    piece: &'p str,
    scorer: &'s Scorer<'a>,
    config: &'s SplitterConfig,
    floor: f64,
    scores: HashMap<Span, f64>,
    results: HashMap<Span, Vec<Span>>,
}

struct Candidate {
    spans: Vec<Span>,
    /// Mean of `ln(1 + score)` over the tokens.
    mean: f64,
    all_dictionary: bool,
}

impl Candidate {
    /// Strictly better. Exact ties go to the candidate seen first, which has
    /// the leftmost first boundary.
    fn beats(&self, other: &Candidate) -> bool {
        let order = self
            .mean
            .partial_cmp(&other.mean)
            .unwrap_or(Ordering::Equal)
            .then(self.all_dictionary.cmp(&other.all_dictionary))
            .then(other.spans.len().cmp(&self.spans.len()));
        order == Ordering::Greater
    }
}

impl<'p, 's, 'a> Refiner<'p, 's, 'a> {
    pub fn new(piece: &'p str, scorer: &'s Scorer<'a>, config: &'s SplitterConfig) -> Self {
        Self {
            piece,
            scorer,
            config,
            floor: scorer.frequency(piece),
            scores: HashMap::new(),
            results: HashMap::new(),
        }
    }

    pub fn run(mut self) -> Vec<&'p str> {
        let piece = self.piece;
        if piece.chars().nth(MAX_PIECE_CHARS).is_some() {
            debug!(len = piece.len(), "piece too long to refine");
            return vec![piece];
        }
        self.refine(0, piece.len())
            .into_iter()
            .map(|(start, end)| &piece[start..end])
            .collect()
    }

    fn score(&mut self, start: usize, end: usize) -> f64 {
        let piece = self.piece;
        let scorer = self.scorer;
        *self
            .scores
            .entry((start, end))
            .or_insert_with(|| scorer.score(&piece[start..end]))
    }

    fn refine(&mut self, start: usize, end: usize) -> Vec<Span> {
        if let Some(done) = self.results.get(&(start, end)) {
            return done.clone();
        }
        let spans = self.refine_uncached(start, end);
        self.results.insert((start, end), spans.clone());
        spans
    }

    fn refine_uncached(&mut self, start: usize, end: usize) -> Vec<Span> {
        let piece = self.piece;
        let text = &piece[start..end];
        let whole = vec![(start, end)];

        if text.chars().count() < self.config.length_cutoff {
            return whole;
        }

        match self.scorer.directive(text) {
            Some(Directive::Atomic) => return whole,
            Some(directive) => {
                if let Some(parts) = directive.apply(text) {
                    debug!(text, ?parts, "forced split");
                    return spans_of(start, &parts);
                }
            }
            None => {}
        }

        if self.config.flavor == Flavor::Ronin && self.scorer.is_dictionary_word(text) {
            debug!(text, "dictionary word kept whole");
            return whole;
        }

        let frequency = self.scorer.frequency(text);
        if frequency >= self.config.high_freq_cutoff {
            debug!(text, frequency, "frequent enough to keep whole");
            return whole;
        }

        let threshold = frequency.max(self.floor).max(self.config.low_freq_cutoff);
        debug!(text, threshold, "refining");

        let mut best: Option<Candidate> = None;
        for (offset, _) in text.char_indices().skip(1) {
            let mid = start + offset;
            if self.config.affix_guard
                && (affixes::is_prefix(&piece[start..mid]) || affixes::is_suffix(&piece[mid..end]))
            {
                continue;
            }
            if self.score(start, mid) <= threshold {
                continue;
            }

            let spans = if self.score(mid, end) > threshold {
                vec![(start, mid), (mid, end)]
            } else {
                let rest = self.refine(mid, end);
                if rest.len() < 2 {
                    continue;
                }
                std::iter::once((start, mid)).chain(rest).collect::<Vec<_>>()
            };
            if spans.iter().all(|&(s, e)| piece[s..e].chars().nth(1).is_none()) {
                continue;
            }

            let candidate = self.candidate(spans);
            debug!(
                text,
                boundary = offset,
                mean = candidate.mean,
                tokens = candidate.spans.len(),
                "candidate"
            );
            if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => candidate.spans,
            None => whole,
        }
    }

    fn candidate(&mut self, spans: Vec<Span>) -> Candidate {
        let piece = self.piece;
        let mut log_sum = 0.0;
        let mut all_dictionary = true;
        for &(start, end) in &spans {
            log_sum += self.score(start, end).ln_1p();
            all_dictionary &= self.scorer.is_dictionary_word(&piece[start..end]);
        }

        Candidate {
            mean: log_sum / spans.len() as f64,
            all_dictionary,
            spans,
        }
    }
}

fn spans_of(start: usize, parts: &[&str]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(parts.len());
    let mut cursor = start;
    for part in parts {
        spans.push((cursor, cursor + part.len()));
        cursor += part.len();
    }
    spans
}
