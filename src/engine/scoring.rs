use crate::config::{Flavor, SplitterConfig};
use crate::kb::{Directive, FrequencyTable, KnowledgeBase};

/// Scores candidate tokens against the knowledge base.
///
/// Pure: the same token always scores the same for a given knowledge base,
/// local table and configuration.
#[derive(Debug)]
pub struct Scorer<'a> {
    kb: &'a KnowledgeBase,
    local: Option<&'a FrequencyTable>,
    config: &'a SplitterConfig,
    local_divisor: f64,
    single_letter: f64,
}

impl<'a> Scorer<'a> {
    pub fn new(
        kb: &'a KnowledgeBase,
        local: Option<&'a FrequencyTable>,
        config: &'a SplitterConfig,
    ) -> Self {
        let local_divisor = local
            .map(|table| (table.total() as f64).log10().max(1.0))
            .unwrap_or(1.0);
        let single_letter = kb
            .frequencies()
            .min_single_char()
            .map(|min| min as f64 * config.single_letter_factor)
            .unwrap_or(config.single_letter_fallback);

        Self {
            kb,
            local,
            config,
            local_divisor,
            single_letter,
        }
    }

    /// Raw occurrence evidence. With a local table, local counts are taken
    /// as-is and global counts are scaled down by `log10` of the local total.
    pub fn frequency(&self, token: &str) -> f64 {
        let global = self.kb.frequencies().lookup(token);
        let Some(local) = self.local else {
            return global.unwrap_or(0) as f64;
        };

        match (local.lookup(token), global) {
            (Some(l), None) => l as f64,
            (None, Some(g)) => g as f64 / self.local_divisor,
            (Some(l), Some(g)) => l as f64 + g as f64 / self.local_divisor,
            (None, None) => 0.0,
        }
    }

    pub fn directive(&self, token: &str) -> Option<&'a Directive> {
        self.kb.special_case(token)
    }

    pub fn is_dictionary_word(&self, token: &str) -> bool {
        token.chars().count() >= self.config.min_dictionary_word_length
            && self.kb.in_dictionary(token)
    }

    /// Confidence that `token` is a word on its own.
    pub fn score(&self, token: &str) -> f64 {
        match self.directive(token) {
            Some(Directive::Atomic) => return f64::MAX,
            Some(Directive::Split(_)) => return 0.0,
            None => {}
        }

        match self.config.flavor {
            Flavor::Samurai => self.frequency(token).sqrt(),
            Flavor::Ronin => self.ronin_score(token),
        }
    }

    fn ronin_score(&self, token: &str) -> f64 {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return 0.0,
            (Some(c), None) if !self.is_single_letter_word(c) => return self.single_letter,
            _ => {}
        }

        let count = self.frequency(token);
        if count <= self.config.ignored_freq_threshold as f64 {
            0.0
        } else if self.is_dictionary_word(token) {
            count + self.config.dictionary_bonus
        } else {
            count.sqrt()
        }
    }

    fn is_single_letter_word(&self, c: char) -> bool {
        self.config
            .single_letter_words
            .iter()
            .any(|w| w.to_lowercase().chars().eq(c.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{Dictionary, SpecialTerms};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new(
            FrequencyTable::from_pairs([
                ("get", 10_000u64),
                ("value", 400),
                ("xyzzy", 400),
                ("rare", 5),
                ("x", 2_000),
                ("q", 500),
            ]),
            Dictionary::from_words(["value", "rare"]).unwrap(),
            SpecialTerms::builtin().clone(),
        )
    }

    #[test]
    fn test_ronin_scores() {
        let kb = kb();
        let config = SplitterConfig::default();
        let scorer = Scorer::new(&kb, None, &config);

        assert_eq!(scorer.score("value"), 410.0);
        assert_eq!(scorer.score("xyzzy"), 20.0);
        assert_eq!(scorer.score("rare"), 0.0);
        assert_eq!(scorer.score("missing"), 0.0);
        // 0.02 x the rarest single character (q = 500)
        assert_eq!(scorer.score("x"), 10.0);
        assert_eq!(scorer.score("utf8"), f64::MAX);
    }

    #[test]
    fn test_single_letter_words_score_by_frequency() {
        let kb = kb();
        let config = SplitterConfig {
            single_letter_words: vec!["X".to_string()],
            ..Default::default()
        };
        let scorer = Scorer::new(&kb, None, &config);

        assert!((scorer.score("x") - 2_000f64.sqrt()).abs() < 1e-9);
        assert_eq!(scorer.score("q"), 10.0);
    }

    #[test]
    fn test_samurai_scores_are_square_roots() {
        let kb = kb();
        let config = SplitterConfig::samurai();
        let scorer = Scorer::new(&kb, None, &config);

        assert_eq!(scorer.score("value"), 20.0);
        assert_eq!(scorer.score("get"), 100.0);
        assert!((scorer.score("rare") - 5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_local_frequencies_are_blended() {
        let kb = kb();
        let config = SplitterConfig::default();
        // total 1000 -> divisor 3
        let local = FrequencyTable::from_pairs([("get", 100u64), ("frob", 900)]);
        let scorer = Scorer::new(&kb, Some(&local), &config);

        assert_eq!(scorer.frequency("frob"), 900.0);
        assert!((scorer.frequency("value") - 400.0 / 3.0).abs() < 1e-9);
        assert!((scorer.frequency("get") - (100.0 + 10_000.0 / 3.0)).abs() < 1e-9);
        assert_eq!(scorer.frequency("nothing"), 0.0);
    }
}
