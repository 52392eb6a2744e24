//! Frequency-guided splitting: Ronin and its ancestor Samurai.
//!
//! An identifier is first cut at hard boundaries (delimiters, lower-to-upper
//! case changes, guarded digits, embedded special terms). Each remaining
//! piece then goes through two steps:
//!
//! 1. an upper-to-lower step decides whether the capital in front of a
//!    lowercase run belongs to that run (`GPSmodule` vs `CData`);
//! 2. same-case refinement searches the piece's interior boundaries for the
//!    best-scoring partition (see [`refine`]).

mod affixes;
mod refine;
pub mod scoring;

use crate::config::{Config, Flavor, SplitterConfig};
use crate::error::Result;
use crate::kb::{FrequencyTable, KnowledgeBase};
use crate::lexer::{self, Mode};
use lazy_static::lazy_static;
use regex::Regex;
use refine::Refiner;
use tracing::debug;

pub use scoring::Scorer;

lazy_static! {
    static ref UPPER_LOWER: Regex = Regex::new(r"[A-Z][a-z]").unwrap();
}

/// A configured splitter over a loaded knowledge base.
#[derive(Debug, Clone)]
pub struct Splitter<'kb> {
    kb: &'kb KnowledgeBase,
    local: Option<&'kb FrequencyTable>,
    config: SplitterConfig,
}

impl<'kb> Splitter<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self {
            kb,
            local: None,
            config: SplitterConfig::default(),
        }
    }

    /// Blend in frequencies mined from the code base being analyzed.
    pub fn with_local(mut self, local: &'kb FrequencyTable) -> Self {
        self.local = Some(local);
        self
    }

    pub fn with_config(mut self, config: SplitterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(self.kb, self.local, &self.config)
    }

    /// Split one identifier. Empty input gives no tokens; anything else gives
    /// at least one.
    pub fn split(&self, identifier: &str) -> Vec<String> {
        if identifier.is_empty() {
            return Vec::new();
        }
        debug!(identifier, flavor = ?self.config.flavor, "splitting");

        let scorer = self.scorer();
        let mut tokens = Vec::new();

        for segment in lexer::segment_with(identifier, Mode::Refinement, self.kb.special_terms()) {
            if segment.atomic {
                tokens.push(segment.text.to_string());
                continue;
            }
            if let Some(parts) = scorer
                .directive(segment.text)
                .and_then(|directive| directive.apply(segment.text))
            {
                tokens.extend(parts.into_iter().map(str::to_string));
                continue;
            }
            if self.keeps_whole(segment.text, &scorer) {
                debug!(segment = segment.text, "segment kept whole");
                tokens.push(segment.text.to_string());
                continue;
            }

            for part in self.camel_step(segment.text, &scorer) {
                let refined = Refiner::new(part, &scorer, &self.config).run();
                tokens.extend(refined.into_iter().map(str::to_string));
            }
        }

        debug!(identifier, ?tokens, "split result");
        tokens
    }

    /// A segment at least as frequent as the high cutoff, or a dictionary
    /// word under Ronin, is one token regardless of its case pattern.
    fn keeps_whole(&self, text: &str, scorer: &Scorer<'_>) -> bool {
        scorer.frequency(text) >= self.config.high_freq_cutoff
            || (self.config.flavor == Flavor::Ronin && scorer.is_dictionary_word(text))
    }

    /// Resolve the first upper-to-lower transition of `s`: keep the capital
    /// with the lowercase run after it, or end the previous token with it.
    fn camel_step<'s>(&self, s: &'s str, scorer: &Scorer<'_>) -> Vec<&'s str> {
        let Some(transition) = UPPER_LOWER.find(s) else {
            return vec![s];
        };
        let i = transition.start();

        let with_capital = if i > 0 { &s[i..] } else { s };
        let camel_score = self.config.camel_bias * scorer.frequency(with_capital);
        let alt = &s[i + 1..];
        let alt_score = scorer.score(alt);
        debug!(s, with_capital, camel_score, alt, alt_score, "case transition");

        // Ties keep the capital with its lowercase run.
        if camel_score >= alt_score {
            if i > 0 {
                vec![&s[..i], &s[i..]]
            } else {
                vec![s]
            }
        } else {
            vec![&s[..i + 1], alt]
        }
    }
}

/// Load the process-wide knowledge base from the default location
/// (`$IDSPLIT_DATA_DIR` or the platform data directory).
///
/// Splitting calls this on first use; calling it early only moves the cost
/// of loading.
pub fn init() -> Result<&'static KnowledgeBase> {
    KnowledgeBase::shared(&Config::default().data_paths()?)
}

/// Split with Ronin and the default configuration.
pub fn split(identifier: &str) -> Result<Vec<String>> {
    split_with(identifier, None, None)
}

/// Split with Samurai and otherwise default parameters.
pub fn samurai_split(identifier: &str) -> Result<Vec<String>> {
    split_with(identifier, Some(&SplitterConfig::samurai()), None)
}

/// Split with optional parameter overrides and an optional local frequency
/// table. The flavor comes from `config`.
pub fn split_with(
    identifier: &str,
    config: Option<&SplitterConfig>,
    local: Option<&FrequencyTable>,
) -> Result<Vec<String>> {
    if identifier.is_empty() {
        return Ok(Vec::new());
    }

    let kb = init()?;
    let mut splitter = Splitter::new(kb);
    if let Some(config) = config {
        splitter = splitter.with_config(config.clone());
    }
    if let Some(local) = local {
        splitter = splitter.with_local(local);
    }
    Ok(splitter.split(identifier))
}
