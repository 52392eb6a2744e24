use crate::config::{Config, Flavor};
use crate::engine::Splitter;
use crate::error::Result;
use crate::kb::{FrequencyTable, KnowledgeBase};
use crate::lexer;
use std::fmt;
use std::str::FromStr;

/// A boxed splitting function, shareable across threads.
pub type SplitFn<'a> = Box<dyn Fn(&str) -> Vec<String> + Send + Sync + 'a>;

/// Every splitter the crate exposes, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitterKind {
    Ronin,
    Samurai,
    Delimiter,
    Digit,
    PureCamelCase,
    SafeSimple,
    Simple,
    Elementary,
    Heuristic,
}

impl SplitterKind {
    pub const ALL: [SplitterKind; 9] = [
        SplitterKind::Ronin,
        SplitterKind::Samurai,
        SplitterKind::Delimiter,
        SplitterKind::Digit,
        SplitterKind::PureCamelCase,
        SplitterKind::SafeSimple,
        SplitterKind::Simple,
        SplitterKind::Elementary,
        SplitterKind::Heuristic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SplitterKind::Ronin => "ronin",
            SplitterKind::Samurai => "samurai",
            SplitterKind::Delimiter => "delimiter",
            SplitterKind::Digit => "digit",
            SplitterKind::PureCamelCase => "pure_camelcase",
            SplitterKind::SafeSimple => "safe_simple",
            SplitterKind::Simple => "simple",
            SplitterKind::Elementary => "elementary",
            SplitterKind::Heuristic => "heuristic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SplitterKind::Ronin => "frequency, dictionary and case heuristics (default)",
            SplitterKind::Samurai => "frequency-based splitting after Enslen et al. 2009",
            SplitterKind::Delimiter => "split at $ ~ _ . : / @",
            SplitterKind::Digit => "delimiters plus every letter/digit transition",
            SplitterKind::PureCamelCase => "delimiters plus camel case, acronym-aware",
            SplitterKind::SafeSimple => "camel case unless the case pattern is ambiguous",
            SplitterKind::Simple => "delimiters plus forward camel case",
            SplitterKind::Elementary => "camel case and digits, keeping special terms",
            SplitterKind::Heuristic => "elementary, carving special terms out of words",
        }
    }

    /// The lexical split function, or `None` for the frequency-guided ones.
    pub fn lexical(self) -> Option<fn(&str) -> Vec<String>> {
        let split: fn(&str) -> Vec<String> = match self {
            SplitterKind::Ronin | SplitterKind::Samurai => return None,
            SplitterKind::Delimiter => lexer::delimiter_split,
            SplitterKind::Digit => lexer::digit_split,
            SplitterKind::PureCamelCase => lexer::pure_camelcase_split,
            SplitterKind::SafeSimple => lexer::safe_simple_split,
            SplitterKind::Simple => lexer::simple_split,
            SplitterKind::Elementary => lexer::elementary_split,
            SplitterKind::Heuristic => lexer::heuristic_split,
        };
        Some(split)
    }

    pub fn flavor(self) -> Option<Flavor> {
        match self {
            SplitterKind::Ronin => Some(Flavor::Ronin),
            SplitterKind::Samurai => Some(Flavor::Samurai),
            _ => None,
        }
    }

    pub fn needs_knowledge_base(self) -> bool {
        self.lexical().is_none()
    }

    /// Build the split function. Frequency-guided splitters load the shared
    /// knowledge base from `config` and take their parameters from it.
    pub fn build<'a>(self, config: &Config, local: Option<&'a FrequencyTable>) -> Result<SplitFn<'a>> {
        if let Some(split) = self.lexical() {
            return Ok(Box::new(split));
        }

        let kb = KnowledgeBase::shared(&config.data_paths()?)?;
        let mut params = config.splitter.clone();
        if let Some(flavor) = self.flavor() {
            params.flavor = flavor;
        }

        let mut splitter = Splitter::new(kb).with_config(params);
        if let Some(local) = local {
            splitter = splitter.with_local(local);
        }
        Ok(Box::new(move |identifier: &str| splitter.split(identifier)))
    }
}

impl From<Flavor> for SplitterKind {
    fn from(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Ronin => SplitterKind::Ronin,
            Flavor::Samurai => SplitterKind::Samurai,
        }
    }
}

impl FromStr for SplitterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        let wanted = wanted.strip_suffix("_split").unwrap_or(&wanted);
        SplitterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("Unknown splitter: {} (see --list)", s))
    }
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in SplitterKind::ALL {
            assert_eq!(kind.name().parse::<SplitterKind>(), Ok(kind));
        }
        assert_eq!("safe-simple".parse::<SplitterKind>(), Ok(SplitterKind::SafeSimple));
        assert_eq!("heuristic_split".parse::<SplitterKind>(), Ok(SplitterKind::Heuristic));
        assert_eq!("RONIN".parse::<SplitterKind>(), Ok(SplitterKind::Ronin));
        assert!("banzai".parse::<SplitterKind>().is_err());
    }

    #[test]
    fn test_lexical_splitters_build_without_data() {
        let split = SplitterKind::Elementary
            .build(&Config::default(), None)
            .unwrap();
        assert_eq!(split("foo2Bar"), vec!["foo", "2", "Bar"]);
        assert!(!SplitterKind::Simple.needs_knowledge_base());
        assert!(SplitterKind::Samurai.needs_knowledge_base());
    }

    #[test]
    fn test_flavor_maps_to_engine_kind() {
        assert_eq!(SplitterKind::from(Flavor::Samurai), SplitterKind::Samurai);
        assert_eq!(SplitterKind::Ronin.flavor(), Some(Flavor::Ronin));
        assert_eq!(SplitterKind::Digit.flavor(), None);
    }
}
