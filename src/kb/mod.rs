//! Read-only statistical knowledge used to score candidate tokens.
//!
//! A [`KnowledgeBase`] bundles the global frequency table, the dictionary and
//! the special-term table. It is loaded once per process through
//! [`KnowledgeBase::shared`] and then only ever read, so one instance can be
//! used from any number of threads.

pub mod dictionary;
pub mod frequencies;
pub mod special;

use crate::error::{Result, SplitError};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::info;

pub use dictionary::Dictionary;
pub use frequencies::FrequencyTable;
pub use special::{Directive, SpecialTerms};

pub const FREQUENCIES_FILE: &str = "frequencies.tsv.gz";
pub const DICTIONARY_FILE: &str = "dictionary.fst";
pub const SPECIAL_TERMS_FILE: &str = "special_terms.toml";

static SHARED: OnceCell<KnowledgeBase> = OnceCell::new();

/// Where the knowledge-base files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub frequencies: PathBuf,
    pub dictionary: PathBuf,
    /// Loaded when present; the built-in terms are used otherwise.
    pub special_terms: Option<PathBuf>,
}

impl DataPaths {
    /// Standard file names inside a data directory.
    pub fn in_dir(dir: &Path) -> Self {
        let special = dir.join(SPECIAL_TERMS_FILE);
        Self {
            frequencies: dir.join(FREQUENCIES_FILE),
            dictionary: dir.join(DICTIONARY_FILE),
            special_terms: special.exists().then_some(special),
        }
    }
}

#[derive(Debug)]
pub struct KnowledgeBase {
    frequencies: FrequencyTable,
    dictionary: Dictionary,
    special_terms: SpecialTerms,
}

impl KnowledgeBase {
    pub fn new(
        frequencies: FrequencyTable,
        dictionary: Dictionary,
        special_terms: SpecialTerms,
    ) -> Self {
        Self {
            frequencies,
            dictionary,
            special_terms,
        }
    }

    /// Read every backing file. Any missing or corrupt file is fatal.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let frequencies = FrequencyTable::load_from_path(&paths.frequencies)
            .map_err(|e| SplitError::data(&paths.frequencies, format!("{:#}", e)))?;
        if frequencies.is_empty() {
            return Err(SplitError::data(&paths.frequencies, "frequency table is empty"));
        }

        let dictionary = Dictionary::load_from_path(&paths.dictionary)
            .map_err(|e| SplitError::data(&paths.dictionary, format!("{:#}", e)))?;

        let special_terms = match &paths.special_terms {
            Some(path) => SpecialTerms::load_from_path(path).map_err(|e| match e {
                SplitError::DataUnavailable { .. } => e,
                other => SplitError::data(path, other),
            })?,
            None => SpecialTerms::builtin().clone(),
        };

        info!(
            frequencies = frequencies.len(),
            words = dictionary.len(),
            special_terms = special_terms.len(),
            source = %paths.frequencies.display(),
            "loaded knowledge base"
        );

        Ok(Self::new(frequencies, dictionary, special_terms))
    }

    /// Load into `cell` unless it already holds a knowledge base.
    ///
    /// Concurrent first callers block until exactly one load finishes. A
    /// failed load leaves the cell empty, so every caller sees the error
    /// until the data is fixed.
    pub fn load_once<'c>(cell: &'c OnceCell<KnowledgeBase>, paths: &DataPaths) -> Result<&'c Self> {
        cell.get_or_try_init(|| Self::load(paths))
    }

    /// The process-wide instance. Paths are only consulted by the call that
    /// performs the load.
    pub fn shared(paths: &DataPaths) -> Result<&'static Self> {
        Self::load_once(&SHARED, paths)
    }

    /// Global count for a token (0 if absent).
    pub fn frequency(&self, token: &str) -> u64 {
        self.frequencies.get(token)
    }

    pub fn in_dictionary(&self, token: &str) -> bool {
        self.dictionary.contains_word(token)
    }

    pub fn special_case(&self, token: &str) -> Option<&Directive> {
        self.special_terms.get(token)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn special_terms(&self) -> &SpecialTerms {
        &self.special_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn write_data(dir: &Path) {
        FrequencyTable::from_pairs([("get", 500u64), ("value", 200)])
            .write_to_path(&dir.join(FREQUENCIES_FILE))
            .unwrap();
        Dictionary::build_from_words(&["value".to_string()], &dir.join(DICTIONARY_FILE)).unwrap();
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        write_data(dir.path());

        let kb = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap();
        assert_eq!(kb.frequency("GET"), 500);
        assert!(kb.in_dictionary("values"));
        assert!(kb.special_case("utf8").is_some());
    }

    #[test]
    fn test_missing_data_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap_err();
        match err {
            SplitError::DataUnavailable { path, .. } => {
                assert!(path.ends_with(FREQUENCIES_FILE));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_dictionary_is_unavailable() {
        let dir = tempdir().unwrap();
        write_data(dir.path());
        std::fs::write(dir.path().join(DICTIONARY_FILE), b"garbage").unwrap();

        let err = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, SplitError::DataUnavailable { .. }));
    }

    #[test]
    fn test_special_terms_file_is_picked_up() {
        let dir = tempdir().unwrap();
        write_data(dir.path());
        std::fs::write(dir.path().join(SPECIAL_TERMS_FILE), "atomic = [\"gpu2\"]\n").unwrap();

        let kb = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap();
        assert_eq!(kb.special_case("GPU2"), Some(&Directive::Atomic));
    }

    #[test]
    fn test_bad_special_terms_file_is_unavailable() {
        let dir = tempdir().unwrap();
        write_data(dir.path());
        let special = dir.path().join(SPECIAL_TERMS_FILE);
        std::fs::write(&special, "[split]\n\"todolist\" = [\"to\", \"list\"]\n").unwrap();

        let err = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap_err();
        match err {
            SplitError::DataUnavailable { path, reason } => {
                assert_eq!(path, special);
                assert!(reason.contains("todolist"));
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::write(&special, "atomic = 3\n").unwrap();
        let err = KnowledgeBase::load(&DataPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, SplitError::DataUnavailable { .. }));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        let cell = OnceCell::new();

        assert!(KnowledgeBase::load_once(&cell, &paths).is_err());
        write_data(dir.path());
        assert!(KnowledgeBase::load_once(&cell, &paths).is_ok());
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let dir = tempdir().unwrap();
        write_data(dir.path());
        let paths = Arc::new(DataPaths::in_dir(dir.path()));
        let cell: Arc<OnceCell<KnowledgeBase>> = Arc::new(OnceCell::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let paths = Arc::clone(&paths);
                thread::spawn(move || {
                    let kb = KnowledgeBase::load_once(&cell, &paths).unwrap();
                    kb as *const KnowledgeBase as usize
                })
            })
            .collect();

        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
