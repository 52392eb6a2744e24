use anyhow::{Context, Result};
use fst::{Set, SetBuilder};
use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Set of lowercase natural-language words, stored as an FST.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("words", &self.set.len())
            .finish()
    }
}

impl Dictionary {
    /// Load dictionary from an FST file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;

        let reader = BufReader::new(file);
        let set = Set::new(reader.bytes().collect::<Result<Vec<_>, _>>()?)
            .context("Failed to parse dictionary")?;

        Ok(Self { set })
    }

    /// Build an in-memory dictionary from a word list
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = Set::from_iter(normalize(words)).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    /// Build dictionary file from word list
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in normalize(words) {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    /// Exact membership of an already-lowercased word
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// Membership of a word or its English stem, case-insensitive
    pub fn contains_word(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.contains(&lower) || self.contains(&STEMMER.stem(&lower))
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

fn normalize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    sorted.sort();
    sorted.dedup();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("test.dict");

        let words = vec!["hello".to_string(), "World".to_string(), "test".to_string()];

        Dictionary::build_from_words(&words, &dict_path).unwrap();

        let dict = Dictionary::load_from_path(&dict_path).unwrap();
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_stemmed_membership() {
        let dict = Dictionary::from_words(["connect", "number"]).unwrap();
        assert!(dict.contains_word("Connected"));
        assert!(dict.contains_word("connecting"));
        assert!(dict.contains_word("NUMBER"));
        assert!(!dict.contains_word("numbat"));
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("broken.dict");
        std::fs::write(&dict_path, b"not an fst").unwrap();

        assert!(Dictionary::load_from_path(&dict_path).is_err());
    }

    #[test]
    fn test_words_are_sorted_and_deduplicated() {
        let dict = Dictionary::from_words(["beta", "Alpha", "alpha"]).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("alpha"));
        assert!(dict.contains_word("ALPHA"));
    }
}
