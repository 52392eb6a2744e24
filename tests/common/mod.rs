#![allow(dead_code)]

use idsplit::kb::{DICTIONARY_FILE, FREQUENCIES_FILE};
use idsplit::{Dictionary, FrequencyTable, KnowledgeBase, SpecialTerms};
use std::path::Path;

pub const FREQUENCIES: &[(&str, u64)] = &[
    ("start", 90_000),
    ("data", 250_000),
    ("get", 800_000),
    ("module", 60_000),
    ("foo", 30_000),
    ("bar", 25_000),
    ("abc", 4_000),
    ("gps", 2_000),
    ("max", 70_000),
    ("set", 500_000),
    ("value", 400_000),
    ("is", 900_000),
    ("number", 120_000),
    ("threshold", 8_000),
    ("some", 40_000),
    ("var", 150_000),
    ("usage", 15_000),
    ("type", 300_000),
    ("decimal", 6_000),
    ("negative", 9_000),
    ("nonnegative", 500),
    ("non", 3_000),
];

pub const WORDS: &[&str] = &[
    "start",
    "data",
    "module",
    "bar",
    "number",
    "threshold",
    "some",
    "usage",
    "type",
    "decimal",
    "negative",
    "nonnegative",
    "value",
    "set",
    "get",
    "max",
];

pub fn frequencies() -> FrequencyTable {
    FrequencyTable::from_pairs(FREQUENCIES.iter().copied())
}

pub fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(
        frequencies(),
        Dictionary::from_words(WORDS.iter().copied()).unwrap(),
        SpecialTerms::builtin().clone(),
    )
}

/// Write the fixture in the on-disk layout expected under a data directory.
pub fn write_data_dir(dir: &Path) {
    frequencies()
        .write_to_path(&dir.join(FREQUENCIES_FILE))
        .unwrap();
    let words: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();
    Dictionary::build_from_words(&words, &dir.join(DICTIONARY_FILE)).unwrap();
}
