//! Split program identifiers such as `getUtf8Octets` into words.
//!
//! The lexical splitters in [`lexer`] need no data. [`split`] and
//! [`samurai_split`] score candidate partitions against a frequency table
//! and dictionary loaded once per process.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod kb;
pub mod lexer;
pub mod oracle;
pub mod splitters;

pub use config::{Config, Flavor, SplitterConfig};
pub use engine::{init, samurai_split, split, split_with, Scorer, Splitter};
pub use error::{Result, SplitError};
pub use kb::{DataPaths, Dictionary, Directive, FrequencyTable, KnowledgeBase, SpecialTerms};
pub use lexer::{
    delimiter_split, digit_split, elementary_split, heuristic_split, pure_camelcase_split,
    safe_simple_split, segment, simple_split, Mode, Segment,
};
pub use oracle::{Evaluation, OracleSet};
pub use splitters::SplitterKind;
