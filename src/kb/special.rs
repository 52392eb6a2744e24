use crate::error::{Result, SplitError};
use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Terms that contain digits or odd capitalization and must never be broken
/// apart, regardless of what the frequency table says about their pieces.
const BUILTIN_ATOMIC: &[&str] = &[
    "utf8", "utf16", "utf32", "ipv4", "ipv6", "j2se", "j2ee", "j2me", "md5", "sha1", "sha224",
    "sha256", "sha384", "sha512", "base64", "base32", "win32", "win64", "x86", "x64", "i18n",
    "l10n", "a11y", "k8s", "oauth2", "http2", "mp3", "mp4", "h264", "h265", "p2p", "b2b", "e2e",
    "3des", "aes128", "aes256", "crc32", "int8", "int16", "int32", "int64", "uint8", "uint16",
    "uint32", "uint64", "float32", "float64", "utf8mb4", "latin1", "html5", "css3", "es6",
];

lazy_static! {
    static ref BUILTIN: SpecialTerms =
        SpecialTerms::from_entries(BUILTIN_ATOMIC.iter().map(|t| (t.to_string(), Directive::Atomic)))
            .expect("built-in special terms are valid");
}

/// What the special-term table says about a character sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Never split the term.
    Atomic,
    /// Always split the term into pieces of these character lengths.
    Split(Vec<usize>),
}

impl Directive {
    /// Cut `text` at the forced boundaries. Returns `None` when the text is
    /// not as long as the directive expects.
    pub fn apply<'a>(&self, text: &'a str) -> Option<Vec<&'a str>> {
        match self {
            Directive::Atomic => Some(vec![text]),
            Directive::Split(lengths) => {
                let mut pieces = Vec::with_capacity(lengths.len());
                let mut rest = text;
                for &len in lengths {
                    let cut = rest
                        .char_indices()
                        .nth(len)
                        .map(|(i, _)| i)
                        .unwrap_or(rest.len());
                    let (piece, tail) = rest.split_at(cut);
                    if piece.chars().count() != len {
                        return None;
                    }
                    pieces.push(piece);
                    rest = tail;
                }
                rest.is_empty().then_some(pieces)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SpecialTermsFile {
    #[serde(default)]
    atomic: Vec<String>,
    #[serde(default)]
    split: BTreeMap<String, Vec<String>>,
}

/// Lowercased term -> directive, plus a matcher for atomic terms embedded in
/// longer strings.
#[derive(Debug, Clone)]
pub struct SpecialTerms {
    entries: HashMap<String, Directive>,
    matcher: AhoCorasick,
}

impl SpecialTerms {
    /// The terms every knowledge base knows about.
    pub fn builtin() -> &'static SpecialTerms {
        &BUILTIN
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Directive)>) -> Result<Self> {
        let mut map = HashMap::new();
        for (term, directive) in entries {
            let term = term.to_lowercase();
            if term.is_empty() {
                return Err(SplitError::InvalidSpecialTerm {
                    term,
                    reason: "empty term".to_string(),
                });
            }
            if let Directive::Split(lengths) = &directive {
                let expected: usize = lengths.iter().sum();
                if lengths.len() < 2 || lengths.contains(&0) || expected != term.chars().count() {
                    return Err(SplitError::InvalidSpecialTerm {
                        term,
                        reason: "split pieces must be non-empty and cover the term".to_string(),
                    });
                }
            }
            map.insert(term, directive);
        }
        Self::with_map(map)
    }

    fn with_map(entries: HashMap<String, Directive>) -> Result<Self> {
        // Sorted so the automaton is identical across runs.
        let mut atomic: Vec<&str> = entries
            .iter()
            .filter(|(_, d)| **d == Directive::Atomic)
            .map(|(t, _)| t.as_str())
            .collect();
        atomic.sort_unstable();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&atomic)
            .map_err(|e| SplitError::InvalidSpecialTerm {
                term: atomic.join(","),
                reason: e.to_string(),
            })?;

        Ok(Self { entries, matcher })
    }

    /// Built-in terms extended by a TOML file of the form
    ///
    /// ```toml
    /// atomic = ["gpu2"]
    ///
    /// [split]
    /// "todolist" = ["todo", "list"]
    /// ```
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| SplitError::data(path, e))?;
        let file: SpecialTermsFile =
            toml::from_str(&contents).map_err(|e| SplitError::data(path, e))?;

        let mut entries: Vec<(String, Directive)> = Self::builtin().entries().collect();
        entries.extend(file.atomic.into_iter().map(|t| (t, Directive::Atomic)));
        for (term, pieces) in file.split {
            if pieces.concat().to_lowercase() != term.to_lowercase() {
                return Err(SplitError::InvalidSpecialTerm {
                    term,
                    reason: format!("pieces {:?} do not spell the term", pieces),
                });
            }
            let lengths = pieces.iter().map(|p| p.chars().count()).collect();
            entries.push((term, Directive::Split(lengths)));
        }
        Self::from_entries(entries)
    }

    /// Directive for a token, looked up case-insensitively.
    pub fn get(&self, token: &str) -> Option<&Directive> {
        self.entries.get(&token.to_lowercase())
    }

    /// Every term with its directive, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (String, Directive)> + '_ {
        self.entries.iter().map(|(t, d)| (t.clone(), d.clone()))
    }

    pub fn is_atomic(&self, token: &str) -> bool {
        matches!(self.get(token), Some(Directive::Atomic))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte ranges of atomic terms embedded in `text` that sit on a word
    /// boundary: at the start, after a non-letter, or at a lower-to-upper
    /// transition. A match followed by another digit is rejected (`utf88`).
    pub fn find_embedded(&self, text: &str) -> Vec<(usize, usize)> {
        self.matcher
            .find_iter(text)
            .filter(|m| starts_word(text, m.start()) && !continues_number(text, m.end()))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

fn starts_word(text: &str, start: usize) -> bool {
    let Some(prev) = text[..start].chars().next_back() else {
        return true;
    };
    let first = text[start..].chars().next();
    !prev.is_alphabetic() || (prev.is_lowercase() && first.is_some_and(|c| c.is_uppercase()))
}

fn continues_number(text: &str, end: usize) -> bool {
    let last_is_digit = text[..end]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    last_is_digit && text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
}
