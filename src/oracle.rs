//! Labeled identifier sets and accuracy measurement.
//!
//! An oracle file has one `identifier<TAB>tok,tok,...` row per identifier.
//! Naming a file as `path:lower` asks for results to be lowercased before
//! they are compared, for oracles that record expected tokens in lowercase.

use crate::error::{Result, SplitError};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

const LOWERCASE_SUFFIX: &str = ":lower";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleCase {
    pub identifier: String,
    pub expected: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OracleSet {
    pub name: String,
    pub lowercase: bool,
    pub cases: Vec<OracleCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub identifier: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub name: String,
    pub total: usize,
    pub failures: Vec<Failure>,
}

impl Evaluation {
    pub fn passed(&self) -> usize {
        self.total - self.failures.len()
    }

    /// Fraction of cases split exactly as expected; an empty set scores 1.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.passed() as f64 / self.total as f64
    }
}

impl OracleSet {
    pub fn parse(name: impl Into<String>, text: &str, lowercase: bool) -> Result<Self> {
        let mut cases = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let malformed = |reason: &str| SplitError::MalformedOracle {
                line: index + 1,
                reason: reason.to_string(),
            };

            let (identifier, expected) = line
                .split_once('\t')
                .ok_or_else(|| malformed("expected 'identifier<TAB>tokens'"))?;
            let identifier = identifier.trim();
            if identifier.is_empty() {
                return Err(malformed("empty identifier"));
            }
            let expected: Vec<String> = expected
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if expected.is_empty() {
                return Err(malformed("no expected tokens"));
            }

            cases.push(OracleCase {
                identifier: identifier.to_string(),
                expected,
            });
        }

        Ok(Self {
            name: name.into(),
            lowercase,
            cases,
        })
    }

    /// Read `path` or `path:lower`.
    pub fn load(source: &str) -> Result<Self> {
        let (path, lowercase) = match source.strip_suffix(LOWERCASE_SUFFIX) {
            Some(path) => (path, true),
            None => (source, false),
        };
        let path = Path::new(path);
        let text = fs::read_to_string(path).map_err(|e| SplitError::oracle(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &text, lowercase)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run `split` over every case in parallel. Failures keep file order.
    pub fn evaluate<F>(&self, split: F) -> Evaluation
    where
        F: Fn(&str) -> Vec<String> + Sync,
    {
        let failures: Vec<Failure> = self
            .cases
            .par_iter()
            .filter_map(|case| {
                let mut actual = split(&case.identifier);
                if self.lowercase {
                    actual.iter_mut().for_each(|t| *t = t.to_lowercase());
                }
                (actual != case.expected).then(|| Failure {
                    identifier: case.identifier.clone(),
                    expected: case.expected.clone(),
                    actual,
                })
            })
            .collect();

        Evaluation {
            name: self.name.clone(),
            total: self.cases.len(),
            failures,
        }
    }
}
