use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Token occurrence counts mined from source code.
///
/// Keys are stored lowercased. The table is immutable once built; the total
/// and the smallest single-character count are computed up front because the
/// scorer needs them for every split.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
    min_single_char: Option<u64>,
}

impl FrequencyTable {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (token, count) in pairs {
            *counts.entry(token.as_ref().to_lowercase()).or_insert(0) += count;
        }

        let total = counts.values().sum();
        let min_single_char = counts
            .iter()
            .filter(|(token, _)| token.chars().count() == 1)
            .map(|(_, &count)| count)
            .min();

        Self {
            counts,
            total,
            min_single_char,
        }
    }

    /// Load a table from `token<TAB>count` rows (commas also accepted).
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open frequency table: {}", path.display()))?;

        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Self::parse(BufReader::new(reader))
            .with_context(|| format!("Failed to parse frequency table: {}", path.display()))
    }

    fn parse(reader: impl BufRead) -> Result<Self> {
        let mut pairs = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((token, count)) = line.split_once('\t').or_else(|| line.rsplit_once(','))
            else {
                bail!("line {}: expected 'token<TAB>count'", index + 1);
            };
            let count: u64 = count
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad count '{}'", index + 1, count.trim()))?;
            pairs.push((token.trim().to_string(), count));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Write the table as gzip-compressed TSV, sorted by token.
    pub fn write_to_path(&self, output_path: &Path) -> Result<()> {
        let file = File::create(output_path).with_context(|| {
            format!("Failed to create frequency table: {}", output_path.display())
        })?;

        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort();

        let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
        for (token, count) in entries {
            writeln!(writer, "{}\t{}", token, count)?;
        }
        writer
            .finish()
            .context("Failed to finalize frequency table")?
            .flush()?;

        Ok(())
    }

    /// Count for a token, 0 if absent. Case-insensitive.
    pub fn get(&self, token: &str) -> u64 {
        self.lookup(token).unwrap_or(0)
    }

    /// Count for a token, distinguishing "absent" from "zero".
    pub fn lookup(&self, token: &str) -> Option<u64> {
        match self.counts.get(token) {
            Some(&count) => Some(count),
            None => self.counts.get(&token.to_lowercase()).copied(),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn min_single_char(&self) -> Option<u64> {
        self.min_single_char
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
