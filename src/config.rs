use crate::error::{Result as SplitResult, SplitError};
use crate::kb::DataPaths;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the knowledge-base directory.
pub const DATA_DIR_ENV: &str = "IDSPLIT_DATA_DIR";

const LOCAL_CONFIG_FILE: &str = ".idsplit.toml";

/// Which frequency-guided algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Samurai plus dictionary and single-letter heuristics.
    #[default]
    Ronin,
    Samurai,
}

/// Tunable parameters of the scorer and the refinement engine.
///
/// Every field has a default, so a TOML `[splitter]` table only needs the
/// values it changes. The engine reads this and never writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub flavor: Flavor,

    /// Floor for the split threshold.
    pub low_freq_cutoff: f64,

    /// A piece at least this frequent is accepted whole.
    pub high_freq_cutoff: f64,

    /// Counts at or below this are treated as noise (Ronin).
    pub ignored_freq_threshold: u64,

    /// One-character tokens score this fraction of the rarest single
    /// character in the global table (Ronin).
    pub single_letter_factor: f64,

    /// One-character score when the table has no single characters.
    pub single_letter_fallback: f64,

    /// Letters exempt from the single-letter rule.
    pub single_letter_words: Vec<String>,

    /// Added to the count of a dictionary word (Ronin).
    pub dictionary_bonus: f64,

    pub min_dictionary_word_length: usize,

    /// Pieces shorter than this many characters are never split.
    pub length_cutoff: usize,

    /// Weight on keeping a capital with the lowercase run after it.
    pub camel_bias: f64,

    /// Refuse boundaries that leave a bare prefix or suffix.
    pub affix_guard: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::Ronin,
            low_freq_cutoff: 0.0,
            high_freq_cutoff: 500_000.0,
            ignored_freq_threshold: 10,
            single_letter_factor: 0.02,
            single_letter_fallback: 50.0,
            single_letter_words: Vec::new(),
            dictionary_bonus: 10.0,
            min_dictionary_word_length: 3,
            length_cutoff: 2,
            camel_bias: 1.0,
            affix_guard: true,
        }
    }
}

impl SplitterConfig {
    pub fn samurai() -> Self {
        Self {
            flavor: Flavor::Samurai,
            ..Default::default()
        }
    }
}

/// The `[splitter]` keys one config file sets. Only keys present in the
/// file override earlier layers, so a file can restore a default value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SplitterOverrides {
    flavor: Option<Flavor>,
    low_freq_cutoff: Option<f64>,
    high_freq_cutoff: Option<f64>,
    ignored_freq_threshold: Option<u64>,
    single_letter_factor: Option<f64>,
    single_letter_fallback: Option<f64>,
    single_letter_words: Option<Vec<String>>,
    dictionary_bonus: Option<f64>,
    min_dictionary_word_length: Option<usize>,
    length_cutoff: Option<usize>,
    camel_bias: Option<f64>,
    affix_guard: Option<bool>,
}

impl SplitterOverrides {
    fn apply(self, config: &mut SplitterConfig) {
        if let Some(flavor) = self.flavor {
            config.flavor = flavor;
        }
        if let Some(cutoff) = self.low_freq_cutoff {
            config.low_freq_cutoff = cutoff;
        }
        if let Some(cutoff) = self.high_freq_cutoff {
            config.high_freq_cutoff = cutoff;
        }
        if let Some(threshold) = self.ignored_freq_threshold {
            config.ignored_freq_threshold = threshold;
        }
        if let Some(factor) = self.single_letter_factor {
            config.single_letter_factor = factor;
        }
        if let Some(fallback) = self.single_letter_fallback {
            config.single_letter_fallback = fallback;
        }
        if let Some(words) = self.single_letter_words {
            config.single_letter_words = words;
        }
        if let Some(bonus) = self.dictionary_bonus {
            config.dictionary_bonus = bonus;
        }
        if let Some(length) = self.min_dictionary_word_length {
            config.min_dictionary_word_length = length;
        }
        if let Some(cutoff) = self.length_cutoff {
            config.length_cutoff = cutoff;
        }
        if let Some(bias) = self.camel_bias {
            config.camel_bias = bias;
        }
        if let Some(guard) = self.affix_guard {
            config.affix_guard = guard;
        }
    }
}

/// One configuration file as written on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    data: DataConfig,
    splitter: SplitterOverrides,
}

/// Knowledge-base file locations. Individual files override `dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: Option<PathBuf>,
    pub frequencies: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub special_terms: Option<PathBuf>,
}

impl DataConfig {
    fn merge(mut self, other: Self) -> Self {
        if other.dir.is_some() {
            self.dir = other.dir;
        }
        if other.frequencies.is_some() {
            self.frequencies = other.frequencies;
        }
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.special_terms.is_some() {
            self.special_terms = other.special_terms;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub splitter: SplitterConfig,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if data_dir.is_some() {
            config.data.dir = data_dir;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, layer: ConfigFile) -> Self {
        self.data = self.data.merge(layer.data);
        layer.splitter.apply(&mut self.splitter);
        self
    }

    /// Resolve the knowledge-base files: explicit file paths first, then the
    /// configured directory, then `$IDSPLIT_DATA_DIR`, then the platform data
    /// directory.
    pub fn data_paths(&self) -> SplitResult<DataPaths> {
        let dir = self
            .data
            .dir
            .clone()
            .or_else(Self::data_dir)
            .ok_or_else(|| {
                SplitError::data(PathBuf::new(), "no data directory could be determined")
            })?;

        let mut paths = DataPaths::in_dir(&dir);
        if let Some(frequencies) = &self.data.frequencies {
            paths.frequencies = frequencies.clone();
        }
        if let Some(dictionary) = &self.data.dictionary {
            paths.dictionary = dictionary.clone();
        }
        if let Some(special_terms) = &self.data.special_terms {
            paths.special_terms = Some(special_terms.clone());
        }
        Ok(paths)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "idsplit").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("", "", "idsplit").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::FREQUENCIES_FILE;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.splitter.flavor, Flavor::Ronin);
        assert_eq!(config.splitter.length_cutoff, 2);
        assert!(config.splitter.affix_guard);
        assert!(config.data.dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[splitter]\nflavor = \"samurai\"\nhigh_freq_cutoff = 1000.0\n\n[data]\ndir = \"/srv/idsplit\"\n",
        )
        .unwrap();

        let config = Config::default().merge(Config::from_file(&path).unwrap());
        assert_eq!(config.splitter.flavor, Flavor::Samurai);
        assert_eq!(config.splitter.high_freq_cutoff, 1000.0);
        assert_eq!(config.splitter.dictionary_bonus, 10.0);
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/idsplit")));
    }

    fn layer(text: &str) -> ConfigFile {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_merge_configs() {
        let merged = Config::default()
            .merge(layer("[splitter]\ncamel_bias = 2.0\n"))
            .merge(layer(
                "[splitter]\nlow_freq_cutoff = 5.0\n\n[data]\ndictionary = \"words.fst\"\n",
            ));

        assert_eq!(merged.splitter.camel_bias, 2.0);
        assert_eq!(merged.splitter.low_freq_cutoff, 5.0);
        assert_eq!(merged.data.dictionary, Some(PathBuf::from("words.fst")));
    }

    #[test]
    fn test_later_layer_can_restore_defaults() {
        let global = layer("[splitter]\nflavor = \"samurai\"\naffix_guard = false\ncamel_bias = 3.0\n");
        let local = layer("[splitter]\nflavor = \"ronin\"\naffix_guard = true\n");

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.splitter.flavor, Flavor::Ronin);
        assert!(merged.splitter.affix_guard);
        assert_eq!(merged.splitter.camel_bias, 3.0);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[splitter]\nlength_cutoff = \"two\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_data_paths_prefer_explicit_files() {
        let config = Config {
            data: DataConfig {
                dir: Some(PathBuf::from("/data")),
                dictionary: Some(PathBuf::from("/other/words.fst")),
                ..Default::default()
            },
            ..Default::default()
        };

        let paths = config.data_paths().unwrap();
        assert_eq!(paths.frequencies, Path::new("/data").join(FREQUENCIES_FILE));
        assert_eq!(paths.dictionary, PathBuf::from("/other/words.fst"));
    }
}
