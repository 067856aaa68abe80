// core/src/config.rs
//
// Pipeline configuration, stored as TOML. Every field has a default, so a
// partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;
use crate::table::BIGRAM_ORDER;
use crate::token::TableMode;
use crate::SENTENCE_MARKER;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory of tagged corpus files read by `prepare`.
    pub corpus_dir: String,
    /// Directory receiving roots.txt, igs.txt, stats.txt and the ARPA models.
    pub lm_corpus_dir: String,

    /// External estimator binary and any arguments placed before the
    /// standard ones.
    pub estimator_command: String,
    pub estimator_args: Vec<String>,
    /// n-gram order passed to the estimator; only 2 is accepted.
    pub order: usize,

    /// How the loaded tables are read by the scorer.
    pub table_mode: TableMode,

    /// IG value that ends a sentence in the corpus.
    pub sentence_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_dir: "small_tagged_corpus".to_string(),
            lm_corpus_dir: "lm_corpus".to_string(),
            estimator_command: "ngram-count".to_string(),
            estimator_args: Vec::new(),
            order: BIGRAM_ORDER,
            table_mode: TableMode::Probabilities,
            sentence_marker: SENTENCE_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn partial_files_keep_defaults() {
        let cfg = Config::from_toml_str("table_mode = \"counts\"\ncorpus_dir = \"corpus\"\n").expect("toml");
        assert_eq!(cfg.table_mode, TableMode::Counts);
        assert_eq!(cfg.corpus_dir, "corpus");
        assert_eq!(cfg.lm_corpus_dir, "lm_corpus");
        assert_eq!(cfg.order, 2);
        assert_eq!(cfg.sentence_marker, "sent");
    }

    #[test]
    fn round_trips_through_a_file() {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("morphdisamb_config_{}.toml", ts));

        let cfg = Config {
            estimator_command: "sh".to_string(),
            estimator_args: vec!["fake-ngram-count.sh".to_string()],
            ..Config::default()
        };
        cfg.save_toml(&path).expect("save");
        let loaded = Config::load_toml(&path).expect("load");
        assert_eq!(loaded, cfg);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(Config::from_toml_str("order = \"two\"").is_err());
    }
}
