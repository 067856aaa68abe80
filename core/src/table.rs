// core/src/table.rs
//
// Sparse conditional table (context -> target -> value) shared by the root and
// IG models, plus the reader for the bigram section of an ARPA file written by
// the external estimator.

use ahash::AHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::errors::{DisambError, Result};

/// The only n-gram order the model understands.
pub const BIGRAM_ORDER: usize = 2;

/// Two-level sparse matrix of counts or probabilities.
///
/// Rows are keyed by the context (the earlier token), columns by the target.
/// Lookups of absent pairs read as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityTable {
    rows: AHashMap<String, AHashMap<String, f64>>,
}

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `target` given `context`, replacing any previous one.
    pub fn insert<C, T>(&mut self, context: C, target: T, value: f64)
    where
        C: Into<String>,
        T: Into<String>,
    {
        self.rows
            .entry(context.into())
            .or_default()
            .insert(target.into(), value);
    }

    /// Value for `target` given `context`, 0.0 when absent.
    pub fn get(&self, context: &str, target: &str) -> f64 {
        self.get_opt(context, target).unwrap_or(0.0)
    }

    pub fn get_opt(&self, context: &str, target: &str) -> Option<f64> {
        self.rows.get(context)?.get(target).copied()
    }

    pub fn row(&self, context: &str) -> Option<&AHashMap<String, f64>> {
        self.rows.get(context)
    }

    /// Sum of all values in a context's row.
    pub fn row_sum(&self, context: &str) -> f64 {
        self.row(context)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Every target of every row; a target shared by several rows repeats.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rows.values().flat_map(|row| row.keys().map(String::as_str))
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &AHashMap<String, f64>)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of contexts.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of (context, target) entries.
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }
}

impl<C, T> FromIterator<(C, T, f64)> for ProbabilityTable
where
    C: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, T, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (context, target, value) in iter {
            table.insert(context, target, value);
        }
        table
    }
}

/// Read the bigram section of an ARPA language model.
///
/// The section starts after the line containing `\2-grams:` and ends at the
/// first blank line (or end of input). Each entry is
/// `prob context target [backoff]`; the backoff column is ignored.
pub fn parse_arpa<R: BufRead>(reader: R) -> Result<ProbabilityTable> {
    let header = format!("\\{}-grams:", BIGRAM_ORDER);
    let mut table = ProbabilityTable::new();
    let mut in_section = false;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if !in_section {
            in_section = line.contains(&header);
            continue;
        }
        if line.trim().is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(DisambError::estimator(format!(
                "line {}: expected `prob context target`, got {:?}",
                lineno + 1,
                line
            )));
        }
        let prob: f64 = parts[0].parse().map_err(|e| {
            DisambError::estimator(format!("line {}: bad probability {:?}: {}", lineno + 1, parts[0], e))
        })?;
        table.insert(parts[1], parts[2], prob);
    }

    debug!(contexts = table.len(), entries = table.entry_count(), "parsed ARPA bigram section");
    Ok(table)
}

/// Load the bigram section of an ARPA file.
pub fn load_arpa<P: AsRef<Path>>(path: P) -> Result<ProbabilityTable> {
    let file = File::open(path)?;
    parse_arpa(BufReader::new(file))
}
