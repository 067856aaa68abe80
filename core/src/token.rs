//! Per-token conditional score rows built from a probability table.
//!
//! [`build_tokens`] is the adapter between the raw tables and the scorer: it
//! creates one [`Token`] per distinct root or IG string and fills in its score
//! given every context the table knows about.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::ProbabilityTable;

/// How the values of a [`ProbabilityTable`] are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableMode {
    /// Raw co-occurrence counts: scores become `-ln(count / row total)`.
    Counts,
    /// Final scores already computed by the estimator, used verbatim.
    #[default]
    Probabilities,
}

/// Scores of one root or IG string, keyed by the preceding context.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    token: String,
    scores: AHashMap<String, f64>,
}

impl Token {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
            scores: AHashMap::new(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Score of this token given `context`; 0.0 for an unseen context.
    pub fn score_given(&self, context: &str) -> f64 {
        self.scores.get(context).copied().unwrap_or(0.0)
    }

    pub fn set_score<S: Into<String>>(&mut self, context: S, score: f64) {
        self.scores.insert(context.into(), score);
    }

    /// Number of contexts with a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Tokens keyed by their string.
pub type TokenTable = AHashMap<String, Token>;

/// Build one [`Token`] per distinct entry of `tokens`.
///
/// For every context row of `table` that has an entry for the token, the
/// token's score given that context is set according to `mode`. Rows whose
/// total is not positive are skipped in [`TableMode::Counts`].
pub fn build_tokens<S: AsRef<str>>(tokens: &[S], table: &ProbabilityTable, mode: TableMode) -> TokenTable {
    let totals: AHashMap<&str, f64> = match mode {
        TableMode::Counts => table
            .rows()
            .map(|(context, row)| (context, row.values().sum::<f64>()))
            .collect(),
        TableMode::Probabilities => AHashMap::new(),
    };

    let mut out = TokenTable::new();
    for name in tokens {
        let name = name.as_ref();
        if out.contains_key(name) {
            continue;
        }
        let mut token = Token::new(name);
        for (context, row) in table.rows() {
            let Some(&value) = row.get(name) else {
                continue;
            };
            match mode {
                TableMode::Counts => {
                    let total = totals.get(context).copied().unwrap_or(0.0);
                    if total > 0.0 {
                        token.set_score(context, -(value / total).ln());
                    }
                }
                TableMode::Probabilities => token.set_score(context, value),
            }
        }
        out.insert(name.to_string(), token);
    }

    debug!(tokens = out.len(), ?mode, "built token table");
    out
}
