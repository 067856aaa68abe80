// core/src/model.rs
//
// Bigram transition scorer over root tokens and IG tokens.
//
// score(from, to) = root(to | from.root) + 1.0 + sum over to's IG slots of
//                   ig(slot | from.last_ig)
//
// The scorer is directional; callers decide which tag is "from".

use tracing::debug;

use crate::table::ProbabilityTable;
use crate::tag::Tag;
use crate::token::{build_tokens, TableMode, TokenTable};

/// Starting value of the IG component of every transition score.
pub const IG_SCORE_FLOOR: f64 = 1.0;

/// Anything that can score a transition between two adjacent tags.
pub trait TransitionScorer {
    fn score(&self, from: &Tag, to: &Tag) -> f64;
}

impl<F> TransitionScorer for F
where
    F: Fn(&Tag, &Tag) -> f64,
{
    fn score(&self, from: &Tag, to: &Tag) -> f64 {
        self(from, to)
    }
}

/// Baseline bigram model combining a root table and an IG table.
#[derive(Debug, Clone, Default)]
pub struct BigramModel {
    root_tokens: TokenTable,
    ig_tokens: TokenTable,
}

impl BigramModel {
    /// Build the model from token lists and their tables.
    ///
    /// `root_list` and `ig_list` may contain duplicates; only distinct strings
    /// get a token. Both tables are read according to `mode`.
    pub fn new<R, I>(
        root_list: &[R],
        root_table: &ProbabilityTable,
        ig_list: &[I],
        ig_table: &ProbabilityTable,
        mode: TableMode,
    ) -> Self
    where
        R: AsRef<str>,
        I: AsRef<str>,
    {
        let root_tokens = build_tokens(root_list, root_table, mode);
        let ig_tokens = build_tokens(ig_list, ig_table, mode);
        debug!(
            roots = root_tokens.len(),
            igs = ig_tokens.len(),
            ?mode,
            "built bigram model"
        );
        Self::from_token_tables(root_tokens, ig_tokens)
    }

    pub fn from_token_tables(root_tokens: TokenTable, ig_tokens: TokenTable) -> Self {
        Self {
            root_tokens,
            ig_tokens,
        }
    }

    pub fn root_tokens(&self) -> &TokenTable {
        &self.root_tokens
    }

    pub fn ig_tokens(&self) -> &TokenTable {
        &self.ig_tokens
    }

    /// Root part of the transition score.
    pub fn root_score(&self, from: &Tag, to: &Tag) -> f64 {
        self.root_tokens
            .get(to.root())
            .map_or(0.0, |token| token.score_given(from.root()))
    }

    /// IG part of the transition score, starting at [`IG_SCORE_FLOOR`].
    pub fn ig_score(&self, from: &Tag, to: &Tag) -> f64 {
        let context = from.last_ig_key();
        let mut score = IG_SCORE_FLOOR;
        for key in to.ig_keys() {
            if let Some(token) = self.ig_tokens.get(&key) {
                score += token.score_given(&context);
            }
        }
        score
    }

    /// Score of `to` following `from`.
    pub fn bigram_score(&self, from: &Tag, to: &Tag) -> f64 {
        self.root_score(from, to) + self.ig_score(from, to)
    }

    /// Sum of transition scores along a fixed analysis of a sentence.
    pub fn log_prob(&self, sequence: &[Tag]) -> f64 {
        sequence
            .windows(2)
            .map(|pair| self.bigram_score(&pair[0], &pair[1]))
            .sum()
    }
}

impl TransitionScorer for BigramModel {
    fn score(&self, from: &Tag, to: &Tag) -> f64 {
        self.bigram_score(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(mode: TableMode) -> BigramModel {
        let roots: ProbabilityTable = [
            (".", "ел", 0.5),
            ("ел", "саяси", 0.25),
            ("саяси", "ел", 0.75),
        ]
        .into_iter()
        .collect();
        let igs: ProbabilityTable = [
            ("sent", "n$loc", 0.125),
            ("sent", "attr", 0.5),
            ("attr", "adj", 2.0),
        ]
        .into_iter()
        .collect();
        BigramModel::new(
            &["ел", "саяси", "."],
            &roots,
            &["n$loc", "attr", "adj", "sent"],
            &igs,
            mode,
        )
    }

    #[test]
    fn combines_root_and_ig_components() {
        let m = model(TableMode::Probabilities);
        let boundary = Tag::sentence_boundary();
        let el = Tag::from_keys("ел", &["n$loc", "attr"]);

        // root: ел given "." ; IG: 1.0 + n$loc|sent + attr|sent
        let expected = 0.5 + 1.0 + 0.125 + 0.5;
        assert!((m.score(&boundary, &el) - expected).abs() < 1e-12);
    }

    #[test]
    fn is_directional() {
        let m = model(TableMode::Probabilities);
        let el = Tag::from_keys("ел", &["n$loc", "attr"]);
        let sayasi = Tag::from_keys("саяси", &["adj"]);

        assert!((m.score(&el, &sayasi) - (0.25 + 1.0 + 2.0)).abs() < 1e-12);
        // "ел" given "саяси": root 0.75, no IG context "adj" anywhere.
        assert!((m.score(&sayasi, &el) - (0.75 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn unknown_tokens_only_get_the_floor() {
        let m = model(TableMode::Probabilities);
        let a = Tag::from_keys("белгісіз", &["x"]);
        let b = Tag::from_keys("басқа", &["y$z"]);
        assert_eq!(m.score(&a, &b), IG_SCORE_FLOOR);
    }

    #[test]
    fn log_prob_sums_transitions() {
        let m = model(TableMode::Probabilities);
        let seq = vec![
            Tag::sentence_boundary(),
            Tag::from_keys("ел", &["n$loc", "attr"]),
            Tag::from_keys("саяси", &["adj"]),
        ];
        let expected = m.score(&seq[0], &seq[1]) + m.score(&seq[1], &seq[2]);
        assert!((m.log_prob(&seq) - expected).abs() < 1e-12);
        assert_eq!(m.log_prob(&seq[..1]), 0.0);
    }

    #[test]
    fn closures_are_scorers() {
        let zero = |_: &Tag, _: &Tag| 0.0;
        let t = Tag::sentence_boundary();
        assert_eq!(zero.score(&t, &t), 0.0);
    }
}
