//! Built-in sample data: small root and IG count tables, the lattice of
//! "елдегі саяси билік аятолла қолында" and a few ambiguous Kazakh sentences.
//!
//! The count tables are read in [`TableMode::Counts`]. They are enough to
//! exercise the decoder without running the estimator.

use crate::model::BigramModel;
use crate::table::ProbabilityTable;
use crate::tag::Tag;
use crate::token::TableMode;
use crate::viterbi::{AmbiguousSentence, Lattice};

/// Roots of the sample tables, in row/column order.
pub const DEMO_ROOTS: [&str; 6] = ["ел", "саяси", "билік", "аятолла", "қол", "."];

/// IG keys of the sample tables, in row/column order.
pub const DEMO_IGS: [&str; 9] = [
    "n$loc",
    "attr",
    "ghi$subst$nom",
    "adj",
    "n$nom",
    "n$attr",
    "n$px3sp$loc",
    "e$cop$aor$p3$sg",
    "sent",
];

const ROOT_COUNTS: [[f64; 6]; 6] = [
    [1.0, 17.0, 19.0, 50.0, 45.0, 19.0],
    [32.0, 1.0, 100.0, 18.0, 4.0, 38.0],
    [47.0, 5.0, 1.0, 21.0, 53.0, 23.0],
    [44.0, 32.0, 4.0, 1.0, 73.0, 17.0],
    [13.0, 81.0, 31.0, 20.0, 1.0, 15.0],
    [64.0, 75.0, 46.0, 13.0, 54.0, 1.0],
];

const IG_COUNTS: [[f64; 9]; 9] = [
    [28.0, 36.0, 10.0, 56.0, 95.0, 48.0, 53.0, 77.0, 1.0],
    [91.0, 88.0, 42.0, 21.0, 73.0, 74.0, 82.0, 94.0, 2.0],
    [59.0, 41.0, 24.0, 64.0, 2.0, 67.0, 37.0, 29.0, 3.0],
    [66.0, 69.0, 92.0, 40.0, 34.0, 50.0, 75.0, 90.0, 4.0],
    [51.0, 46.0, 12.0, 1.0, 33.0, 81.0, 44.0, 71.0, 5.0],
    [79.0, 16.0, 96.0, 11.0, 35.0, 61.0, 70.0, 100.0, 6.0],
    [85.0, 84.0, 43.0, 97.0, 8.0, 5.0, 76.0, 6.0, 7.0],
    [54.0, 76.0, 51.0, 91.0, 17.0, 62.0, 21.0, 22.0, 8.0],
    [82.0, 63.0, 11.0, 65.0, 59.0, 84.0, 35.0, 77.0, 12.0],
];

fn square_table<const N: usize>(names: &[&str; N], counts: &[[f64; N]; N]) -> ProbabilityTable {
    let mut table = ProbabilityTable::new();
    for (context, row) in names.iter().zip(counts) {
        for (target, &count) in names.iter().zip(row) {
            table.insert(*context, *target, count);
        }
    }
    table
}

/// Root co-occurrence counts, context row first.
pub fn root_counts() -> ProbabilityTable {
    square_table(&DEMO_ROOTS, &ROOT_COUNTS)
}

/// IG co-occurrence counts, context row first.
pub fn ig_counts() -> ProbabilityTable {
    square_table(&DEMO_IGS, &IG_COUNTS)
}

/// Scorer over the sample count tables.
pub fn demo_model() -> BigramModel {
    BigramModel::new(
        &DEMO_ROOTS,
        &root_counts(),
        &DEMO_IGS,
        &ig_counts(),
        TableMode::Counts,
    )
}

/// Surface form of [`demo_lattice`].
pub const DEMO_WORDS: &str = ". елдегі саяси билік аятолла қолында .";

/// Candidates of ". елдегі саяси билік аятолла қолында .".
pub fn demo_lattice() -> Lattice {
    vec![
        vec![Tag::sentence_boundary()],
        vec![
            Tag::from_keys("ел", &["n$loc", "attr"]),
            Tag::from_keys("ел", &["n$loc", "ghi$subst$nom"]),
        ],
        vec![Tag::from_keys("саяси", &["adj"])],
        vec![
            Tag::from_keys("билік", &["n$nom"]),
            Tag::from_keys("билік", &["n$attr"]),
        ],
        vec![Tag::from_keys("аятолла", &["n$nom"])],
        vec![
            Tag::from_keys("қол", &["n$px3sp$loc"]),
            Tag::from_keys("қол", &["n$px3sp$loc", "e$cop$aor$p3$sg"]),
        ],
        vec![Tag::sentence_boundary()],
    ]
}

/// The hand-checked analysis of [`DEMO_WORDS`].
pub fn demo_reference_analysis() -> Vec<Tag> {
    vec![
        Tag::sentence_boundary(),
        Tag::from_keys("ел", &["n$loc", "ghi$subst$nom"]),
        Tag::from_keys("саяси", &["adj"]),
        Tag::from_keys("билік", &["n$nom"]),
        Tag::from_keys("аятолла", &["n$nom"]),
        Tag::from_keys("қол", &["n$px3sp$loc", "e$cop$aor$p3$sg"]),
        Tag::sentence_boundary(),
    ]
}

// Each morpheme of these analyses is its own IG slot.
fn analysis(root: &str, morphemes: &[&str]) -> Tag {
    Tag::from_keys(root, morphemes)
}

fn with_boundaries(words: &str, inner: Vec<Vec<Tag>>) -> AmbiguousSentence {
    let mut lattice = Vec::with_capacity(inner.len() + 2);
    lattice.push(vec![Tag::sentence_boundary()]);
    lattice.extend(inner);
    lattice.push(vec![Tag::sentence_boundary()]);
    AmbiguousSentence::new(words, lattice)
}

/// Sample ambiguous sentences with their candidate analyses.
///
/// Every morpheme is its own IG slot here (`np`, `ant`, `m`, `nom`), while
/// tables trained on a corpus key whole segmented pieces (`np$ant$m$nom`).
/// Against such tables only the root component of the score applies; the IG
/// component needs hand-built tables keyed by single morphemes.
pub fn ambiguous_sentences() -> Vec<AmbiguousSentence> {
    vec![
        with_boundaries(
            ". Азамат пен Айгүл ойнағанды жақсы$көреді , олар әрдайым үлкен үйдің алдындағы бақшада бірге ойнайды .",
            vec![
                vec![analysis("Азамат", &["np", "ant", "m", "nom"])],
                vec![analysis("мен", &["cnjcoo"])],
                vec![analysis("Айгуль", &["np", "ant", "f", "nom"])],
                vec![analysis("ойна", &["v", "tv", "ger_past", "acc"])],
                vec![analysis("жақсы$көр", &["v", "tv", "aor", "p3", "pl"])],
                vec![analysis(",", &["cm"])],
                vec![analysis("олар", &["prn", "pers", "p3", "pl", "nom"])],
                vec![analysis("әрдайым", &["adv"])],
                vec![analysis("үлкен", &["adj"])],
                vec![analysis("үй", &["n", "gen"])],
                vec![analysis("алд", &["n", "px3sp", "loc", "attr"])],
                vec![analysis("бақша", &["n", "loc"])],
                vec![analysis("бірге", &["adv"])],
                vec![analysis("ойна", &["v", "tv", "aor", "p3", "pl"])],
            ],
        ),
        with_boundaries(
            ". Норвегияның елордасы Осло қаласында өтеді .",
            vec![
                vec![analysis("Норвегия", &["np", "top", "gen"])],
                vec![
                    analysis("елорда", &["n", "px3sp", "nom"]),
                    analysis("е", &["cop", "aor", "p3", "pl"]),
                ],
                vec![
                    analysis("Осло", &["np", "top", "attr"]),
                    analysis("Осло", &["np", "top", "nom"]),
                ],
                vec![analysis("қала", &["n", "px3sp", "loc"])],
                vec![
                    analysis("өт", &["v", "tv", "aor", "p3", "sg"]),
                    analysis("өт", &["v", "iv", "aor", "p3", "sg"]),
                ],
            ],
        ),
        with_boundaries(
            ". Азамат пен Айгүл ойнағанды жақсы$көреді .",
            vec![
                vec![analysis("Азамат", &["np", "ant", "m", "nom"])],
                vec![analysis("мен", &["cnjcoo"]), analysis("мен", &["post"])],
                vec![analysis("Айгуль", &["np", "ant", "f", "nom"])],
                vec![
                    analysis("ойна", &["v", "tv", "ger_past", "acc"]),
                    analysis("ойна", &["v", "tv", "gpr_past", "subst", "acc"]),
                ],
                vec![analysis("жақсы$көр", &["v", "tv", "aor", "p3", "pl"])],
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransitionScorer;

    #[test]
    fn tables_are_square() {
        let roots = root_counts();
        assert_eq!(roots.len(), 6);
        assert_eq!(roots.entry_count(), 36);
        assert_eq!(roots.get("саяси", "билік"), 100.0);

        let igs = ig_counts();
        assert_eq!(igs.entry_count(), 81);
        assert_eq!(igs.get("sent", "n$attr"), 84.0);
    }

    #[test]
    fn boundary_to_first_word() {
        let model = demo_model();
        let lattice = demo_lattice();
        let s = model.score(&lattice[0][0], &lattice[1][0]);
        assert!((s - 6.205283243418357).abs() < 1e-9);
    }

    #[test]
    fn sample_sentences_have_boundaries() {
        for sentence in ambiguous_sentences() {
            let first = sentence.lattice.first().expect("non-empty");
            let last = sentence.lattice.last().expect("non-empty");
            assert!(first[0].is_sentence_boundary());
            assert!(last[0].is_sentence_boundary());
            assert_eq!(sentence.lattice.len(), sentence.words.split(' ').count());
        }
    }

    #[test]
    fn sample_sentences_use_one_morpheme_per_ig() {
        let azamat = &ambiguous_sentences()[0].lattice[1][0];
        let keys: Vec<String> = azamat.ig_keys().collect();
        assert_eq!(keys, ["np", "ant", "m", "nom"]);
        for sentence in ambiguous_sentences() {
            for tag in sentence.lattice.iter().flatten() {
                assert!(tag.ig_keys().all(|key| !key.contains(crate::JOIN_MARKER)));
            }
        }
    }
}
