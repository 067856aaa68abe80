//! Viterbi decoding over a lattice of candidate tags.
//!
//! Position 0 of a lattice is the sentence boundary alone; the last position
//! must contain it too. For every candidate at `pos` the decoder scans the
//! candidates at `pos - 1` and keeps the best
//! `delta[pos - 1][prev] + score(candidate, prev)`.
//!
//! The running maximum of each scan starts at 0.0 with the first candidate of
//! `pos - 1` as predecessor, and is only replaced by a strictly greater score.
//! The candidate is passed to the scorer as `from` and the previous tag as `to`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{DisambError, Result};
use crate::model::TransitionScorer;
use crate::tag::Tag;

/// Candidate tags per word position.
pub type Lattice = Vec<Vec<Tag>>;

/// One sentence to decode: its surface words (for reporting) and its lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguousSentence {
    pub words: String,
    pub lattice: Lattice,
}

impl AmbiguousSentence {
    pub fn new<S: Into<String>>(words: S, lattice: Lattice) -> Self {
        Self {
            words: words.into(),
            lattice,
        }
    }

    pub fn decode<S: TransitionScorer + ?Sized>(&self, scorer: &S) -> Result<Decoded> {
        Viterbi::train(&self.lattice, scorer).map(Viterbi::into_decoded)
    }

    /// Parse one sentence object or an array of them.
    pub fn from_json_str(text: &str) -> Result<Vec<Self>> {
        if let Ok(many) = serde_json::from_str::<Vec<Self>>(text) {
            return Ok(many);
        }
        Ok(vec![serde_json::from_str(text)?])
    }

    /// Read sentences from a JSON file, see [`AmbiguousSentence::from_json_str`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let text = std::fs::read_to_string(path)?;
        let sentences = Self::from_json_str(&text)?;
        debug!(sentences = sentences.len(), "loaded lattices");
        Ok(sentences)
    }
}

/// Result of decoding one lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    pub probability: f64,
    pub path: Vec<Tag>,
}

/// Filled-in dynamic programming tables for one lattice.
#[derive(Debug, Clone)]
pub struct Viterbi<'a> {
    lattice: &'a [Vec<Tag>],
    delta: Vec<Vec<f64>>,
    psi: Vec<Vec<usize>>,
    end: usize,
}

impl<'a> Viterbi<'a> {
    /// Run the forward pass over `lattice`.
    pub fn train<S: TransitionScorer + ?Sized>(lattice: &'a [Vec<Tag>], scorer: &S) -> Result<Self> {
        if lattice.is_empty() {
            return Err(DisambError::EmptyLattice { position: 0 });
        }
        if let Some(position) = lattice.iter().position(Vec::is_empty) {
            return Err(DisambError::EmptyLattice { position });
        }
        let boundary = Tag::sentence_boundary();
        if lattice[0].len() != 1 || !lattice[0][0].matches(&boundary) {
            return Err(DisambError::MissingBoundary { position: 0 });
        }
        let last = lattice.len() - 1;
        let end = lattice[last]
            .iter()
            .position(|tag| tag.matches(&boundary))
            .ok_or(DisambError::MissingBoundary { position: last })?;

        let mut delta = Vec::with_capacity(lattice.len());
        let mut psi = Vec::with_capacity(lattice.len());
        delta.push(vec![0.0]);
        psi.push(vec![0]);

        for pos in 1..lattice.len() {
            let prev_delta: &[f64] = &delta[pos - 1];
            let mut row_delta = Vec::with_capacity(lattice[pos].len());
            let mut row_psi = Vec::with_capacity(lattice[pos].len());
            for tag in &lattice[pos] {
                let mut best = 0.0;
                let mut best_prev = 0;
                for (j, prev) in lattice[pos - 1].iter().enumerate() {
                    let candidate = prev_delta[j] + scorer.score(tag, prev);
                    if candidate > best {
                        best = candidate;
                        best_prev = j;
                    }
                }
                row_delta.push(best);
                row_psi.push(best_prev);
            }
            delta.push(row_delta);
            psi.push(row_psi);
        }

        debug!(positions = lattice.len(), probability = delta[last][end], "viterbi forward pass done");
        Ok(Self {
            lattice,
            delta,
            psi,
            end,
        })
    }

    /// Best cumulative score at the final sentence boundary.
    pub fn probability(&self) -> f64 {
        self.delta[self.lattice.len() - 1][self.end]
    }

    /// Best tag sequence, boundary to boundary.
    pub fn path(&self) -> Vec<Tag> {
        let last = self.lattice.len() - 1;
        let mut path = vec![Tag::sentence_boundary(); self.lattice.len()];
        path[last] = self.lattice[last][self.end].clone();

        let mut idx = self.end;
        for pos in (1..=last).rev() {
            idx = self.psi[pos][idx];
            if pos - 1 > 0 {
                path[pos - 1] = self.lattice[pos - 1][idx].clone();
            }
        }
        path
    }

    pub fn delta(&self) -> &[Vec<f64>] {
        &self.delta
    }

    pub fn psi(&self) -> &[Vec<usize>] {
        &self.psi
    }

    pub fn into_decoded(self) -> Decoded {
        Decoded {
            probability: self.probability(),
            path: self.path(),
        }
    }
}

/// Decode one lattice.
pub fn decode<S: TransitionScorer + ?Sized>(lattice: &[Vec<Tag>], scorer: &S) -> Result<Decoded> {
    Viterbi::train(lattice, scorer).map(Viterbi::into_decoded)
}

/// Decode every sentence; a failure is reported for its sentence only.
pub fn decode_all<S: TransitionScorer + ?Sized>(
    sentences: &[AmbiguousSentence],
    scorer: &S,
) -> Vec<Result<Decoded>> {
    sentences
        .iter()
        .map(|sentence| {
            let decoded = sentence.decode(scorer);
            if let Err(e) = &decoded {
                warn!(words = %sentence.words, error = %e, "could not decode sentence");
            }
            decoded
        })
        .collect()
}
