//! Sentences extracted from the tagged corpus.
//!
//! A [`Sentence`] pairs every root with one [`InflectionalGroup`]. Both are
//! built by [`crate::corpus::CorpusBuilder`]; outside the crate they are
//! read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One word's morphological analysis: an ordered, non-empty list of atomic tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionalGroup {
    group: Vec<String>,
}

impl InflectionalGroup {
    pub fn new(group: Vec<String>) -> Self {
        Self { group }
    }

    /// Append a raw atomic tag (copula merge).
    pub(crate) fn add<S: Into<String>>(&mut self, tag: S) {
        self.group.push(tag.into());
    }

    pub fn tags(&self) -> &[String] {
        &self.group
    }

    /// Number of atomic tags.
    pub fn num(&self) -> usize {
        self.group.len()
    }

    /// The final atomic tag, the context anchor for the next word.
    pub fn last(&self) -> &str {
        self.group.last().map_or("", String::as_str)
    }
}

impl fmt::Display for InflectionalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group.join(" "))
    }
}

/// Roots and IGs of one corpus sentence, in word order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    roots: Vec<String>,
    igs: Vec<InflectionalGroup>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_root<S: Into<String>>(&mut self, root: S) {
        self.roots.push(root.into());
    }

    pub(crate) fn add_ig(&mut self, ig: InflectionalGroup) {
        self.igs.push(ig);
    }

    /// Append a copula-like fragment to the last IG.
    ///
    /// Hands the fragment back when the sentence has no IG yet.
    pub(crate) fn add_copula_ig(&mut self, fragment: String) -> Result<(), String> {
        match self.igs.last_mut() {
            Some(last) => {
                last.add(fragment);
                Ok(())
            }
            None => Err(fragment),
        }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn igs(&self) -> &[InflectionalGroup] {
        &self.igs
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let igs: Vec<String> = self.igs.iter().map(|ig| ig.to_string()).collect();
        writeln!(f, "Roots: {:?}", self.roots)?;
        writeln!(f, "IGs: {:?}", igs)
    }
}
