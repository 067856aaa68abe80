//! Candidate analyses used by the decoder.
//!
//! A [`Tag`] is one full analysis of a word: a root and its IG slots. Each
//! slot is an [`IgGroup`], the ordered morphemes of one IG; its lookup key in
//! the IG table is the morphemes joined with `$`, which is how an atomic tag is
//! spelled in the corpus IG stream.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{JOIN_MARKER, SENTENCE_MARKER};

/// Morphemes of one IG slot.
pub type IgGroup = Vec<String>;

/// Root of the sentence boundary tag.
pub const BOUNDARY_ROOT: &str = ".";

/// Key of an IG group in the IG probability table.
pub fn group_key<S: AsRef<str>>(group: &[S]) -> String {
    crate::segment::join(group)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    root: String,
    igs: Vec<IgGroup>,
}

impl Tag {
    pub fn new<R: Into<String>>(root: R, igs: Vec<IgGroup>) -> Self {
        Self {
            root: root.into(),
            igs,
        }
    }

    /// Build a tag from `$`-joined IG keys, e.g. `["n$loc", "attr"]`.
    pub fn from_keys<R: Into<String>>(root: R, keys: &[&str]) -> Self {
        let igs = keys
            .iter()
            .map(|key| key.split(JOIN_MARKER).map(str::to_string).collect())
            .collect();
        Self::new(root, igs)
    }

    /// The fixed tag at both ends of every lattice: `.` with the single IG `sent`.
    pub fn sentence_boundary() -> Self {
        Self::new(BOUNDARY_ROOT, vec![vec![SENTENCE_MARKER.to_string()]])
    }

    pub fn is_sentence_boundary(&self) -> bool {
        self.matches(&Self::sentence_boundary())
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn igs(&self) -> &[IgGroup] {
        &self.igs
    }

    pub fn get_ig(&self, k: usize) -> Option<&IgGroup> {
        self.igs.get(k)
    }

    pub fn last_ig(&self) -> Option<&IgGroup> {
        self.igs.last()
    }

    pub fn num_ig(&self) -> usize {
        self.igs.len()
    }

    /// Table keys of all IG slots, in order.
    pub fn ig_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.igs.iter().map(|g| group_key(g.as_slice()))
    }

    /// Table key of the last IG slot; empty for a tag without IGs.
    pub fn last_ig_key(&self) -> String {
        self.last_ig().map(|g| group_key(g.as_slice())).unwrap_or_default()
    }

    /// Loose lattice equality: same root and at least one shared IG slot.
    pub fn matches(&self, other: &Tag) -> bool {
        self.root == other.root && other.igs.iter().any(|g| self.igs.contains(g))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for key in self.ig_keys() {
            write!(f, "+{}", key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_join_morphemes() {
        let tag = Tag::from_keys("ел", &["n$loc", "ghi$subst$nom"]);
        assert_eq!(tag.num_ig(), 2);
        assert_eq!(tag.get_ig(0), Some(&vec!["n".to_string(), "loc".to_string()]));
        assert_eq!(tag.last_ig_key(), "ghi$subst$nom");
        assert_eq!(tag.to_string(), "ел+n$loc+ghi$subst$nom");
    }

    #[test]
    fn loose_match_needs_root_and_a_shared_group() {
        let a = Tag::from_keys("ел", &["n$loc", "attr"]);
        let b = Tag::from_keys("ел", &["n$loc", "ghi$subst$nom"]);
        let c = Tag::from_keys("ел", &["adj"]);
        let d = Tag::from_keys("қол", &["n$loc"]);

        assert!(a.matches(&b));
        assert!(b.matches(&a));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
        // Structural equality stays strict.
        assert_ne!(a, b);
    }

    #[test]
    fn boundary_tag() {
        let boundary = Tag::sentence_boundary();
        assert!(boundary.is_sentence_boundary());
        assert_eq!(boundary.root(), ".");
        assert_eq!(boundary.last_ig_key(), "sent");
        assert!(!Tag::from_keys(".", &["cm"]).is_sentence_boundary());
    }

    #[test]
    fn json_shape() {
        let tag: Tag = serde_json::from_str(r#"{"root":"саяси","igs":[["adj"]]}"#).expect("json");
        assert_eq!(tag, Tag::from_keys("саяси", &["adj"]));
    }
}
