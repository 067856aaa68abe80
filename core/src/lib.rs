//! morphdisamb-core
//!
//! Morphological disambiguation for an agglutinative language with a bigram
//! model over roots and inflectional groups (IGs).
//!
//! Pipeline:
//! - `extract` / `segment` / `corpus` turn a VISL CG style tagged corpus into
//!   sentences of roots and IGs and write the estimator training files.
//! - `estimator` runs an external `ngram-count` and `table` reads the bigram
//!   section of its ARPA output.
//! - `token` / `model` build the transition scorer from the tables.
//! - `viterbi` picks the best analysis per word from a lattice of candidates.
//!
//! Public API:
//! - `CorpusBuilder`, `CorpusAccumulator` - corpus reading and statistics
//! - `ProbabilityTable` - sparse context -> target table
//! - `BigramModel` - root + IG transition scorer
//! - `Viterbi` - lattice decoder
//! - `Config` - TOML configuration

pub mod errors;
pub use errors::{DisambError, ParseIssue, Result};

pub mod extract;
pub use extract::{classify_line, extract, Category, LineToken};

pub mod segment;
pub use segment::segment;

pub mod sentence;
pub use sentence::{InflectionalGroup, Sentence};

pub mod corpus;
pub use corpus::{ArtifactPaths, CorpusAccumulator, CorpusBuilder, TokenKind};

pub mod table;
pub use table::{load_arpa, parse_arpa, ProbabilityTable, BIGRAM_ORDER};

pub mod token;
pub use token::{build_tokens, TableMode, Token, TokenTable};

pub mod tag;
pub use tag::{IgGroup, Tag};

pub mod model;
pub use model::{BigramModel, TransitionScorer};

pub mod viterbi;
pub use viterbi::{decode, decode_all, AmbiguousSentence, Decoded, Lattice, Viterbi};

pub mod estimator;
pub use estimator::{NgramEstimator, SrilmEstimator};

pub mod config;
pub use config::Config;

pub mod demo;

/// Replaces spaces inside roots and IG strings; also joins IG morphemes.
pub const JOIN_MARKER: char = '$';

/// IG value marking the end of a sentence.
pub const SENTENCE_MARKER: &str = "sent";
