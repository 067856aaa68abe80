//! Corpus building: per-file sentence extraction and the training streams.
//!
//! [`CorpusBuilder`] is a small state machine fed one line at a time. It
//! collects roots and IGs until the sentence terminator IG shows up, then
//! emits a [`Sentence`]. [`CorpusAccumulator`] turns sentences into the root
//! stream, the IG-bigram training events and the IG statistics; accumulators
//! built for different files are combined with [`CorpusAccumulator::merge`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::errors::Result;
use crate::extract::{extract, Category};
use crate::segment::segment;
use crate::sentence::{InflectionalGroup, Sentence};
use crate::SENTENCE_MARKER;

pub const ROOTS_FILE: &str = "roots.txt";
pub const IGS_FILE: &str = "igs.txt";
pub const STATS_FILE: &str = "stats.txt";

/// Kind of the last token seen by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Root,
    Ig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingIg {
    New(String),
    Continuation(String),
}

/// Line-driven sentence extractor for one corpus file.
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    sentence_marker: String,
    last: Option<TokenKind>,
    words: Vec<String>,
    roots: Vec<String>,
    igs: Vec<PendingIg>,
    sentences: Vec<Sentence>,
    words_seen: usize,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::with_sentence_marker(SENTENCE_MARKER)
    }

    /// Use a different IG literal as the sentence terminator.
    pub fn with_sentence_marker<S: Into<String>>(marker: S) -> Self {
        Self {
            sentence_marker: marker.into(),
            last: None,
            words: Vec::new(),
            roots: Vec::new(),
            igs: Vec::new(),
            sentences: Vec::new(),
            words_seen: 0,
        }
    }

    /// Feed one corpus line (without its line terminator).
    pub fn feed_line(&mut self, line: &str) {
        let (word, _) = extract(line, Category::Word);
        let (root, ig) = extract(line, Category::Root);

        if let Some(word) = word {
            self.words.push(word);
            self.words_seen += 1;
            self.last = Some(TokenKind::Word);
        }
        if let Some(root) = root {
            self.roots.push(root);
            self.last = Some(TokenKind::Root);
        }
        if let Some(ig) = ig {
            let ends_sentence = ig == self.sentence_marker;
            let pending = if self.last == Some(TokenKind::Ig) {
                PendingIg::Continuation(ig)
            } else {
                PendingIg::New(ig)
            };
            self.igs.push(pending);
            self.last = Some(TokenKind::Ig);
            if ends_sentence {
                self.finalize_sentence();
            }
        }
    }

    fn finalize_sentence(&mut self) {
        let mut sentence = Sentence::new();
        for root in self.roots.drain(..) {
            sentence.add_root(root);
        }
        for pending in self.igs.drain(..) {
            match pending {
                PendingIg::New(ig) => sentence.add_ig(InflectionalGroup::new(segment(&ig))),
                PendingIg::Continuation(fragment) => {
                    if let Err(fragment) = sentence.add_copula_ig(fragment) {
                        debug!(%fragment, "dropping continuation with no preceding IG");
                    }
                }
            }
        }
        self.words.clear();
        self.sentences.push(sentence);
    }

    pub fn last_token_kind(&self) -> Option<TokenKind> {
        self.last
    }

    /// Surface words of the sentence in progress.
    pub fn pending_words(&self) -> &[String] {
        &self.words
    }

    /// Roots collected for the sentence in progress.
    pub fn pending_roots(&self) -> &[String] {
        &self.roots
    }

    /// Number of IG entries collected for the sentence in progress.
    pub fn pending_igs(&self) -> usize {
        self.igs.len()
    }

    /// Number of surface words seen so far.
    pub fn words_seen(&self) -> usize {
        self.words_seen
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Finish the file. Material after the last terminator is discarded.
    pub fn finish(self) -> Vec<Sentence> {
        if !self.roots.is_empty() || !self.igs.is_empty() {
            debug!(
                roots = self.roots.len(),
                igs = self.igs.len(),
                "discarding unterminated sentence"
            );
        }
        self.sentences
    }

    /// Feed every line of `reader`. Bytes that are not UTF-8 are replaced, so
    /// a damaged line is skipped like any other unmatched line.
    pub fn process_reader<R: BufRead>(mut self, mut reader: R) -> Result<Vec<Sentence>> {
        let mut buf = Vec::new();
        let mut lineno = 0usize;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            lineno += 1;
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                trace!(lineno, "corpus line is not valid UTF-8");
            }
            self.feed_line(line.trim_end_matches(['\r', '\n']));
        }
        Ok(self.finish())
    }

    pub fn process_str(mut self, text: &str) -> Vec<Sentence> {
        for line in text.lines() {
            self.feed_line(line);
        }
        self.finish()
    }

    pub fn process_file<P: AsRef<Path>>(self, path: P) -> Result<Vec<Sentence>> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let sentences = self.process_reader(reader)?;
        debug!(path = %path.display(), sentences = sentences.len(), "processed corpus file");
        Ok(sentences)
    }
}

/// Locations of the files written by [`CorpusAccumulator::write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub roots: PathBuf,
    pub igs: PathBuf,
    pub stats: PathBuf,
}

/// Root stream, IG training events and IG statistics over many sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusAccumulator {
    root_stream: String,
    root_corpus: Vec<String>,
    ig_corpus: Vec<String>,
    ig_bigrams: Vec<(String, String)>,
    ig_length_counts: BTreeMap<usize, usize>,
    count_sequences: Vec<Vec<usize>>,
    num_sentences: usize,
}

impl CorpusAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sentence(&mut self, sentence: &Sentence) {
        self.num_sentences += 1;

        self.root_stream.push_str(&sentence.roots().join(" "));
        self.root_stream.push(' ');
        self.root_corpus.extend(sentence.roots().iter().cloned());

        let igs = sentence.igs();
        for pair in igs.windows(2) {
            let context = pair[0].last();
            for tag in pair[1].tags() {
                self.ig_bigrams.push((context.to_string(), tag.clone()));
            }
        }
        for ig in igs {
            self.ig_corpus.extend(ig.tags().iter().cloned());
            *self.ig_length_counts.entry(ig.num()).or_insert(0) += 1;
        }
        self.count_sequences
            .push(igs.iter().map(InflectionalGroup::num).collect());
    }

    pub fn add_sentences(&mut self, sentences: &[Sentence]) {
        for sentence in sentences {
            self.add_sentence(sentence);
        }
    }

    /// Append another accumulator, keeping its sentences after ours.
    pub fn merge(&mut self, other: CorpusAccumulator) {
        self.root_stream.push_str(&other.root_stream);
        self.root_corpus.extend(other.root_corpus);
        self.ig_corpus.extend(other.ig_corpus);
        self.ig_bigrams.extend(other.ig_bigrams);
        for (len, count) in other.ig_length_counts {
            *self.ig_length_counts.entry(len).or_insert(0) += count;
        }
        self.count_sequences.extend(other.count_sequences);
        self.num_sentences += other.num_sentences;
    }

    /// Space-joined roots of every sentence, sentences concatenated.
    pub fn root_stream(&self) -> &str {
        &self.root_stream
    }

    /// All roots in corpus order (the root token list of the model).
    pub fn root_corpus(&self) -> &[String] {
        &self.root_corpus
    }

    /// All atomic IG tags in corpus order (the IG token list of the model).
    pub fn ig_corpus(&self) -> &[String] {
        &self.ig_corpus
    }

    /// `(previous word's last tag, atomic tag)` training events.
    pub fn ig_bigrams(&self) -> &[(String, String)] {
        &self.ig_bigrams
    }

    /// Number of words per IG length.
    pub fn ig_length_counts(&self) -> &BTreeMap<usize, usize> {
        &self.ig_length_counts
    }

    /// Per-sentence sequence of IG lengths.
    pub fn count_sequences(&self) -> &[Vec<usize>] {
        &self.count_sequences
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    /// The IG-bigram training file content, one `context tag` pair per line.
    pub fn ig_training_text(&self) -> String {
        let mut out = String::new();
        for (context, tag) in &self.ig_bigrams {
            out.push_str(context);
            out.push(' ');
            out.push_str(tag);
            out.push('\n');
        }
        out
    }

    /// The statistics file content, one comma-joined count sequence per line.
    pub fn stats_text(&self) -> String {
        let mut out = String::new();
        for counts in &self.count_sequences {
            let line: Vec<String> = counts.iter().map(|n| n.to_string()).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    /// Human readable totals.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("Total # of sentences: {}", self.num_sentences)];
        for (len, count) in &self.ig_length_counts {
            lines.push(format!("Words with {} IG(s): {}", len, count));
        }
        lines
    }

    /// Write `roots.txt`, `igs.txt` and `stats.txt` into `dir`, replacing old files.
    pub fn write_artifacts<P: AsRef<Path>>(&self, dir: P) -> Result<ArtifactPaths> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let paths = ArtifactPaths {
            roots: dir.join(ROOTS_FILE),
            igs: dir.join(IGS_FILE),
            stats: dir.join(STATS_FILE),
        };
        fs::write(&paths.roots, &self.root_stream)?;
        fs::write(&paths.igs, self.ig_training_text())?;
        fs::write(&paths.stats, self.stats_text())?;
        info!(
            dir = %dir.display(),
            sentences = self.num_sentences,
            ig_events = self.ig_bigrams.len(),
            "wrote corpus artifacts"
        );
        Ok(paths)
    }
}
