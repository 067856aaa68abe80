use anyhow::{Context, Result, bail};
use morphdisamb_core::{Config, CorpusAccumulator, CorpusBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build the training artifacts from every file in `corpus_dir`.
pub fn run(config: &Config, corpus_dir: &Path, out_dir: &Path) -> Result<()> {
    let mut files: Vec<PathBuf> = fs::read_dir(corpus_dir)
        .with_context(|| format!("failed to list corpus dir {}", corpus_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    if files.is_empty() {
        bail!("no corpus files in {}", corpus_dir.display());
    }

    let mut total = CorpusAccumulator::new();
    for path in &files {
        let sentences = CorpusBuilder::with_sentence_marker(config.sentence_marker.as_str())
            .process_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        info!(file = %path.display(), sentences = sentences.len(), "read corpus file");

        let mut part = CorpusAccumulator::new();
        part.add_sentences(&sentences);
        total.merge(part);
    }

    let paths = total
        .write_artifacts(out_dir)
        .with_context(|| format!("failed to write artifacts to {}", out_dir.display()))?;

    for line in total.summary() {
        println!("{}", line);
    }
    println!(
        "Wrote {}, {} and {}",
        paths.roots.display(),
        paths.igs.display(),
        paths.stats.display()
    );
    Ok(())
}
