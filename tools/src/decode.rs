use anyhow::{Context, Result};
use morphdisamb_core::demo;
use morphdisamb_core::{AmbiguousSentence, BigramModel, Config, decode_all, load_arpa};
use std::path::Path;
use tracing::{info, warn};

use crate::estimate::{IGS_ARPA, ROOTS_ARPA};

fn load_model(config: &Config, lm_dir: &Path) -> Result<BigramModel> {
    let roots_path = lm_dir.join(ROOTS_ARPA);
    let igs_path = lm_dir.join(IGS_ARPA);
    let roots = load_arpa(&roots_path)
        .with_context(|| format!("failed to load {}", roots_path.display()))?;
    let igs = load_arpa(&igs_path)
        .with_context(|| format!("failed to load {}", igs_path.display()))?;

    let root_list: Vec<&str> = roots.targets().collect();
    let ig_list: Vec<&str> = igs.targets().collect();
    Ok(BigramModel::new(&root_list, &roots, &ig_list, &igs, config.table_mode))
}

/// Decode and print every sentence; sentences that fail are reported and skipped.
pub fn run(config: &Config, lattice: Option<&Path>, demo_model: bool, lm_dir: &Path) -> Result<()> {
    let model = if demo_model {
        demo::demo_model()
    } else {
        load_model(config, lm_dir)?
    };
    let sentences = match lattice {
        Some(path) => AmbiguousSentence::load_json(path)
            .with_context(|| format!("failed to read lattices from {}", path.display()))?,
        None => {
            if !demo_model {
                warn!("built-in sentences key one morpheme per IG slot; corpus-trained IG tables will not match them");
            }
            let mut all = vec![AmbiguousSentence::new(demo::DEMO_WORDS, demo::demo_lattice())];
            all.extend(demo::ambiguous_sentences());
            all
        }
    };
    info!(sentences = sentences.len(), "decoding");

    let mut failed = 0;
    for (sentence, result) in sentences.iter().zip(decode_all(&sentences, &model)) {
        println!("Sentence: {}", sentence.words);
        match result {
            Ok(decoded) => {
                let path: Vec<String> = decoded.path.iter().map(|t| t.to_string()).collect();
                println!("Viterbi probability: {:.6}", decoded.probability);
                println!("Viterbi path: {}", path.join(" "));
            }
            Err(e) => {
                failed += 1;
                println!("Error: {}", e);
            }
        }
        println!();
    }
    if failed > 0 {
        eprintln!("{} of {} sentences could not be decoded", failed, sentences.len());
    }
    Ok(())
}
