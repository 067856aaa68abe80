use anyhow::{Context, Result};
use morphdisamb_core::corpus::{IGS_FILE, ROOTS_FILE};
use morphdisamb_core::{Config, NgramEstimator, SrilmEstimator};
use std::path::Path;

pub const ROOTS_ARPA: &str = "roots.arpa";
pub const IGS_ARPA: &str = "igs.arpa";

/// Estimate root and IG bigram models next to the training files.
pub fn run(config: &Config, lm_dir: &Path) -> Result<()> {
    let estimator = SrilmEstimator::new(config.estimator_command.as_str())
        .with_args(config.estimator_args.iter().cloned());

    for (training, output) in [(ROOTS_FILE, ROOTS_ARPA), (IGS_FILE, IGS_ARPA)] {
        let training = lm_dir.join(training);
        let output = lm_dir.join(output);
        let table = estimator
            .estimate(&training, config.order, &output)
            .with_context(|| format!("failed to estimate a model from {}", training.display()))?;
        println!(
            "Wrote {} ({} contexts, {} bigrams)",
            output.display(),
            table.len(),
            table.entry_count()
        );
    }
    Ok(())
}
