// core/src/estimator.rs
//
// Adapter for the external n-gram estimator. The estimator turns the IG (or
// root) training text into an ARPA model; only its bigram section is read back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::errors::{DisambError, Result};
use crate::table::{load_arpa, ProbabilityTable, BIGRAM_ORDER};

/// Something that can estimate a bigram table from a training file.
pub trait NgramEstimator {
    /// Estimate a model of `order` from `training`, writing it to `output`,
    /// and return its bigram section.
    fn estimate(&self, training: &Path, order: usize, output: &Path) -> Result<ProbabilityTable>;
}

/// Runs an SRILM style `ngram-count` binary as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct SrilmEstimator {
    command: String,
    extra_args: Vec<String>,
}

impl SrilmEstimator {
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed before the standard ones, e.g. a script path when the
    /// command is an interpreter.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn build_command(&self, training: &Path, order: usize, output: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.extra_args)
            .arg("-order")
            .arg(order.to_string())
            .arg("-no-sos")
            .arg("-no-eos")
            .arg("-text")
            .arg(training)
            .arg("-lm")
            .arg(output);
        cmd
    }
}

impl Default for SrilmEstimator {
    fn default() -> Self {
        Self::new("ngram-count")
    }
}

impl NgramEstimator for SrilmEstimator {
    fn estimate(&self, training: &Path, order: usize, output: &Path) -> Result<ProbabilityTable> {
        if order != BIGRAM_ORDER {
            return Err(DisambError::UnsupportedOrder(order));
        }

        info!(
            command = %self.command,
            training = %training.display(),
            output = %output.display(),
            "running n-gram estimator"
        );
        // A model left by an earlier run must not pass for fresh output.
        match fs::remove_file(output) {
            Ok(()) => debug!(output = %output.display(), "removed previous model"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let status = self
            .build_command(training, order, output)
            .status()
            .map_err(|e| DisambError::estimator(format!("cannot run `{}`: {}", self.command, e)))?;
        if !status.success() {
            return Err(DisambError::estimator(format!("`{}` exited with {}", self.command, status)));
        }
        if !output.exists() {
            return Err(DisambError::estimator(format!(
                "`{}` did not write {}",
                self.command,
                output.display()
            )));
        }

        let table = load_arpa(output)?;
        if table.is_empty() {
            return Err(DisambError::estimator(format!(
                "{} has no bigram entries",
                output.display()
            )));
        }
        debug!(contexts = table.len(), entries = table.entry_count(), "estimated bigram table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_the_standard_arguments() {
        let est = SrilmEstimator::new("ngram-count").with_args(["-debug", "0"]);
        let cmd = est.build_command(Path::new("igs.txt"), 2, Path::new("igs.arpa"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["-debug", "0", "-order", "2", "-no-sos", "-no-eos", "-text", "igs.txt", "-lm", "igs.arpa"]
        );
    }

    #[test]
    fn only_bigrams() {
        let err = SrilmEstimator::default()
            .estimate(Path::new("igs.txt"), 3, Path::new("igs.arpa"))
            .unwrap_err();
        assert!(matches!(err, DisambError::UnsupportedOrder(3)));
    }
}
