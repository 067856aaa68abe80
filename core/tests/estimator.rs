use std::fs;
use std::path::PathBuf;

use morphdisamb_core::{DisambError, NgramEstimator, SrilmEstimator};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "morphdisamb_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn nonexistent_command_is_an_estimator_failure() {
    let dir = temp_dir("est_missing");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\n").expect("write training");

    let est = SrilmEstimator::new("morphdisamb-no-such-ngram-count");
    let err = est.estimate(&training, 2, &dir.join("igs.arpa")).unwrap_err();
    assert!(matches!(err, DisambError::EstimatorFailure(_)));
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn failing_command_is_an_estimator_failure() {
    let dir = temp_dir("est_false");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\n").expect("write training");

    let err = SrilmEstimator::new("false")
        .estimate(&training, 2, &dir.join("igs.arpa"))
        .unwrap_err();
    assert!(matches!(err, DisambError::EstimatorFailure(_)));
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn command_without_output_is_an_estimator_failure() {
    let dir = temp_dir("est_true");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\n").expect("write training");

    let err = SrilmEstimator::new("true")
        .estimate(&training, 2, &dir.join("igs.arpa"))
        .unwrap_err();
    assert!(matches!(err, DisambError::EstimatorFailure(_)));
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn reads_back_the_bigram_section() {
    let dir = temp_dir("est_script");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\nadj n$nom\n").expect("write training");

    // Arguments seen by the script: -order 2 -no-sos -no-eos -text T -lm OUT
    let script = dir.join("fake-ngram-count.sh");
    fs::write(
        &script,
        "[ \"$2\" = 2 ] || exit 3\n\
         printf '\\\\data\\\\\\nngram 1=3\\nngram 2=2\\n\\n\\\\1-grams:\\n-0.5 adj\\n-0.4 n$nom\\n-0.3 sent\\n\\n\\\\2-grams:\\n-0.2 n$nom sent\\n-0.1 adj n$nom\\n\\n\\\\end\\\\\\n' > \"$8\"\n",
    )
    .expect("write script");

    let output = dir.join("igs.arpa");
    let table = SrilmEstimator::new("sh")
        .with_args([script.to_string_lossy().into_owned()])
        .estimate(&training, 2, &output)
        .expect("estimate");

    assert!(output.exists());
    assert_eq!(table.entry_count(), 2);
    assert_eq!(table.get("n$nom", "sent"), -0.2);
    assert_eq!(table.get("adj", "n$nom"), -0.1);
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn stale_model_from_an_earlier_run_is_not_reused() {
    let dir = temp_dir("est_stale");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\n").expect("write training");
    let output = dir.join("igs.arpa");
    fs::write(&output, "\\2-grams:\n-0.9 stale old\n\n").expect("write old model");

    let err = SrilmEstimator::new("true")
        .estimate(&training, 2, &output)
        .unwrap_err();
    assert!(matches!(err, DisambError::EstimatorFailure(_)));
    assert!(!output.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn model_without_bigrams_is_an_estimator_failure() {
    let dir = temp_dir("est_unigrams");
    let training = dir.join("igs.txt");
    fs::write(&training, "n$nom sent\n").expect("write training");

    let script = dir.join("unigram-only.sh");
    fs::write(
        &script,
        "printf '\\\\data\\\\\\nngram 1=2\\n\\n\\\\1-grams:\\n-0.4 n$nom\\n-0.3 sent\\n\\n\\\\end\\\\\\n' > \"$8\"\n",
    )
    .expect("write script");

    let output = dir.join("igs.arpa");
    let err = SrilmEstimator::new("sh")
        .with_args([script.to_string_lossy().into_owned()])
        .estimate(&training, 2, &output)
        .unwrap_err();
    assert!(output.exists());
    assert!(matches!(err, DisambError::EstimatorFailure(_)));
    let _ = fs::remove_dir_all(&dir);
}
