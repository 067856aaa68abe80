//! Line-level token extraction for the VISL CG style tagged corpus.
//!
//! The corpus looks like this (tabs shown as `→`):
//!
//! ```text
//! "<мұғалім>"
//! →"мұғалім" n nom @root
//! →→"е" cop aor p3 sg @X
//! ```
//!
//! A quoted surface form opens a word, a singly indented line carries
//! `root IG`, and a doubly indented line is an IG continuation (a copula-like
//! fragment with no root of its own). Spaces inside roots and IGs are replaced
//! by the join marker `$`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::errors::ParseIssue;
use crate::JOIN_MARKER;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"<(.*)>""#).expect("word pattern is valid"));

// Shortest tab-prefixed run that is followed by whitespace and `@`.
static ROOT_IG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\t(.*?)\s@").expect("root/IG pattern is valid"));

/// Which pattern to try on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Word,
    Root,
    Ig,
}

/// A classified corpus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// Surface word, quoting removed.
    Word(String),
    /// Root with the IG of its analysis.
    RootIg { root: String, ig: String },
    /// IG fragment that extends the previous word's analysis.
    Continuation(String),
}

/// Extract a `(word, None)`, `(root, ig)` or `(None, fragment)` pair.
///
/// Lines that match nothing, or whose match is malformed, give `(None, None)`.
pub fn extract(line: &str, category: Category) -> (Option<String>, Option<String>) {
    let Some(candidate) = matched_candidate(line, category) else {
        return (None, None);
    };
    match classify(candidate) {
        Ok(LineToken::Word(word)) => (Some(word), None),
        Ok(LineToken::RootIg { root, ig }) => (Some(root), Some(ig)),
        Ok(LineToken::Continuation(fragment)) => (None, Some(fragment)),
        Err(issue) => {
            trace!(line, %issue, "skipping corpus line");
            (None, None)
        }
    }
}

/// Classify a whole line, trying the word pattern before the root/IG one.
pub fn classify_line(line: &str) -> Result<LineToken, ParseIssue> {
    let candidate = matched_candidate(line, Category::Word)
        .or_else(|| matched_candidate(line, Category::Root))
        .ok_or(ParseIssue::ParseMismatch)?;
    classify(candidate)
}

fn matched_candidate(line: &str, category: Category) -> Option<&str> {
    match category {
        Category::Word => WORD_PATTERN.find(line).map(|m| m.as_str()),
        Category::Root | Category::Ig => ROOT_IG_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|inner| &line[..inner.end()]),
    }
}

fn classify(candidate: &str) -> Result<LineToken, ParseIssue> {
    match candidate.matches('\t').count() {
        0 => {
            let word: String = candidate
                .chars()
                .filter(|c| !matches!(c, '"' | '<' | '>'))
                .collect();
            if word.is_empty() {
                return Err(ParseIssue::ParseMismatch);
            }
            Ok(LineToken::Word(word))
        }
        1 => split_root_ig(candidate.trim_matches('\t')),
        _ => {
            let fragment = join_spaces(&candidate.trim_matches('\t').replace('"', ""));
            if fragment.is_empty() {
                return Err(ParseIssue::MalformedIgFragment);
            }
            Ok(LineToken::Continuation(fragment))
        }
    }
}

/// Split `"root" ig ig ...` at the last quote.
///
/// The quote's char index is taken before the quotes are removed, so the
/// root half also picks up the character that followed the closing quote;
/// trimming drops it when it is the usual space.
fn split_root_ig(segment: &str) -> Result<LineToken, ParseIssue> {
    let index = segment
        .chars()
        .enumerate()
        .filter(|&(_, c)| c == '"')
        .last()
        .map(|(i, _)| i)
        .ok_or(ParseIssue::MalformedIgFragment)?;

    let unquoted: Vec<char> = segment.chars().filter(|&c| c != '"').collect();
    let split = index.min(unquoted.len());
    let root = join_spaces(unquoted[..split].iter().collect::<String>().trim());
    let ig = join_spaces(unquoted[split..].iter().collect::<String>().trim());

    if root.is_empty() || ig.is_empty() {
        return Err(ParseIssue::MalformedIgFragment);
    }
    Ok(LineToken::RootIg { root, ig })
}

fn join_spaces(s: &str) -> String {
    s.replace(' ', &JOIN_MARKER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_line() {
        assert_eq!(
            extract("\"<Азамат>\"", Category::Word),
            (Some("Азамат".to_string()), None)
        );
        // The root/IG pattern never matches a word line.
        assert_eq!(extract("\"<Азамат>\"", Category::Root), (None, None));
    }

    #[test]
    fn root_and_ig_line() {
        let line = "\t\"Азамат\" np ant m nom @subj";
        assert_eq!(
            extract(line, Category::Root),
            (Some("Азамат".to_string()), Some("np$ant$m$nom".to_string()))
        );
        assert_eq!(extract(line, Category::Word), (None, None));
    }

    #[test]
    fn multiword_root_is_joined() {
        let line = "\t\"жақсы көр\" v tv aor p3 pl @root";
        assert_eq!(
            extract(line, Category::Ig),
            (Some("жақсы$көр".to_string()), Some("v$tv$aor$p3$pl".to_string()))
        );
    }

    #[test]
    fn sentence_terminator_line() {
        assert_eq!(
            extract("\t\".\" sent @X", Category::Root),
            (Some(".".to_string()), Some("sent".to_string()))
        );
    }

    #[test]
    fn copula_continuation_line() {
        assert_eq!(
            extract("\t\t\"е\" cop aor p3 sg @X", Category::Root),
            (None, Some("е$cop$aor$p3$sg".to_string()))
        );
        assert_eq!(
            classify_line("\t\t\"е\" cop aor p3 sg @X"),
            Ok(LineToken::Continuation("е$cop$aor$p3$sg".to_string()))
        );
    }

    #[test]
    fn stops_at_first_feature_marker() {
        assert_eq!(
            extract("\t\"ел\" n loc @amod @extra", Category::Root),
            (Some("ел".to_string()), Some("n$loc".to_string()))
        );
    }

    #[test]
    fn unmatched_lines() {
        for line in ["", "plain text", "\t\"ел\" n loc", "<ел>", "  \"ел\" n @x"] {
            assert_eq!(extract(line, Category::Word), (None, None), "{line:?}");
            assert_eq!(extract(line, Category::Root), (None, None), "{line:?}");
            assert_eq!(classify_line(line), Err(ParseIssue::ParseMismatch));
        }
    }

    #[test]
    fn malformed_root_lines() {
        // No quote at all.
        assert_eq!(
            classify_line("\tел n loc @x"),
            Err(ParseIssue::MalformedIgFragment)
        );
        // Quoted root but no IG.
        assert_eq!(
            classify_line("\t\"ел\" @x"),
            Err(ParseIssue::MalformedIgFragment)
        );
        assert_eq!(extract("\t\"ел\" @x", Category::Root), (None, None));
    }
}
