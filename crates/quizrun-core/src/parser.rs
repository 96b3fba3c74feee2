//! Delimited-text problem parser.
//!
//! Each row is `question,answer` with no header row. Loading is
//! all-or-nothing: the first malformed row fails the whole load.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::FormatError;
use crate::model::{Problem, ProblemSet};

/// Load a problem set from a CSV file on disk.
pub fn load_problems(path: &Path) -> Result<ProblemSet, FormatError> {
    let file = File::open(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse_problems_reader(file)?;
    tracing::debug!(path = %path.display(), problems = set.len(), "loaded problem set");
    Ok(set)
}

/// Parse a problem set from an in-memory string (useful for testing).
pub fn parse_problems_str(content: &str) -> Result<ProblemSet, FormatError> {
    parse_problems_reader(content.as_bytes())
}

/// Parse a problem set from any byte stream.
pub fn parse_problems_reader<R: Read>(reader: R) -> Result<ProblemSet, FormatError> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut problems = Vec::new();
    for record in rows.records() {
        let record = record.map_err(malformed)?;
        if record.len() != 2 {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(FormatError::FieldCount {
                line,
                found: record.len(),
            });
        }
        problems.push(Problem::new(&record[0], &record[1]));
    }

    Ok(ProblemSet::new(problems))
}

fn malformed(err: csv::Error) -> FormatError {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    FormatError::Malformed {
        line,
        message: err.to_string(),
    }
}

/// A warning from problem set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 0-based position of the problem (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a loaded set for problems that load fine but make a poor quiz.
pub fn validate_problem_set(set: &ProblemSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            index: None,
            message: "problem set is empty".into(),
        });
    }

    let mut seen = HashSet::new();
    for (index, problem) in set.iter().enumerate() {
        if problem.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: "question is blank".into(),
            });
        }
        if problem.answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: "expected answer is blank and can never be matched".into(),
            });
        } else if problem.answer.split_whitespace().nth(1).is_some() {
            // Answers are read one whitespace-delimited token at a time.
            warnings.push(ValidationWarning {
                index: Some(index),
                message: format!(
                    "expected answer '{}' contains whitespace and can never be matched",
                    problem.answer.trim()
                ),
            });
        }
        if !seen.insert(problem.question.trim()) {
            warnings.push(ValidationWarning {
                index: Some(index),
                message: format!("duplicate question: {}", problem.question.trim()),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_column_rows() {
        let set = parse_problems_str("5+8,13\n6*3,18\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(&Problem::new("5+8", "13")));
        assert_eq!(set.get(1), Some(&Problem::new("6*3", "18")));
    }

    #[test]
    fn parse_quoted_fields() {
        let set = parse_problems_str("\"what is 1,000 + 1?\",1001\n").unwrap();
        assert_eq!(set.get(0).unwrap().question, "what is 1,000 + 1?");
        assert_eq!(set.get(0).unwrap().answer, "1001");
    }

    #[test]
    fn parse_empty_source() {
        let set = parse_problems_str("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn single_field_row_fails_whole_load() {
        let err = parse_problems_str("5+8,13\n6*3\n9-4,5\n").unwrap_err();
        match err {
            FormatError::FieldCount { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn extra_field_fails() {
        let err = parse_problems_str("5+8,13,extra\n").unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"5+8,\xff\xfe\n";
        let err = parse_problems_reader(bytes).unwrap_err();
        assert!(matches!(err, FormatError::Malformed { .. }));
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_problems(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, FormatError::Open { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, "5+3,8\n").unwrap();

        let set = load_problems(&path).unwrap();
        assert_eq!(set.into_inner(), vec![Problem::new("5+3", "8")]);
    }

    #[test]
    fn validate_flags_duplicates_and_blanks() {
        let set = ProblemSet::from_pairs([
            ("5+8", "13"),
            ("5+8", "13"),
            (" ", "1"),
            ("capital?", "New York"),
            ("empty", ""),
        ]);
        let warnings = validate_problem_set(&set);
        assert!(warnings
            .iter()
            .any(|w| w.index == Some(1) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.index == Some(2) && w.message.contains("question is blank")));
        assert!(warnings
            .iter()
            .any(|w| w.index == Some(3) && w.message.contains("whitespace")));
        assert!(warnings
            .iter()
            .any(|w| w.index == Some(4) && w.message.contains("blank")));
    }

    #[test]
    fn validate_clean_set() {
        let set = parse_problems_str("5+8,13\n6*3,18\n").unwrap();
        assert!(validate_problem_set(&set).is_empty());
    }
}
