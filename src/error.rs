//! Error categories reported by the sort pipeline.
//!
//! Pipeline functions return [anyhow::Error]. The variants below are the domain failures a caller
//! may want to tell apart; retrieve them with `error.downcast_ref::<SortError>()`. I/O failures
//! are reported as [std::io::Error] with context attached.

use thiserror::Error;

/// Fatal conditions detected by the sort pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Directory mode and single input mode were both selected
    #[error("A directory and an input file can't be used at the same time")]
    ConflictingSources,

    /// A line does not have the same number of fields as the first line of its stream
    #[error("{origin}, line {line}: expected {expected} fields but found {found}")]
    ColumnCount {
        /// The file or stream the line was read from
        origin: String,
        /// One based line number
        line: usize,
        /// Field count of the first line in the stream
        expected: usize,
        /// Field count of the offending line
        found: usize,
    },

    /// The configured sort field is beyond the end of a row
    #[error("Requested comparison for field {index} but a row has only {fields} fields")]
    FieldIndex {
        /// Zero based field index
        index: usize,
        /// Number of fields in the offending row
        fields: usize,
    },

    /// The algorithm selector is neither 1 (comparison sort) nor 2 (tree sort)
    #[error("Unsupported sorting algorithm: {0}, expected 1 - comparison sort or 2 - tree sort")]
    UnsupportedAlgorithm(i64),

    /// The run was cancelled before it completed
    #[error("Sort cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let error = SortError::ColumnCount {
            origin: "data/a.csv".to_string(),
            line: 3,
            expected: 2,
            found: 3,
        };
        assert_eq!(error.to_string(), "data/a.csv, line 3: expected 2 fields but found 3");
        assert_eq!(
            SortError::UnsupportedAlgorithm(7).to_string(),
            "Unsupported sorting algorithm: 7, expected 1 - comparison sort or 2 - tree sort"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let error: anyhow::Error = SortError::FieldIndex { index: 4, fields: 2 }.into();
        let error = error.context("sorting");
        assert_eq!(
            error.downcast_ref::<SortError>(),
            Some(&SortError::FieldIndex { index: 4, fields: 2 })
        );
    }
}
