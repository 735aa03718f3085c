use crate::error::SortError;
use crate::sort_engine::{ComparisonSort, SortStrategy};
use crate::sort_tree::TreeSort;

/// Sorting algorithm
///
/// # Examples
/// ```
/// use text_row_sort::algorithm::Algorithm;
///
/// assert_eq!(Algorithm::try_from(2i64).unwrap(), Algorithm::Tree);
/// assert!(Algorithm::try_from(3i64).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// General purpose in place comparison sort, selector 1
    #[default]
    Comparison,
    /// Binary search tree insertion followed by in order traversal, selector 2
    Tree,
}

impl Algorithm {
    pub(crate) fn strategy(&self) -> &'static dyn SortStrategy {
        match self {
            Algorithm::Comparison => &ComparisonSort,
            Algorithm::Tree => &TreeSort,
        }
    }
}

impl TryFrom<i64> for Algorithm {
    type Error = SortError;

    fn try_from(selector: i64) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(Algorithm::Comparison),
            2 => Ok(Algorithm::Tree),
            _ => Err(SortError::UnsupportedAlgorithm(selector)),
        }
    }
}
