use std::cmp::Ordering;

/// Sort order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Create an [Order] from a reverse flag
    pub fn from_reverse(reverse: bool) -> Order {
        if reverse {
            Order::Desc
        } else {
            Order::Asc
        }
    }

    /// Apply this order to an ascending comparison result
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Order::Asc => {
                ordering
            }
            Order::Desc => {
                ordering.reverse()
            }
        }
    }
}
