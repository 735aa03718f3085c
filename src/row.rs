use std::fmt::{Display, Formatter};

/// One parsed line of a delimited text file.
///
/// A Row is an ordered sequence of string fields. Rows are not modified after they are parsed.
/// The derived ordering compares all fields and is unrelated to the configured sort field.
///
/// # Examples
/// ```
/// use text_row_sort::row::Row;
///
/// let row = Row::parse("b,1", ',');
/// assert_eq!(row, Row::from(vec!["b", "1"]));
/// assert_eq!(row.field(1), Some("1"));
/// assert_eq!(row.len(), 2);
/// assert!(!row.is_empty());
/// assert_eq!(row.to_string(), "[b 1]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Create a new [Row] from its fields
    pub fn new(fields: Vec<String>) -> Row {
        Row {
            fields
        }
    }

    /// Split a line on `field_separator`. Quoting is not supported.
    pub fn parse(line: &str, field_separator: char) -> Row {
        Row {
            fields: line.split(field_separator).map(|field| field.to_string()).collect()
        }
    }

    /// Get the field at zero based `index`
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|field| field.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Join the fields back into a line
    pub fn join(&self, field_separator: char) -> String {
        let mut separator = [0u8; 4];
        self.fields.join(field_separator.encode_utf8(&mut separator))
    }

    // index must be validated against the row length by the caller
    pub(crate) fn key(&self, index: usize) -> &str {
        self.fields[index].as_str()
    }
}

impl<S: Into<String>> From<Vec<S>> for Row {
    fn from(fields: Vec<S>) -> Self {
        Row::new(fields.into_iter().map(Into::into).collect())
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.fields.join(" "))
    }
}
