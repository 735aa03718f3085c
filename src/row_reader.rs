use std::io::{BufRead, Lines};

use anyhow::Context;
use regex::Regex;

use crate::error::SortError;
use crate::row::Row;

/// Iterates the rows of a text stream.
///
/// Reading stops at the end of the stream or at the first empty line. Every row must have the
/// same number of fields as the first one; a mismatch is returned as an error and ends the
/// iteration, as does a read error.
pub(crate) struct RowReader<R: BufRead> {
    lines: Lines<R>,
    origin: String,
    field_separator: char,
    ignore_lines: Option<Regex>,
    columns: Option<usize>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> RowReader<R> {
    pub(crate) fn new(reader: R, origin: String, field_separator: char, ignore_lines: Option<Regex>) -> RowReader<R> {
        RowReader {
            lines: reader.lines(),
            origin,
            field_separator,
            ignore_lines,
            columns: None,
            line_number: 0,
            done: false,
        }
    }

    fn next_row(&mut self) -> Option<Result<Row, anyhow::Error>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("{}, line {}", self.origin, self.line_number + 1))
                    );
                }
            };
            self.line_number += 1;

            if line.is_empty() {
                return None;
            }

            if let Some(r) = &self.ignore_lines {
                if r.is_match(&line) {
                    continue;
                }
            }

            let row = Row::parse(&line, self.field_separator);
            let expected = *self.columns.get_or_insert(row.len());
            if row.len() != expected {
                return Some(
                    Err(
                        SortError::ColumnCount {
                            origin: self.origin.clone(),
                            line: self.line_number,
                            expected,
                            found: row.len(),
                        }.into()
                    )
                );
            }
            return Some(Ok(row));
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row, anyhow::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_row();
        match &item {
            Some(Ok(_)) => {}
            _ => self.done = true,
        }
        item
    }
}
