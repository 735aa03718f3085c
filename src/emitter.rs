use std::fmt::{Display, Formatter};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tempfile::Builder;

use crate::row::Row;

/// Textual representation of the sorted rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The whole collection as one line: `[[a 2] [b 1]]`
    #[default]
    Dump,
    /// One row per line, fields joined by the field separator
    Lines,
}

/// Where the rows were written
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::File(path) => write!(f, "{}", path.display()),
            Destination::Stdout => write!(f, "stdout"),
        }
    }
}

/// Writes sorted rows to a file or to standard output.
///
/// # Examples
/// ```
/// use text_row_sort::emitter::Emitter;
/// use text_row_sort::row::Row;
///
/// let rows = vec![Row::from(vec!["a", "2"]), Row::from(vec!["b", "1"])];
/// let mut out = Vec::new();
/// Emitter::new(None).write_to(&rows, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "[[a 2] [b 1]]\n");
/// ```
#[derive(Clone, Debug)]
pub struct Emitter {
    output: Option<PathBuf>,
    format: OutputFormat,
    field_separator: char,
}

impl Emitter {
    /// Create an [Emitter] writing to `output`, or to standard output when `None`.
    /// The default format is [OutputFormat::Dump] and the default field separator is ','
    pub fn new(output: Option<PathBuf>) -> Emitter {
        Emitter {
            output,
            format: OutputFormat::Dump,
            field_separator: ',',
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Emitter {
        self.format = format;
        self
    }

    /// Field separator used by [OutputFormat::Lines]
    pub fn with_field_separator(mut self, field_separator: char) -> Emitter {
        self.field_separator = field_separator;
        self
    }

    /// Write `rows` to the configured destination.
    ///
    /// A file destination is written to a temporary file in the same directory first and then
    /// renamed over the destination. On standard output the dump format is prefixed with
    /// `Result: `.
    pub fn emit(&self, rows: &[Row]) -> Result<Destination, anyhow::Error> {
        match &self.output {
            Some(path) => {
                let tmp_file = Builder::new()
                    .prefix(".text-row-sort-")
                    .suffix(".tmp")
                    .tempfile_in(Self::parent_dir(path))
                    .with_context(|| anyhow!("Failed to create a temp file for {}", path.display()))?;
                let mut writer = BufWriter::new(tmp_file);
                self.write_to(rows, &mut writer)?;
                let tmp_file = writer.into_inner()
                    .map_err(|e| anyhow!("Failed to flush output for {}: {}", path.display(), e.error()))?;
                tmp_file.persist(path)
                    .with_context(|| anyhow!("Rename output to {}", path.display()))?;
                log::info!("Wrote {} rows to {}", rows.len(), path.display());
                Ok(Destination::File(path.clone()))
            }
            None => {
                let stdout = io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                if self.format == OutputFormat::Dump {
                    write!(writer, "Result: ")?;
                }
                self.write_to(rows, &mut writer)?;
                writer.flush()?;
                Ok(Destination::Stdout)
            }
        }
    }

    /// Write `rows` in the configured format
    pub fn write_to<W: Write>(&self, rows: &[Row], writer: &mut W) -> Result<(), anyhow::Error> {
        match self.format {
            OutputFormat::Dump => {
                write!(writer, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(writer, " ")?;
                    }
                    write!(writer, "{}", row)?;
                }
                writeln!(writer, "]")?;
            }
            OutputFormat::Lines => {
                for row in rows {
                    writeln!(writer, "{}", row.join(self.field_separator))?;
                }
            }
        }
        Ok(())
    }

    fn parent_dir(path: &Path) -> &Path {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
