use std::fs;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Context};
use crossbeam::channel::{bounded, Receiver};

use crate::config::Config;
use crate::error::SortError;
use crate::row::Row;
use crate::row_reader::RowReader;

pub(crate) type RowResult = Result<Row, anyhow::Error>;
pub(crate) type FileIdentifier = Result<PathBuf, anyhow::Error>;

/// Where the rows come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Every entry of a directory, read concurrently
    Directory(PathBuf),
    /// A single file
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl Source {
    /// Select the source from the directory and input file options.
    ///
    /// Giving both is a configuration error. Giving neither selects standard input.
    ///
    /// # Examples
    /// ```
    /// use std::path::PathBuf;
    /// use text_row_sort::source::Source;
    ///
    /// assert_eq!(Source::select(None, None).unwrap(), Source::Stdin);
    /// assert_eq!(Source::select(Some(PathBuf::from("data")), None).unwrap(), Source::Directory(PathBuf::from("data")));
    /// assert!(Source::select(Some(PathBuf::from("data")), Some(PathBuf::from("a.csv"))).is_err());
    /// ```
    pub fn select(directory: Option<PathBuf>, input: Option<PathBuf>) -> Result<Source, SortError> {
        match (directory, input) {
            (Some(_), Some(_)) => Err(SortError::ConflictingSources),
            (Some(directory), None) => Ok(Source::Directory(directory)),
            (None, Some(input)) => Ok(Source::File(input)),
            (None, None) => Ok(Source::Stdin),
        }
    }
}

/// List `directory` and feed the path of every entry, in listing order, from a dedicated thread.
///
/// The directory is opened before the thread starts so a missing or unreadable directory fails
/// before anything is read. The returned channel closes once all entries are sent, or as soon as
/// every receiver is gone.
pub(crate) fn enumerate_directory(directory: &PathBuf, config: &Config) -> Result<Receiver<FileIdentifier>, anyhow::Error> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("path: {}", directory.display()))?;
    let (sender, receiver) = bounded(config.channel_capacity());
    let origin = directory.clone();
    thread::Builder::new()
        .name("enumerator".to_string())
        .spawn(move || {
            let mut count = 0;
            for entry in entries {
                let identifier = entry
                    .map(|entry| entry.path())
                    .with_context(|| format!("path: {}", origin.display()));
                let failed = identifier.is_err();
                if sender.send(identifier).is_err() || failed {
                    break;
                }
                count += 1;
            }
            log::debug!("Enumerated {} entries in {}", count, origin.display());
        })
        .with_context(|| anyhow!("Failed to spawn the enumerator thread"))?;
    Ok(receiver)
}

/// Parse a single input, a file or standard input, on a dedicated thread.
///
/// This is the merged row stream in single input mode.
pub(crate) fn read_single_input(source: &Source, config: &Config) -> Result<Receiver<RowResult>, anyhow::Error> {
    let (reader, origin): (Box<dyn BufRead + Send>, String) = match source {
        Source::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("path: {}", path.display()))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        Source::Stdin => {
            (Box::new(BufReader::new(io::stdin())), "stdin".to_string())
        }
        Source::Directory(path) => {
            return Err(anyhow!("{} is a directory source, not a single input", path.display()));
        }
    };

    let (sender, receiver) = bounded(config.channel_capacity());
    let row_reader = RowReader::new(reader, origin, config.field_separator(), config.ignore_lines().clone());
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            for row in row_reader {
                if sender.send(row).is_err() {
                    break;
                }
            }
        })
        .with_context(|| anyhow!("Failed to spawn the input thread"))?;
    Ok(receiver)
}
