use regex::Regex;

use crate::algorithm::Algorithm;
use crate::cancellation::Cancellation;
use crate::config::Config;
use crate::content_buffer::ContentBuffer;
use crate::error::SortError;
use crate::fan_in;
use crate::order::Order;
use crate::reader_pool::ReaderPool;
use crate::row::Row;
use crate::sort_engine::{is_sorted, sort_rows_with_cancellation, SortKey};
use crate::source::{enumerate_directory, read_single_input, Source};

/// Ingest and sort the rows of delimited text files.
///
/// In directory mode every entry of the directory is read by a pool of concurrent reader
/// workers, and their rows are merged into a single buffer before sorting. In single input mode
/// one file, or standard input, is read.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use text_row_sort::algorithm::Algorithm;
/// use text_row_sort::row::Row;
/// use text_row_sort::sort::Sort;
/// use text_row_sort::source::Source;
///
/// fn sort_directory(dir: PathBuf) -> Result<Vec<Row>, anyhow::Error> {
///     let mut text_row_sort = Sort::new(Source::Directory(dir));
///     // number of concurrent reader workers, 0 uses all available cores
///     text_row_sort.with_tasks(4);
///     // hold the first row out of the sort
///     text_row_sort.with_header(true);
///     text_row_sort.with_field(2);
///     text_row_sort.with_algorithm(Algorithm::Tree);
///     text_row_sort.sort()
/// }
/// ```
pub struct Sort {
    source: Source,
    tasks: usize,
    channel_capacity: usize,
    field_separator: char,
    ignore_lines: Option<Regex>,
    header: bool,
    field: usize,
    order: Order,
    algorithm: Algorithm,
}

impl Sort {
    /// Create a default Sort definition for `source`.
    ///
    /// * 3 reader workers in directory mode
    /// * unbuffered handoff between pipeline stages
    /// * the field separator is ','
    /// * no lines are ignored
    /// * no header row
    /// * sort by the first field (index 0)
    /// * default Order is Asc
    /// * default Algorithm is Comparison
    pub fn new(source: Source) -> Sort {
        Sort {
            source,
            tasks: 3,
            channel_capacity: 0,
            field_separator: ',',
            ignore_lines: None,
            header: false,
            field: 0,
            order: Order::Asc,
            algorithm: Algorithm::Comparison,
        }
    }

    /// Set the number of reader workers. Zero uses all system cores
    pub fn with_tasks(&mut self, tasks: usize) {
        self.tasks = tasks;
    }

    /// Set the capacity of the channels between pipeline stages. The default is zero: every
    /// handoff waits for the receiving side
    pub fn with_channel_capacity(&mut self, channel_capacity: usize) {
        self.channel_capacity = channel_capacity;
    }

    /// Set the field separator. The default is ','
    pub fn with_field_separator(&mut self, field_separator: char) {
        self.field_separator = field_separator;
    }

    /// Specify which lines to ignore. Each line matching the regex will be ignored and will not
    /// appear in the output.
    pub fn with_ignore_lines(&mut self, r: Regex) {
        self.ignore_lines = Some(r);
    }

    /// Hold the first row out of the sort. With [Algorithm::Comparison] it stays first, with
    /// [Algorithm::Tree] it is dropped from the result
    pub fn with_header(&mut self, header: bool) {
        self.header = header;
    }

    /// Set the zero based index of the field to sort by
    pub fn with_field(&mut self, field: usize) {
        self.field = field;
    }

    /// Set [Order]. [Algorithm::Tree] always sorts ascending
    pub fn with_order(&mut self, order: Order) {
        self.order = order;
    }

    /// Set [Algorithm]
    pub fn with_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Ingest and sort
    pub fn sort(&self) -> Result<Vec<Row>, anyhow::Error> {
        self.sort_with_cancellation(&Cancellation::new())
    }

    /// Ingest and sort, giving up with [SortError::Cancelled] once `cancellation` fires
    pub fn sort_with_cancellation(&self, cancellation: &Cancellation) -> Result<Vec<Row>, anyhow::Error> {
        let config = self.create_config();
        log::info!("Start sorting {:?}", self.source);
        let content = Self::ingest(&self.source, &config, cancellation)?;
        log::info!("Ingested {} rows", content.len());
        let sorted = sort_rows_with_cancellation(
            content.into_rows(),
            config.sort_key(),
            config.algorithm(),
            cancellation,
        )?;
        if cancellation.is_cancelled() {
            return Err(SortError::Cancelled.into());
        }
        log::info!("Finish sorting {:?}", self.source);
        Ok(sorted)
    }

    /// Check whether the input is already ordered by the configured field and order. The
    /// header row, if configured, is not checked.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        self.check_with_cancellation(&Cancellation::new())
    }

    /// Check, giving up with [SortError::Cancelled] once `cancellation` fires
    pub fn check_with_cancellation(&self, cancellation: &Cancellation) -> Result<bool, anyhow::Error> {
        let config = self.create_config();
        let content = Self::ingest(&self.source, &config, cancellation)?;
        is_sorted(&content.into_rows(), config.sort_key())
    }

    fn create_config(&self) -> Config {
        let mut tasks = self.tasks;
        if self.tasks == 0 {
            tasks = num_cpus::get();
        }

        let sort_key = SortKey::new(self.field)
            .with_order(self.order)
            .with_skip_header(self.header);

        Config::new(
            tasks,
            self.channel_capacity,
            self.field_separator,
            self.ignore_lines.clone(),
            sort_key,
            self.algorithm,
        )
    }

    fn ingest(source: &Source, config: &Config, cancellation: &Cancellation) -> Result<ContentBuffer, anyhow::Error> {
        let merged = match source {
            Source::Directory(directory) => {
                let identifiers = enumerate_directory(directory, config)?;
                let (streams, workers) = ReaderPool::spawn(identifiers, config, cancellation)?.into_parts();
                fan_in::merge(streams, workers, config.channel_capacity())?
            }
            Source::File(_) | Source::Stdin => {
                read_single_input(source, config)?
            }
        };
        ContentBuffer::drain(merged, cancellation)
    }
}
