//! This crate sorts the rows of delimited text files, for example CSV, by one field.
//!
//! Input is either a single file (or standard input) or a directory. In directory mode the entries
//! are read by a pool of concurrent reader workers and their rows are merged into one buffer.
//! Once every row is buffered, it is sorted with one of two algorithms:
//!
//! * [Algorithm::Comparison](algorithm::Algorithm::Comparison) - the standard library sort,
//!   ascending or descending, keeping a header row in place
//! * [Algorithm::Tree](algorithm::Algorithm::Tree) - insertion into an unbalanced binary search
//!   tree and in order traversal. Always ascending, and a header row is dropped from the result.
//!
//! Fields are compared as raw strings. Every line of a file must have the same number of fields
//! as the first one, and an empty line ends a file.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use text_row_sort::emitter::Emitter;
//! use text_row_sort::order::Order;
//! use text_row_sort::sort::Sort;
//! use text_row_sort::source::Source;
//!
//! fn sort_file(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut text_row_sort = Sort::new(Source::File(input));
//!     text_row_sort.with_field(1);
//!     text_row_sort.with_order(Order::Desc);
//!     let rows = text_row_sort.sort()?;
//!     Emitter::new(Some(output)).emit(&rows)?;
//!     Ok(())
//! }
//! ```
//!

pub(crate) mod config;
pub(crate) mod content_buffer;
pub(crate) mod fan_in;
pub(crate) mod reader_pool;
pub(crate) mod row_reader;

pub mod algorithm;
pub mod cancellation;
pub mod emitter;
pub mod error;
pub mod order;
pub mod row;
pub mod sort;
pub mod sort_engine;
pub mod sort_tree;
pub mod source;
