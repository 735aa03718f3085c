use regex::Regex;

use crate::algorithm::Algorithm;
use crate::sort_engine::SortKey;

#[derive(Clone, Debug)]
pub(crate) struct Config {
    tasks: usize,
    channel_capacity: usize,
    field_separator: char,
    ignore_lines: Option<Regex>,
    sort_key: SortKey,
    algorithm: Algorithm,
}

impl Config {
    pub(crate) fn new(
        tasks: usize,
        channel_capacity: usize,
        field_separator: char,
        ignore_lines: Option<Regex>,
        sort_key: SortKey,
        algorithm: Algorithm,
    ) -> Config {
        Config {
            tasks,
            channel_capacity,
            field_separator,
            ignore_lines,
            sort_key,
            algorithm,
        }
    }

    pub(crate) fn tasks(&self) -> usize {
        self.tasks
    }

    pub(crate) fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub(crate) fn field_separator(&self) -> char {
        self.field_separator
    }

    pub(crate) fn ignore_lines(&self) -> &Option<Regex> {
        &self.ignore_lines
    }

    pub(crate) fn sort_key(&self) -> &SortKey {
        &self.sort_key
    }

    pub(crate) fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}
