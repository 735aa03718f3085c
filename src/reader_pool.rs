use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::thread::JoinHandle;

use anyhow::{anyhow, Context};
use crossbeam::channel::{bounded, Receiver, Sender};

use crate::cancellation::Cancellation;
use crate::config::Config;
use crate::row_reader::RowReader;
use crate::source::{FileIdentifier, RowResult};

/// The running reader workers
pub(crate) struct ReaderPool {
    streams: Vec<Receiver<RowResult>>,
    handles: Vec<JoinHandle<()>>,
}

impl ReaderPool {
    /// Start `config.tasks()` workers competing for identifiers on `identifiers`.
    ///
    /// Each worker has its own output stream which closes when the identifiers are exhausted.
    /// A file that can't be opened or parsed is reported as an error on the stream and stops the
    /// worker.
    pub(crate) fn spawn(identifiers: Receiver<FileIdentifier>, config: &Config, cancellation: &Cancellation) -> Result<ReaderPool, anyhow::Error> {
        let tasks = config.tasks().max(1);
        log::info!("Start {} reader workers", tasks);
        let mut streams = Vec::with_capacity(tasks);
        let mut handles = Vec::with_capacity(tasks);
        for task in 0..tasks {
            let (sender, receiver) = bounded(config.channel_capacity());
            let worker = ReaderWorker {
                identifiers: identifiers.clone(),
                rows: sender,
                config: config.clone(),
                cancellation: cancellation.clone(),
            };
            let handle = thread::Builder::new()
                .name(format!("reader-{task}"))
                .spawn(move || worker.run())
                .with_context(|| anyhow!("Failed to spawn reader worker {}", task))?;
            streams.push(receiver);
            handles.push(handle);
        }
        Ok(
            ReaderPool {
                streams,
                handles,
            }
        )
    }

    pub(crate) fn into_parts(self) -> (Vec<Receiver<RowResult>>, Vec<JoinHandle<()>>) {
        (self.streams, self.handles)
    }
}

struct ReaderWorker {
    identifiers: Receiver<FileIdentifier>,
    rows: Sender<RowResult>,
    config: Config,
    cancellation: Cancellation,
}

impl ReaderWorker {
    fn run(self) {
        let name = thread::current().name().unwrap_or("unnamed").to_string();
        let mut files = 0;
        for identifier in self.identifiers.iter() {
            if self.cancellation.is_cancelled() {
                log::debug!("Reader {} stops on cancellation", name);
                break;
            }
            let path = match identifier {
                Ok(path) => path,
                Err(e) => {
                    let _ = self.rows.send(Err(e));
                    break;
                }
            };
            files += 1;
            if !self.read_file(&path) {
                break;
            }
        }
        log::debug!("Reader {} finished, files: {}", name, files);
    }

    // false when the worker must stop: the file failed or nobody listens anymore
    fn read_file(&self, path: &PathBuf) -> bool {
        log::debug!("Reading {}, thread: {}", path.display(), thread::current().name().unwrap_or("unnamed"));
        let file = match File::open(path).with_context(|| format!("path: {}", path.display())) {
            Ok(file) => file,
            Err(e) => {
                let _ = self.rows.send(Err(e));
                return false;
            }
        };
        let row_reader = RowReader::new(
            BufReader::new(file),
            path.display().to_string(),
            self.config.field_separator(),
            self.config.ignore_lines().clone(),
        );
        for row in row_reader {
            let failed = row.is_err();
            if self.rows.send(row).is_err() || failed {
                return false;
            }
        }
        true
    }
}
