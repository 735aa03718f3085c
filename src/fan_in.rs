use std::thread;
use std::thread::JoinHandle;

use anyhow::{anyhow, Context};
use crossbeam::channel::{bounded, Receiver};
use crossbeam::sync::WaitGroup;

use crate::source::RowResult;

/// Merge the worker `streams` into one stream, in no particular order.
///
/// One forwarder thread per stream copies items to the merged stream. A closer thread waits on a
/// [WaitGroup] for all forwarders, then joins the `workers` and closes the merged stream, so it
/// closes exactly once and only after every worker stream is drained. A panicked worker is
/// reported as an error item before closing.
pub(crate) fn merge(streams: Vec<Receiver<RowResult>>, workers: Vec<JoinHandle<()>>, channel_capacity: usize) -> Result<Receiver<RowResult>, anyhow::Error> {
    let (merged_sender, merged_receiver) = bounded(channel_capacity);
    let wait_group = WaitGroup::new();

    for (index, stream) in streams.into_iter().enumerate() {
        let sender = merged_sender.clone();
        let forwarder_wait_group = wait_group.clone();
        thread::Builder::new()
            .name(format!("forwarder-{index}"))
            .spawn(move || {
                for row in stream.iter() {
                    if sender.send(row).is_err() {
                        break;
                    }
                }
                drop(forwarder_wait_group);
            })
            .with_context(|| anyhow!("Failed to spawn forwarder {}", index))?;
    }

    thread::Builder::new()
        .name("fan-in-closer".to_string())
        .spawn(move || {
            wait_group.wait();
            for worker in workers {
                let name = worker.thread().name().unwrap_or("unnamed").to_string();
                if worker.join().is_err() {
                    let _ = merged_sender.send(Err(anyhow!("Reader worker {} panicked", name)));
                }
            }
            log::debug!("All reader streams drained, closing the merged stream");
            drop(merged_sender);
        })
        .with_context(|| anyhow!("Failed to spawn the fan-in closer"))?;

    Ok(merged_receiver)
}
