use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam::channel::{bounded, Receiver, Sender};

/// Cancellation token shared between a supervisor and a running sort.
///
/// Cancelling disconnects an internal channel, so any thread blocked in a `select!` on
/// [Cancellation::receiver] wakes up, and keeps waking up on every later wait. Clones share state.
///
/// # Examples
/// ```
/// use text_row_sort::cancellation::Cancellation;
///
/// let cancellation = Cancellation::new();
/// let handler_cancellation = cancellation.clone();
/// handler_cancellation.cancel();
/// assert!(cancellation.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
    sender: Arc<Mutex<Option<Sender<()>>>>,
    receiver: Receiver<()>,
}

impl Cancellation {
    pub fn new() -> Cancellation {
        let (sender, receiver) = bounded(0);
        Cancellation {
            cancelled: Arc::new(AtomicBool::new(false)),
            sender: Arc::new(Mutex::new(Some(sender))),
            receiver,
        }
    }

    /// Request cancellation. Calling it more than once has no further effect.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            log::info!("Cancellation requested");
            if let Ok(mut sender) = self.sender.lock() {
                sender.take();
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Never yields a message. Becomes ready (disconnected) once cancelled.
    pub(crate) fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Cancellation::new()
    }
}
