use crossbeam::channel::{select, Receiver};

use crate::cancellation::Cancellation;
use crate::error::SortError;
use crate::row::Row;
use crate::source::RowResult;

enum Event {
    Row(RowResult),
    Closed,
    Cancelled,
}

/// Rows collected from the merged stream, in arrival order
#[derive(Debug, Default)]
pub(crate) struct ContentBuffer {
    rows: Vec<Row>,
}

impl ContentBuffer {
    /// Drain `merged` until it closes.
    ///
    /// Returns the first error item, or [SortError::Cancelled] when `cancellation` fires while
    /// waiting or has fired by the time `merged` closes. Either way `merged` is dropped, which stops
    /// the upstream threads.
    pub(crate) fn drain(merged: Receiver<RowResult>, cancellation: &Cancellation) -> Result<ContentBuffer, anyhow::Error> {
        let mut rows = Vec::new();
        loop {
            let event = select! {
                recv(merged) -> message => match message {
                    Ok(row) => Event::Row(row),
                    Err(_) => Event::Closed,
                },
                recv(cancellation.receiver()) -> _ => Event::Cancelled,
            };
            match event {
                Event::Row(row) => rows.push(row?),
                Event::Closed => break,
                Event::Cancelled => return Err(SortError::Cancelled.into()),
            }
        }
        // select picks at random when both are ready
        if cancellation.is_cancelled() {
            return Err(SortError::Cancelled.into());
        }
        Ok(
            ContentBuffer {
                rows
            }
        )
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use anyhow::anyhow;
    use crossbeam::channel::bounded;

    use super::*;

    #[test]
    fn test_drain_in_arrival_order() {
        let (sender, receiver) = bounded(0);
        let producer = thread::spawn(move || {
            for value in ["b", "a", "c"] {
                sender.send(Ok(Row::from(vec![value]))).unwrap();
            }
        });
        let buffer = ContentBuffer::drain(receiver, &Cancellation::new()).unwrap();
        producer.join().unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.into_rows(), vec![Row::from(vec!["b"]), Row::from(vec!["a"]), Row::from(vec!["c"])]);
    }

    #[test]
    fn test_drain_stops_on_error() {
        let (sender, receiver) = bounded(1);
        sender.send(Err(anyhow!("broken file"))).unwrap();
        let error = ContentBuffer::drain(receiver, &Cancellation::new()).unwrap_err();
        assert_eq!(error.to_string(), "broken file");
        // the buffer hung up
        assert!(sender.send(Ok(Row::from(vec!["a"]))).is_err());
    }

    #[test]
    fn test_drain_cancelled() {
        let (_sender, receiver) = bounded::<RowResult>(0);
        let cancellation = Cancellation::new();
        cancellation.cancel();
        let error = ContentBuffer::drain(receiver, &cancellation).unwrap_err();
        assert_eq!(error.downcast_ref::<SortError>(), Some(&SortError::Cancelled));
    }

    #[test]
    fn test_drain_closed_after_cancel() {
        let (sender, receiver) = bounded(1);
        sender.send(Ok(Row::from(vec!["a"]))).unwrap();
        drop(sender);
        let cancellation = Cancellation::new();
        cancellation.cancel();
        let error = ContentBuffer::drain(receiver, &cancellation).unwrap_err();
        assert_eq!(error.downcast_ref::<SortError>(), Some(&SortError::Cancelled));
    }
}
