//! Broadcast queue for one-to-many message distribution.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{Result, SigmapError};

/// Broadcast queue where every subscriber receives every message.
///
/// Backed by tokio's broadcast channel. Sending with no subscribers is not an
/// error: notifications are still recorded by their owner.
#[derive(Clone)]
pub struct BroadcastQueue<T> {
    sender: Arc<broadcast::Sender<T>>,
}

impl<T: Clone> BroadcastQueue<T> {
    /// create a new broadcast queue
    pub fn new(cap: usize) -> Arc<Self> {
        let (tx, _) = broadcast::channel(cap.max(1));

        Arc::new(Self {
            sender: Arc::new(tx),
        })
    }

    /// send a message to the queue, returns the number of receivers reached
    pub fn send(
        &self,
        msg: T,
    ) -> Result<usize> {
        if self.sender.receiver_count() == 0 {
            return Ok(0);
        }
        self.sender.send(msg).map_err(|e| SigmapError::Convert(e.to_string()))
    }

    /// subscribe to the queue
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }
}
