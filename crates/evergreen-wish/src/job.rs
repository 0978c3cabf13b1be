//! Background wish request
//!
//! A provider call can take seconds, so it runs on its own thread. The frame
//! loop polls the job; `poll` never blocks.

use crate::fallback::{resolve_wish, FAILURE_FALLBACK};
use crate::provider::{WishProvider, WishRequest};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::warn;

pub struct WishJob {
    receiver: Option<Receiver<String>>,
    ready: Option<String>,
}

impl WishJob {
    /// Start resolving a wish on a background thread
    pub fn spawn(provider: Arc<dyn WishProvider>, request: WishRequest) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("evergreen-wish".to_string())
            .spawn(move || {
                let text = resolve_wish(provider.as_ref(), &request);
                // The session may be gone by now
                let _ = tx.send(text);
            });

        match spawned {
            Ok(_) => Self {
                receiver: Some(rx),
                ready: None,
            },
            Err(e) => {
                warn!("[wish] could not start request thread: {e}");
                Self::resolved(FAILURE_FALLBACK.to_string())
            }
        }
    }

    /// A job that is already done
    pub fn resolved(text: String) -> Self {
        Self {
            receiver: None,
            ready: Some(text),
        }
    }

    /// The wish, exactly once, as soon as it is available
    pub fn poll(&mut self) -> Option<String> {
        if let Some(text) = self.ready.take() {
            return Some(text);
        }
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(text) => {
                self.receiver = None;
                Some(text)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("[wish] request thread ended without an answer");
                self.receiver = None;
                Some(FAILURE_FALLBACK.to_string())
            }
        }
    }

    /// Whether `poll` has nothing more to hand out
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none() && self.ready.is_none()
    }
}
