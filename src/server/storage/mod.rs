//! Coordinated access to the order collection

pub(crate) mod file;

use crate::server::storage::file::{OrderFile, StorageError};
use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time;

/// Sole owner of the backing document. Clones share the same file, and a
/// request holds the guard for its whole load / modify / save sequence.
#[derive(Clone)]
pub(crate) struct OrderBook(Arc<Mutex<OrderFile>>);

impl OrderBook {
    pub fn new(file: OrderFile) -> Self {
        Self(Arc::new(Mutex::new(file)))
    }

    pub async fn init(&self) -> Result<bool, StorageError> {
        let file = self.0.lock().await;
        debug!("initializing orders file at {}", file.path().display());
        file.init().await
    }

    /// acquire the document with specified timeout in seconds, bail out if timeout exceeds.
    pub async fn acquire(&self, timeout: u64) -> Option<MutexGuard<'_, OrderFile>> {
        let sleep = time::sleep(Duration::from_secs(timeout));
        tokio::pin!(sleep);
        tokio::select! {
            biased;
            file = self.0.lock() => Some(file),
            _ = &mut sleep => {
                error!("timed out to acquire the order book after {} seconds", timeout);
                None
            },
        }
    }
}
