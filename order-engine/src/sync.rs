//! Debounced single-flight reconciliation worker
//!
//! One worker task per order session. Local mutations signal a
//! watch channel; the worker debounces bursts into one outbound
//! persist, restarted on every new signal. Because a single task
//! drives the cycle, persist calls for the order are strictly
//! serialized: signals arriving while a sync is in flight coalesce
//! into the next cycle after the current one settles. There is no
//! explicit cancel for a superseded debounce — the timer is simply
//! restarted, and the payload sent is always whatever
//! `current.items` holds at send time.

use crate::gateway::OrderGateway;
use crate::store::OrderStore;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub(crate) struct SyncWorker {
    pub(crate) store: Arc<RwLock<OrderStore>>,
    pub(crate) gateway: Arc<dyn OrderGateway>,
    pub(crate) dirty_rx: watch::Receiver<u64>,
    pub(crate) shutdown: CancellationToken,
    pub(crate) debounce: Duration,
}

impl SyncWorker {
    pub(crate) async fn run(mut self) {
        tracing::debug!("sync worker started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                changed = self.dirty_rx.changed() => {
                    if changed.is_err() {
                        break; // session dropped
                    }
                }
            }
            if !self.debounce_window().await {
                break;
            }
            self.sync_once().await;
        }
        tracing::debug!("sync worker stopped");
    }

    /// Wait out the debounce window, restarting it on every new
    /// mutation signal. Returns false on shutdown.
    async fn debounce_window(&mut self) -> bool {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return false,
                _ = tokio::time::sleep(self.debounce) => return true,
                changed = self.dirty_rx.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }
            }
        }
    }

    /// One sync cycle: persist the latest items, then confirm with
    /// an authoritative fetch. Failures leave the store dirty; the
    /// next mutation retries naturally.
    async fn sync_once(&self) {
        let Some((order_id, table_id, items)) = self.store.write().begin_sync() else {
            return;
        };

        if let Err(e) = self.gateway.persist_order_items(&order_id, &items).await {
            tracing::warn!(order_id = %order_id, error = %e, "persist failed; keeping local edits");
            self.store.write().finish_sync(None);
            return;
        }

        match self.gateway.fetch_order(&table_id).await {
            Ok(Some(remote)) => {
                tracing::debug!(order_id = %order_id, "sync confirmed");
                self.store.write().finish_sync(Some(remote));
            }
            Ok(None) => {
                tracing::warn!(table_id = %table_id, "no live order after persist");
                self.store.write().finish_sync(None);
            }
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "confirmatory fetch failed");
                self.store.write().finish_sync(None);
            }
        }
    }
}
