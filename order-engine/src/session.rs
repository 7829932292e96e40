//! Live order session
//!
//! Ties the store to its reconciliation worker. Mutations are
//! optimistic: they land in the store immediately and, when they
//! actually changed the item list, signal the worker to schedule a
//! debounced sync. Unchanged mutations (clamped decrements,
//! identity updates) signal nothing.

use crate::config::EngineConfig;
use crate::fingerprint::Fingerprint;
use crate::gateway::OrderGateway;
use crate::store::{Mutation, OrderStore, RefreshOutcome, SyncState};
use crate::sync::SyncWorker;
use parking_lot::RwLock;
use shared::models::Product;
use shared::order::{Order, OrderItem};
use shared::promotion::OrderPromotions;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// One operator's live order for one table
pub struct OrderSession {
    store: Arc<RwLock<OrderStore>>,
    dirty_tx: watch::Sender<u64>,
    shutdown: CancellationToken,
    worker: tokio::task::JoinHandle<()>,
}

impl OrderSession {
    /// Spawn a session and its reconciliation worker.
    pub fn spawn(gateway: Arc<dyn OrderGateway>, config: &EngineConfig) -> Self {
        let store = Arc::new(RwLock::new(OrderStore::new()));
        let (dirty_tx, dirty_rx) = watch::channel(0u64);
        let shutdown = CancellationToken::new();
        let worker = SyncWorker {
            store: store.clone(),
            gateway,
            dirty_rx,
            shutdown: shutdown.child_token(),
            debounce: config.debounce,
        };
        let worker = tokio::spawn(worker.run());
        Self {
            store,
            dirty_tx,
            shutdown,
            worker,
        }
    }

    /// Direct access to the store (read for display, write for
    /// flows not covered by the convenience operations).
    pub fn store(&self) -> &Arc<RwLock<OrderStore>> {
        &self.store
    }

    /// Load an authoritative order into the session (initial fetch
    /// or explicit re-fetch).
    pub fn load(&self, order: Order) {
        self.store.write().load(order);
    }

    pub fn mutate<F>(&self, updater: F) -> Mutation
    where
        F: FnOnce(&mut Vec<OrderItem>),
    {
        let result = self.store.write().mutate(updater);
        self.signal(result);
        result
    }

    pub fn add_item(
        &self,
        product: &Product,
        quantity: i32,
        comment: Option<String>,
        exclusions: Vec<String>,
    ) -> Mutation {
        let result = self
            .store
            .write()
            .add_item(product, quantity, comment, exclusions);
        self.signal(result);
        result
    }

    pub fn change_quantity(&self, item_id: &str, delta: i32) -> Mutation {
        let result = self.store.write().change_quantity(item_id, delta);
        self.signal(result);
        result
    }

    pub fn set_comment(&self, item_id: &str, comment: Option<String>) -> Mutation {
        let result = self.store.write().set_comment(item_id, comment);
        self.signal(result);
        result
    }

    pub fn remove_item(&self, item_id: &str) -> Mutation {
        let result = self.store.write().remove_item(item_id);
        self.signal(result);
        result
    }

    pub fn send_to_kitchen(&self) -> Mutation {
        let result = self.store.write().mark_pending_sent();
        self.signal(result);
        result
    }

    /// Route a background authoritative refresh through the merge
    /// policy. Never signals the worker: refreshes carry no local
    /// edits to persist.
    pub fn apply_refresh(&self, remote: Order) -> RefreshOutcome {
        self.store.write().apply_refresh(remote)
    }

    /// Accept a promotion evaluation keyed to the item list that
    /// produced it.
    pub fn apply_promotions(&self, produced_for: Fingerprint, promos: &OrderPromotions) -> bool {
        self.store.write().apply_promotions(produced_for, promos)
    }

    pub fn current_snapshot(&self) -> Option<(Fingerprint, Order)> {
        self.store.write().current_snapshot()
    }

    pub fn is_synced(&self) -> bool {
        self.store.write().is_synced(None)
    }

    pub fn sync_state(&self) -> SyncState {
        self.store.read().state()
    }

    fn signal(&self, result: Mutation) {
        if result == Mutation::Changed {
            self.dirty_tx.send_modify(|generation| *generation += 1);
        }
    }

    /// Stop the worker and wait for it to settle.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        let _ = (&mut self.worker).await;
    }
}

impl Drop for OrderSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
