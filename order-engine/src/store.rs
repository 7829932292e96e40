//! In-memory order store
//!
//! Owns the order aggregate for one session: the locally edited
//! `current` copy and the `original` copy last confirmed to match
//! the backend. All writes go through `load`, `mutate`, or the
//! sync hooks — nothing else touches the aggregate, so there are
//! no torn reads between snapshot comparison and sync.
//!
//! Local mutation errors (e.g. decrementing below 1) are clamped,
//! never returned: they are a policy choice, not an error
//! condition.

use crate::fingerprint::{Fingerprint, SnapshotCache};
use shared::models::Product;
use shared::order::{ItemState, KitchenStatus, Order, OrderItem};
use shared::promotion::OrderPromotions;
use shared::util;

/// Reconciliation state of the live order session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No pending local edits, no sync in flight
    #[default]
    Idle,
    /// Local edits exist that have not been sent yet
    Dirty,
    /// Exactly one persist call in flight
    Syncing,
}

/// Outcome of a `mutate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The item list's visible fields changed; a sync is due
    Changed,
    /// No externally-visible change; nothing scheduled
    Unchanged,
}

/// Outcome of an authoritative refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The remote order replaced both local copies
    Applied,
    /// Local edits diverge; the snapshot is held until fingerprints
    /// match again
    Held,
}

/// The in-memory order aggregate and its sync bookkeeping
#[derive(Default)]
pub struct OrderStore {
    current: Option<Order>,
    /// Last state known to match the backend
    original: Option<Order>,
    /// Authoritative snapshot held back while local edits diverge
    pending_remote: Option<Order>,
    /// Bumped on every change to `current.items`
    revision: u64,
    original_revision: u64,
    current_cache: SnapshotCache,
    original_cache: SnapshotCache,
    state: SyncState,
    /// Discount from the last accepted promotion evaluation
    discount: i64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    pub fn original(&self) -> Option<&Order> {
        self.original.as_ref()
    }

    pub fn pending_remote(&self) -> Option<&Order> {
        self.pending_remote.as_ref()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Displayed total of the current order (subtotal − discount)
    pub fn total(&self) -> i64 {
        self.current.as_ref().map(|o| o.total).unwrap_or(0)
    }

    pub fn subtotal(&self) -> i64 {
        self.current.as_ref().map(|o| o.subtotal).unwrap_or(0)
    }

    /// Replace both copies with an authoritative order. Used on the
    /// initial fetch and on every conflict-free refresh.
    pub fn load(&mut self, order: Order) {
        self.original = Some(order.clone());
        self.current = Some(order);
        self.revision += 1;
        self.original_revision += 1;
        self.current_cache.reset();
        self.original_cache.reset();
        self.pending_remote = None;
        self.discount = 0;
        self.state = SyncState::Idle;
        self.recompute_totals();
    }

    /// Fingerprint of `current.items`, cached per revision
    pub fn current_fingerprint(&mut self) -> Fingerprint {
        match &self.current {
            Some(order) => self.current_cache.get(self.revision, &order.items),
            None => Fingerprint::EMPTY,
        }
    }

    /// Fingerprint of `original.items`, cached per revision
    pub fn original_fingerprint(&mut self) -> Fingerprint {
        match &self.original {
            Some(order) => self.original_cache.get(self.original_revision, &order.items),
            None => Fingerprint::EMPTY,
        }
    }

    /// Whether local edits exist that the backend has not confirmed
    pub fn is_dirty(&mut self) -> bool {
        self.current_fingerprint() != self.original_fingerprint()
    }

    /// Compare `current.items` against `original` or an explicitly
    /// supplied reference order. Gates both refresh application and
    /// "confirm before navigating away" prompts.
    pub fn is_synced(&mut self, reference: Option<&Order>) -> bool {
        match reference {
            Some(order) => self.current_fingerprint() == Fingerprint::of(&order.items),
            None => !self.is_dirty(),
        }
    }

    /// Apply `updater` to the current item list. Recomputes totals
    /// and marks the store dirty only when the list's visible
    /// fields actually changed.
    pub fn mutate<F>(&mut self, updater: F) -> Mutation
    where
        F: FnOnce(&mut Vec<OrderItem>),
    {
        let before = self.current_fingerprint();
        let Some(order) = self.current.as_mut() else {
            return Mutation::Unchanged;
        };
        updater(&mut order.items);
        self.revision += 1;
        if self.current_fingerprint() == before {
            return Mutation::Unchanged;
        }
        self.recompute_totals();
        if self.state == SyncState::Idle {
            self.state = SyncState::Dirty;
        }
        Mutation::Changed
    }

    /// Add a product to the order. Merges into an existing
    /// compatible pending line (same product, same trimmed comment,
    /// same exclusion set) instead of duplicating a row.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i32,
        comment: Option<String>,
        exclusions: Vec<String>,
    ) -> Mutation {
        let incoming = OrderItem {
            id: util::temp_item_id(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: quantity.max(1),
            comment,
            exclusions,
            state: ItemState::Pending,
            promotion_applied: false,
            original_price: None,
        };
        self.mutate(|items| {
            match items.iter_mut().find(|line| line.can_merge_with(&incoming)) {
                Some(line) => {
                    line.quantity += incoming.quantity;
                    // the merged row is a new pending line as far
                    // as the backend is concerned
                    line.id = util::temp_item_id();
                }
                None => items.push(incoming),
            }
        })
    }

    /// Change an item's quantity by `delta`, clamped at 1. A
    /// decrement on a quantity-1 line is a no-op: nothing recorded,
    /// no sync scheduled.
    pub fn change_quantity(&mut self, item_id: &str, delta: i32) -> Mutation {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                item.quantity = (item.quantity + delta).max(1);
            }
        })
    }

    pub fn set_comment(&mut self, item_id: &str, comment: Option<String>) -> Mutation {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
                item.comment = comment;
            }
        })
    }

    pub fn remove_item(&mut self, item_id: &str) -> Mutation {
        self.mutate(|items| items.retain(|i| i.id != item_id))
    }

    /// Send-to-kitchen transition: every pending line becomes Sent.
    pub fn mark_pending_sent(&mut self) -> Mutation {
        let result = self.mutate(|items| {
            for item in items.iter_mut().filter(|i| i.state == ItemState::Pending) {
                item.state = ItemState::Sent;
            }
        });
        if result == Mutation::Changed {
            if let Some(order) = self.current.as_mut() {
                order.status = KitchenStatus::Sent;
            }
        }
        result
    }

    /// Merge policy for authoritative refreshes arriving while
    /// local edits may be outstanding:
    ///
    /// - fingerprint-equal to `current` ⇒ applied (it confirms the
    ///   in-flight write)
    /// - no local edits outstanding ⇒ applied
    /// - otherwise held as a pending snapshot, applied once local
    ///   state becomes fingerprint-equal to it
    pub fn apply_refresh(&mut self, remote: Order) -> RefreshOutcome {
        if self.current.is_none() {
            self.load(remote);
            return RefreshOutcome::Applied;
        }
        let remote_fp = Fingerprint::of(&remote.items);
        if remote_fp == self.current_fingerprint() {
            self.load(remote);
            return RefreshOutcome::Applied;
        }
        if self.state == SyncState::Idle && !self.is_dirty() {
            self.load(remote);
            return RefreshOutcome::Applied;
        }
        tracing::debug!(
            order_id = %remote.id,
            "refresh diverges from local edits; holding snapshot"
        );
        self.pending_remote = Some(remote);
        RefreshOutcome::Held
    }

    /// Apply the held server snapshot if local state converged to
    /// it. Returns whether it was applied.
    pub fn try_apply_pending(&mut self) -> bool {
        let current_fp = self.current_fingerprint();
        match self.pending_remote.take() {
            Some(remote) if Fingerprint::of(&remote.items) == current_fp => {
                self.load(remote);
                true
            }
            other => {
                self.pending_remote = other;
                false
            }
        }
    }

    /// Accept a promotion evaluation result, but only if it was
    /// produced for the item list the store still holds
    /// (last-evaluation-wins: a stale result is ignored).
    pub fn apply_promotions(
        &mut self,
        produced_for: Fingerprint,
        promotions: &OrderPromotions,
    ) -> bool {
        if self.current.is_none() || produced_for != self.current_fingerprint() {
            return false;
        }
        self.discount = promotions.total_discount.max(0);
        self.recompute_totals();
        true
    }

    /// Clone of the current order together with its fingerprint,
    /// for re-keying an asynchronous evaluation to the list that
    /// produced it.
    pub fn current_snapshot(&mut self) -> Option<(Fingerprint, Order)> {
        let fp = self.current_fingerprint();
        self.current.clone().map(|order| (fp, order))
    }

    /// Start a sync cycle: snapshot the latest items for the wire.
    /// Returns None when there is nothing to send.
    pub(crate) fn begin_sync(&mut self) -> Option<(String, String, Vec<OrderItem>)> {
        if !self.is_dirty() {
            if self.state == SyncState::Dirty {
                self.state = SyncState::Idle;
            }
            return None;
        }
        let payload = self
            .current
            .as_ref()
            .map(|o| (o.id.clone(), o.table_id.clone(), o.items.clone()))?;
        self.state = SyncState::Syncing;
        Some(payload)
    }

    /// Settle a sync cycle. A confirmatory fetch, when present,
    /// goes through the refresh merge policy; on failure the store
    /// simply stays dirty and retries on the next cycle.
    pub(crate) fn finish_sync(&mut self, confirmed: Option<Order>) {
        if let Some(remote) = confirmed {
            self.apply_refresh(remote);
        }
        if self.state == SyncState::Syncing {
            self.state = if self.is_dirty() {
                SyncState::Dirty
            } else {
                SyncState::Idle
            };
        }
        self.try_apply_pending();
    }

    /// Discount is clamped to the subtotal: the displayed total is
    /// never negative.
    fn recompute_totals(&mut self) {
        let discount = self.discount;
        if let Some(order) = self.current.as_mut() {
            order.subtotal = order.compute_subtotal();
            order.total = order.subtotal - discount.clamp(0, order.subtotal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::promotion::{AppliedPromotion, PromotionType};

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "cat-1".to_string(),
            price,
            sort_order: 0,
            is_active: true,
        }
    }

    fn empty_order() -> Order {
        Order {
            id: "o1".to_string(),
            table_id: "t1".to_string(),
            items: vec![],
            subtotal: 0,
            total: 0,
            status: KitchenStatus::NotSent,
            payment: None,
            created_at: util::now_millis(),
        }
    }

    fn loaded_store() -> OrderStore {
        let mut store = OrderStore::new();
        store.load(empty_order());
        store
    }

    #[test]
    fn test_load_resets_everything() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        assert!(store.is_dirty());

        store.load(empty_order());
        assert!(!store.is_dirty());
        assert_eq!(store.state(), SyncState::Idle);
        assert!(store.pending_remote().is_none());
    }

    #[test]
    fn test_mutate_marks_dirty_and_recomputes() {
        let mut store = loaded_store();
        let result = store.add_item(&product("p1", 8000), 2, None, vec![]);
        assert_eq!(result, Mutation::Changed);
        assert_eq!(store.state(), SyncState::Dirty);
        assert_eq!(store.subtotal(), 16000);
        assert_eq!(store.total(), 16000);
    }

    #[test]
    fn test_identity_mutation_is_unchanged() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        store.finish_sync(Some(store.current().unwrap().clone()));
        assert!(store.is_synced(None));

        let result = store.mutate(|_items| {});
        assert_eq!(result, Mutation::Unchanged);
        assert!(store.is_synced(None));
        assert_eq!(store.state(), SyncState::Idle);
    }

    #[test]
    fn test_merge_law_sums_quantities() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, Some("no onions".to_string()), vec![]);
        store.add_item(&product("p1", 8000), 1, Some(" no onions ".to_string()), vec![]);

        let order = store.current().unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.subtotal, 16000);
    }

    #[test]
    fn test_merge_allocates_fresh_temp_id() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        let first_id = store.current().unwrap().items[0].id.clone();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        let merged_id = store.current().unwrap().items[0].id.clone();
        assert_ne!(first_id, merged_id);
        assert!(util::is_temp_id(&merged_id));
    }

    #[test]
    fn test_different_exclusions_do_not_merge() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec!["ing-1".to_string()]);
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        assert_eq!(store.current().unwrap().items.len(), 2);
    }

    #[test]
    fn test_decrement_clamped_at_one() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        store.finish_sync(Some(store.current().unwrap().clone()));
        let item_id = store.current().unwrap().items[0].id.clone();

        let result = store.change_quantity(&item_id, -1);
        assert_eq!(result, Mutation::Unchanged);
        assert_eq!(store.current().unwrap().items[0].quantity, 1);
        assert_eq!(store.state(), SyncState::Idle);
    }

    #[test]
    fn test_refresh_equal_applies() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);

        let remote = store.current().unwrap().clone();
        assert_eq!(store.apply_refresh(remote), RefreshOutcome::Applied);
        assert!(!store.is_dirty());
        assert_eq!(store.state(), SyncState::Idle);
    }

    #[test]
    fn test_refresh_held_while_dirty() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 2, None, vec![]);

        // Stale server copy with a different quantity
        let mut remote = store.current().unwrap().clone();
        remote.items[0].quantity = 1;
        assert_eq!(store.apply_refresh(remote), RefreshOutcome::Held);

        // Local edit is retained
        assert_eq!(store.current().unwrap().items[0].quantity, 2);
        assert!(store.pending_remote().is_some());
    }

    #[test]
    fn test_held_refresh_applied_once_converged() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 2, None, vec![]);

        let mut remote = store.current().unwrap().clone();
        remote.items[0].state = ItemState::Ready;
        store.apply_refresh(remote);
        assert!(store.pending_remote().is_some());

        // Kitchen marks the item ready locally too; fingerprints
        // now match and the held snapshot lands.
        let item_id = store.current().unwrap().items[0].id.clone();
        store.mutate(|items| {
            if let Some(i) = items.iter_mut().find(|i| i.id == item_id) {
                i.state = ItemState::Ready;
            }
        });
        assert!(store.try_apply_pending());
        assert!(store.pending_remote().is_none());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_refresh_applied_when_not_dirty() {
        let mut store = loaded_store();
        let mut remote = empty_order();
        remote.status = KitchenStatus::Ready;
        remote.items.push(OrderItem {
            id: "srv-1".to_string(),
            product_id: "p1".to_string(),
            name: "Burger".to_string(),
            unit_price: 8000,
            quantity: 1,
            comment: None,
            exclusions: vec![],
            state: ItemState::Ready,
            promotion_applied: false,
            original_price: None,
        });
        assert_eq!(store.apply_refresh(remote), RefreshOutcome::Applied);
        assert_eq!(store.current().unwrap().status, KitchenStatus::Ready);
    }

    #[test]
    fn test_stale_promotion_result_ignored() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        let (stale_fp, _) = store.current_snapshot().unwrap();

        // Another mutation supersedes the evaluation in flight
        store.add_item(&product("p2", 5000), 1, None, vec![]);

        let promos = OrderPromotions {
            applied_promotions: vec![],
            applied_promo_codes: vec![],
            total_discount: 1000,
        };
        assert!(!store.apply_promotions(stale_fp, &promos));
        assert_eq!(store.total(), 13000);
    }

    #[test]
    fn test_promotion_discount_clamped_to_subtotal() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        let (fp, _) = store.current_snapshot().unwrap();

        let promos = OrderPromotions {
            applied_promotions: vec![AppliedPromotion {
                promotion_id: "promo-1".to_string(),
                promotion_name: "Big".to_string(),
                promotion_type: PromotionType::FixedAmount,
                discount_amount: 50000,
                affected_items: vec![],
            }],
            applied_promo_codes: vec![],
            total_discount: 50000,
        };
        assert!(store.apply_promotions(fp, &promos));
        assert_eq!(store.total(), 0);
        assert_eq!(store.subtotal(), 8000);
    }

    #[test]
    fn test_begin_sync_snapshots_latest_items() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 3, None, vec![]);

        let (order_id, table_id, items) = store.begin_sync().unwrap();
        assert_eq!(order_id, "o1");
        assert_eq!(table_id, "t1");
        assert_eq!(items[0].quantity, 3);
        assert_eq!(store.state(), SyncState::Syncing);
    }

    #[test]
    fn test_begin_sync_noop_when_clean() {
        let mut store = loaded_store();
        assert!(store.begin_sync().is_none());
        assert_eq!(store.state(), SyncState::Idle);
    }

    #[test]
    fn test_finish_sync_confirms_and_idles() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        store.begin_sync().unwrap();

        let confirmed = store.current().unwrap().clone();
        store.finish_sync(Some(confirmed));
        assert_eq!(store.state(), SyncState::Idle);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_finish_sync_failure_stays_dirty() {
        let mut store = loaded_store();
        store.add_item(&product("p1", 8000), 1, None, vec![]);
        store.begin_sync().unwrap();

        store.finish_sync(None);
        assert_eq!(store.state(), SyncState::Dirty);
        assert!(store.is_dirty());
    }
}
