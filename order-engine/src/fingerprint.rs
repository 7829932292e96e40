//! Item-list fingerprints
//!
//! A fingerprint is an order-sensitive SHA-256 digest over each
//! item's externally-visible fields (id, quantity, comment,
//! exclusions, state). Two fingerprints compare equal iff the two
//! lists have equal length and pairwise-equal fields in the same
//! order, which lets the store detect divergence without a deep
//! structural comparison on every check.

use sha2::{Digest, Sha256};
use shared::order::{ItemState, OrderItem};
use std::fmt;

/// Order-sensitive digest of an item list's mutable fields
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Canonical fingerprint of the empty item list. Returned as a
    /// singleton without hashing.
    pub const EMPTY: Fingerprint = Fingerprint([0u8; 32]);

    /// Digest an item list. Linear in item count; touches only each
    /// item's own scalar fields.
    pub fn of(items: &[OrderItem]) -> Self {
        if items.is_empty() {
            return Self::EMPTY;
        }
        let mut hasher = Sha256::new();
        for item in items {
            hash_field(&mut hasher, item.id.as_bytes());
            hasher.update(item.quantity.to_le_bytes());
            hash_field(&mut hasher, item.comment.as_deref().unwrap_or("").as_bytes());
            hasher.update((item.exclusions.len() as u32).to_le_bytes());
            for exclusion in &item.exclusions {
                hash_field(&mut hasher, exclusion.as_bytes());
            }
            hasher.update([state_tag(item.state)]);
        }
        Fingerprint(hasher.finalize().into())
    }
}

/// Length-prefix variable-size fields so adjacent fields cannot
/// bleed into each other.
fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u32).to_le_bytes());
    hasher.update(bytes);
}

fn state_tag(state: ItemState) -> u8 {
    match state {
        ItemState::Pending => 0,
        ItemState::Sent => 1,
        ItemState::Ready => 2,
        ItemState::Delivered => 3,
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &hex::encode(self.0)[..12])
    }
}

/// Revision-keyed fingerprint cache
///
/// The store bumps a revision counter on every change to an item
/// list; while the revision is unchanged, repeated snapshot
/// requests return the cached fingerprint in O(1) instead of
/// rehashing.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    cached: Option<(u64, Fingerprint)>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint for `items` at `revision`, recomputed only when
    /// the revision moved.
    pub fn get(&mut self, revision: u64, items: &[OrderItem]) -> Fingerprint {
        if let Some((cached_rev, fp)) = self.cached {
            if cached_rev == revision {
                return fp;
            }
        }
        let fp = Fingerprint::of(items);
        self.cached = Some((revision, fp));
        fp
    }

    pub fn reset(&mut self) {
        self.cached = None;
    }
}
