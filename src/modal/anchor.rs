//! Shared out-of-flow mount point for open modals
//!
//! Open modals attach to one anchor the application renders after its
//! base view, which detaches their visual position from wherever the
//! controller happens to live. The anchor keeps attached modals in
//! insertion order; that order is the stacking order. Slots are held
//! through [`MountGuard`] values, so a slot is released when the modal
//! closes and releases the guard, or at the latest when the owning
//! controller is dropped.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Identity of one mounted modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountKey(Uuid);

impl MountKey {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone)]
struct MountEntry {
    modal_id: Option<String>,
    mounted_at: DateTime<Utc>,
}

#[derive(Default)]
struct AnchorInner {
    mounts: IndexMap<MountKey, MountEntry>,
}

/// The shared attachment point
///
/// Cheap to clone; clones share one registry. Multiple modals may hold
/// slots concurrently and the anchor never arbitrates between them.
#[derive(Clone, Default)]
pub struct OverlayAnchor {
    inner: Arc<Mutex<AnchorInner>>,
}

impl std::fmt::Debug for OverlayAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayAnchor")
            .field("mounted", &self.len())
            .finish()
    }
}

impl OverlayAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a slot, keyed by a fresh [`MountKey`]
    ///
    /// The slot stays held until the returned guard is released or
    /// dropped.
    pub fn mount(&self, modal_id: Option<&str>) -> MountGuard {
        let key = MountKey::new();
        let entry = MountEntry {
            modal_id: modal_id.map(str::to_string),
            mounted_at: Utc::now(),
        };
        debug!(modal_id = ?entry.modal_id, "Mounting modal at overlay anchor");
        self.inner.lock().mounts.insert(key, entry);

        MountGuard {
            anchor: self.clone(),
            key,
            released: false,
        }
    }

    /// Whether the given slot is currently held
    pub fn is_mounted(&self, key: MountKey) -> bool {
        self.inner.lock().mounts.contains_key(&key)
    }

    /// Stacking position of the given slot, 0 being the bottom
    pub fn position(&self, key: MountKey) -> Option<usize> {
        self.inner.lock().mounts.get_index_of(&key)
    }

    /// Correlation tokens of mounted modals, in insertion order
    pub fn mounted_ids(&self) -> Vec<Option<String>> {
        self.inner
            .lock()
            .mounts
            .values()
            .map(|entry| entry.modal_id.clone())
            .collect()
    }

    /// When the given slot was acquired
    pub fn mounted_at(&self, key: MountKey) -> Option<DateTime<Utc>> {
        self.inner
            .lock()
            .mounts
            .get(&key)
            .map(|entry| entry.mounted_at)
    }

    /// Number of held slots
    pub fn len(&self) -> usize {
        self.inner.lock().mounts.len()
    }

    /// Whether no slot is held
    pub fn is_empty(&self) -> bool {
        self.inner.lock().mounts.is_empty()
    }

    fn release(&self, key: MountKey) {
        let removed = self.inner.lock().mounts.shift_remove(&key);
        if let Some(entry) = removed {
            debug!(modal_id = ?entry.modal_id, "Released overlay anchor slot");
        }
    }
}

/// Holds one anchor slot; releasing or dropping it frees the slot
#[derive(Debug)]
pub struct MountGuard {
    anchor: OverlayAnchor,
    key: MountKey,
    released: bool,
}

impl MountGuard {
    /// Key identifying this slot at the anchor
    pub fn key(&self) -> MountKey {
        self.key
    }

    /// Release the slot now instead of at drop time
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.anchor.release(self.key);
        }
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}
