//! The single modal overlay surface
//!
//! At most one modal may own the overlay at a time. Owning it also suspends
//! scrolling of the results grid. The lock is released when the guard drops,
//! whichever path closed the modal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct OverlaySlot {
    held: Arc<AtomicBool>,
}

/// Proof of overlay ownership; releases the slot on drop
#[derive(Debug)]
pub struct OverlayGuard {
    held: Arc<AtomicBool>,
}

impl OverlaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> Option<OverlayGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                tracing::trace!("Overlay acquired");
                OverlayGuard {
                    held: self.held.clone(),
                }
            })
    }

    /// True while a modal holds the overlay (grid scrolling is locked)
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
        tracing::trace!("Overlay released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_guard_at_a_time() {
        let slot = OverlaySlot::new();
        let guard = slot.acquire().expect("first acquire");
        assert!(slot.is_held());
        assert!(slot.acquire().is_none());

        drop(guard);
        assert!(!slot.is_held());
        assert!(slot.acquire().is_some());
    }

    #[test]
    fn clones_share_the_same_slot() {
        let slot = OverlaySlot::new();
        let other = slot.clone();
        let _guard = slot.acquire().expect("acquire");
        assert!(other.is_held());
        assert!(other.acquire().is_none());
    }
}
