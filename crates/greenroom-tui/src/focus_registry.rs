//! Stacking order for concurrently mounted overlays.
//!
//! Each mounted overlay holds a rank; higher ranks paint on top. Ranks come
//! from a strictly increasing counter that is never reused, so the order stays
//! total and stable however often overlays mount and unmount.
//!
//! The registry is a single service created at startup and shared by cheap
//! clones. All access is from the UI thread, hence `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Rank reported by [`FocusRegistry::top_rank`] when nothing is registered.
pub const BASELINE_RANK: u64 = 1000;

#[derive(Debug, Default)]
struct RegistryState {
    order: HashMap<String, u64>,
    // Live handles per name as (lease, count); the registration ends when the
    // last handle of the current lease drops.
    holders: HashMap<String, (u64, usize)>,
    issued: u64,
    leases: u64,
}

impl RegistryState {
    fn next_rank(&mut self) -> u64 {
        self.issued += 1;
        BASELINE_RANK + self.issued
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl FocusRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` and return a handle that unregisters on drop.
    ///
    /// If `name` is already registered it keeps its rank. Handles for the
    /// same name share the registration, which ends when the last one drops.
    #[must_use]
    pub fn register(&self, name: impl Into<String>) -> OverlayHandle {
        let name = name.into();
        self.register_name(&name);
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let lease = match state.holders.get_mut(&name) {
            Some((lease, count)) => {
                *count += 1;
                *lease
            }
            None => {
                state.leases += 1;
                let lease = state.leases;
                state.holders.insert(name.clone(), (lease, 1));
                lease
            }
        };
        OverlayHandle {
            registry: self.clone(),
            name,
            lease,
        }
    }

    /// Assign a fresh rank to `name` unless it is already registered.
    pub fn register_name(&self, name: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        if let Some(rank) = state.order.get(name) {
            return *rank;
        }
        let rank = state.next_rank();
        state.order.insert(name.to_owned(), rank);
        tracing::debug!(name, rank, "overlay registered");
        rank
    }

    /// Remove `name`; unknown names are ignored.
    ///
    /// Handles still alive for `name` become inert: dropping them later does
    /// not touch a newer registration of the same name.
    pub fn unregister(&self, name: &str) {
        let mut state = self.state.borrow_mut();
        state.holders.remove(name);
        if state.order.remove(name).is_some() {
            tracing::debug!(name, "overlay unregistered");
        }
    }

    fn release(&self, name: &str, lease: u64) {
        let last = {
            let mut state = self.state.borrow_mut();
            match state.holders.get_mut(name) {
                Some((current, count)) if *current == lease && *count > 1 => {
                    *count -= 1;
                    false
                }
                Some((current, _)) => *current == lease,
                None => false,
            }
        };
        if last {
            self.unregister(name);
        }
    }

    /// Re-rank a registered overlay above every other one.
    ///
    /// No-op for names that are not registered.
    pub fn bring_to_front(&self, name: &str) {
        let mut state = self.state.borrow_mut();
        if !state.order.contains_key(name) {
            return;
        }
        let rank = state.next_rank();
        state.order.insert(name.to_owned(), rank);
        tracing::debug!(name, rank, "overlay brought to front");
    }

    #[must_use]
    pub fn rank(&self, name: &str) -> Option<u64> {
        self.state.borrow().order.get(name).copied()
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.state.borrow().order.contains_key(name)
    }

    #[must_use]
    pub fn top_rank(&self) -> u64 {
        self.state
            .borrow()
            .order
            .values()
            .copied()
            .max()
            .unwrap_or(BASELINE_RANK)
    }

    /// Name of the overlay currently on top.
    #[must_use]
    pub fn topmost(&self) -> Option<String> {
        self.state
            .borrow()
            .order
            .iter()
            .max_by_key(|(_, rank)| **rank)
            .map(|(name, _)| name.clone())
    }

    /// Registered names, lowest rank first (paint order).
    #[must_use]
    pub fn paint_order(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut ranked: Vec<(&String, &u64)> = state.order.iter().collect();
        ranked.sort_by_key(|(_, rank)| **rank);
        ranked.into_iter().map(|(name, _)| name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration owned by a mounted overlay; dropping it unmounts.
#[derive(Debug)]
pub struct OverlayHandle {
    registry: FocusRegistry,
    name: String,
    lease: u64,
}

impl OverlayHandle {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current rank, or `None` once the name was unregistered underneath.
    #[must_use]
    pub fn rank(&self) -> Option<u64> {
        self.registry.rank(&self.name)
    }

    /// Claim focus for this overlay.
    pub fn focus(&self) {
        self.registry.bring_to_front(&self.name);
    }

    /// Raise a sibling overlay without taking focus.
    pub fn bring_to_front(&self, other: &str) {
        self.registry.bring_to_front(other);
    }

    #[must_use]
    pub fn is_topmost(&self) -> bool {
        self.registry.topmost().as_deref() == Some(self.name.as_str())
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.registry.release(&self.name, self.lease);
    }
}
