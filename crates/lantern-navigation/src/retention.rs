//! Bounded retention of visited screens.
//!
//! Building a screen opens data subscriptions, so a screen stays mounted (but
//! hidden) after the user leaves it. It is only released once it has been
//! inactive for the retention timeout. Timers are polled from the host loop
//! against an injected [`Clock`]; there is at most one pending eviction per key.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use lantern_core::{Clock, Duration, Instant, Scope};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct TimerId;
}

pub const DEFAULT_RETENTION: Duration = Duration::from_secs(120);

struct PendingEviction<K> {
    key: K,
    deadline: Instant,
}

pub struct ScreenRetention<K> {
    clock: Rc<dyn Clock>,
    timeout: Duration,
    /// Mounted screens in first-visit order, each with the scope its
    /// subscriptions hang off.
    visited: Vec<(K, Scope)>,
    timers: SlotMap<TimerId, PendingEviction<K>>,
    by_key: HashMap<K, TimerId>,
}

impl<K> ScreenRetention<K>
where
    K: Clone + Eq + Hash + Debug,
{
    pub fn new(clock: Rc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            clock,
            timeout,
            visited: Vec::new(),
            timers: SlotMap::with_key(),
            by_key: HashMap::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cancels any pending eviction and mounts `key` if it is not mounted yet.
    pub fn mark_active(&mut self, key: K) {
        self.cancel(&key);
        if !self.is_visited(&key) {
            log::debug!("retention: mount {key:?}");
            self.visited.push((key, Scope::new()));
        }
    }

    /// Starts (or restarts) the eviction timer. Keys that were never mounted
    /// have nothing to evict.
    pub fn mark_inactive(&mut self, key: K) {
        if !self.is_visited(&key) {
            return;
        }
        self.cancel(&key);
        let deadline = self.clock.now() + self.timeout;
        let id = self.timers.insert(PendingEviction {
            key: key.clone(),
            deadline,
        });
        log::debug!("retention: {key:?} inactive, evicting in {:?}", self.timeout);
        self.by_key.insert(key, id);
    }

    /// Evicts every key whose timer has expired, disposing its scope.
    /// Returns the evicted keys in deadline order.
    pub fn poll(&mut self) -> Vec<K> {
        self.take_expired()
            .into_iter()
            .map(|(key, scope)| {
                scope.dispose();
                key
            })
            .collect()
    }

    /// Like [`ScreenRetention::poll`] but hands the scopes back undisposed, so
    /// the caller can release them after dropping any borrow of `self`.
    pub fn take_expired(&mut self) -> Vec<(K, Scope)> {
        let now = self.clock.now();
        let mut due: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (t.deadline, id))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        let mut evicted = Vec::with_capacity(due.len());
        for (_, id) in due {
            let Some(timer) = self.timers.remove(id) else {
                continue;
            };
            self.by_key.remove(&timer.key);
            if let Some(entry) = self.unmount(&timer.key) {
                evicted.push(entry);
            }
        }
        evicted
    }

    /// Removing a key that is already gone is a no-op.
    pub fn evict(&mut self, key: &K) -> bool {
        self.cancel(key);
        match self.unmount(key) {
            Some((_, scope)) => {
                scope.dispose();
                true
            }
            None => false,
        }
    }

    fn unmount(&mut self, key: &K) -> Option<(K, Scope)> {
        let idx = self.visited.iter().position(|(k, _)| k == key)?;
        let entry = self.visited.remove(idx);
        log::info!("retention: evicted {:?}", entry.0);
        Some(entry)
    }

    pub fn is_visited(&self, key: &K) -> bool {
        self.visited.iter().any(|(k, _)| k == key)
    }

    pub fn has_pending_eviction(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Scope owned by a mounted screen; subscriptions registered on it are
    /// released on eviction.
    pub fn scope(&self, key: &K) -> Option<Scope> {
        self.visited
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, s)| s.clone())
    }

    pub fn visited(&self) -> impl Iterator<Item = &K> + '_ {
        self.visited.iter().map(|(k, _)| k)
    }

    pub fn mounted(&self) -> impl Iterator<Item = (&K, &Scope)> + '_ {
        self.visited.iter().map(|(k, s)| (k, s))
    }

    /// Unmounts everything and cancels all timers, handing the scopes back
    /// undisposed.
    pub fn drain(&mut self) -> Vec<(K, Scope)> {
        self.timers.clear();
        self.by_key.clear();
        std::mem::take(&mut self.visited)
    }

    fn cancel(&mut self, key: &K) {
        if let Some(id) = self.by_key.remove(key) {
            self.timers.remove(id);
            log::debug!("retention: eviction of {key:?} cancelled");
        }
    }
}

impl<K> Drop for ScreenRetention<K> {
    fn drop(&mut self) {
        for (_, scope) in self.visited.drain(..) {
            scope.dispose();
        }
    }
}
