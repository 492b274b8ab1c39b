use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::TECH_RECORD_KEY;
use crate::persist::{self, KvStore};

/// Unlocked technology flags, keyed by technology name.
///
/// Absence of a name is equivalent to `false`. Flags only ever move from
/// absent/false to true; nothing in this crate clears them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnologyState(BTreeMap<String, bool>);

impl TechnologyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Names whose flag is true, in sorted order.
    pub fn unlocked(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked().count()
    }

    fn set(&mut self, name: &str) {
        self.0.insert(name.to_string(), true);
    }
}

/// Owner of [`TechnologyState`] and sole writer of the `tech` record.
///
/// Every `unlock` persists the full state before returning. A failed write is
/// logged and the in-memory unlock is kept, so the user action is never lost
/// for the running session.
pub struct TechRegistry<S: KvStore> {
    store: S,
    state: TechnologyState,
}

impl<S: KvStore> TechRegistry<S> {
    /// Seed the registry from the durable record, or start empty.
    pub fn new(store: S) -> Self {
        let state = persist::load(&store, TECH_RECORD_KEY, TechnologyState::new());
        tracing::debug!("loaded {} unlocked technologies", state.unlocked_count());
        Self { store, state }
    }

    pub fn unlock(&mut self, name: &str) {
        if !self.state.has(name) {
            tracing::info!("unlocked technology '{name}'");
        }
        self.state.set(name);

        if let Err(e) = persist::save(&self.store, TECH_RECORD_KEY, &self.state) {
            tracing::error!("failed to persist technology state after unlocking '{name}': {e}");
        }
    }

    pub fn has_tech(&self, name: &str) -> bool {
        self.state.has(name)
    }

    pub fn state(&self) -> &TechnologyState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
