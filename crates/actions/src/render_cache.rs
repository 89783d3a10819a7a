//! Render artifacts cached by action name for the chat surface.
//!
//! Slots are written when an action registers (or patches its render
//! callable) and read when the chat surface draws an invocation. Slots are
//! never removed when an action unregisters: the cache cannot tell whether
//! another live registration still wants the name's artifact, so a retired
//! name keeps its last artifact until something overwrites it or the process
//! ends.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use tracing::trace;

use crate::descriptor::Render;

/// Shared name → render-artifact cache. Last writer for a name wins.
///
/// The container is `None` while the chat surface is unmounted; writes
/// during that window are skipped.
pub struct RenderCache {
    slots: Mutex<Option<HashMap<String, Render>>>,
}

impl RenderCache {
    /// An active cache with no slots.
    pub fn active() -> Self {
        Self {
            slots: Mutex::new(Some(HashMap::new())),
        }
    }

    /// An inactive cache; writes are skipped until [`RenderCache::activate`].
    pub fn inactive() -> Self {
        Self {
            slots: Mutex::new(None),
        }
    }

    /// Attach an empty slot table. No-op if the cache is already active.
    pub fn activate(&self) {
        let mut slots = self.lock();
        if slots.is_none() {
            *slots = Some(HashMap::new());
        }
    }

    /// Detach the slot table, dropping every slot.
    pub fn deactivate(&self) {
        *self.lock() = None;
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Insert or replace the slot for `name`. Skipped while inactive.
    pub fn insert(&self, name: &str, render: Render) {
        if let Some(slots) = self.lock().as_mut() {
            trace!(action = name, "render slot written");
            slots.insert(name.to_string(), render);
        }
    }

    /// Overwrite an existing slot only. Returns false when the cache is
    /// inactive or holds no slot for `name`.
    pub fn refresh(&self, name: &str, render: Render) -> bool {
        match self.lock().as_mut() {
            Some(slots) => match slots.get_mut(name) {
                Some(slot) => {
                    trace!(action = name, "render slot refreshed");
                    *slot = render;
                    true
                },
                None => false,
            },
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<Render> {
        self.lock().as_ref().and_then(|slots| slots.get(name).cloned())
    }

    fn lock(&self) -> MutexGuard<'_, Option<HashMap<String, Render>>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::active()
    }
}
