//! Shared action registry keyed by registration identity.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use {
    serde_json::{Value, json},
    tracing::{debug, trace},
    uuid::Uuid,
};

use crate::{
    descriptor::{ActionDescriptor, ActionHandler},
    parameter::json_schema,
};

// ── RegistrationKey ─────────────────────────────────────────────────────────

/// Opaque identity of one registration.
///
/// Generated once per owning UI component instance and never derived from
/// the action name, so two components declaring the same name hold distinct
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationKey(Uuid);

impl RegistrationKey {
    /// Generate a fresh, globally unique key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ── RegistryStats ───────────────────────────────────────────────────────────

/// Monotonic counters over registry mutations.
#[derive(Debug, Default)]
pub struct RegistryStats {
    registrations: AtomicU64,
    removals: AtomicU64,
    patches: AtomicU64,
}

impl RegistryStats {
    pub fn registrations(&self) -> u64 {
        self.registrations.load(Ordering::Relaxed)
    }

    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    pub fn patches(&self) -> u64 {
        self.patches.load(Ordering::Relaxed)
    }
}

// ── ActionRegistry ──────────────────────────────────────────────────────────

/// Process-wide store of registered actions.
///
/// All methods take `&self`; the interior lock gives each operation
/// single-writer-at-a-time semantics. Share via `Arc`. Nothing here
/// validates descriptors; duplicate names and empty parameter lists are
/// accepted as-is.
pub struct ActionRegistry {
    entries: RwLock<HashMap<RegistrationKey, ActionDescriptor>>,
    stats: RegistryStats,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: RegistryStats::default(),
        }
    }

    /// Insert or replace the full entry for `key`.
    pub fn register(&self, key: RegistrationKey, descriptor: ActionDescriptor) {
        debug!(action = %descriptor.name, %key, "action registered");
        self.write().insert(key, descriptor);
        self.stats.registrations.fetch_add(1, Ordering::Relaxed);
    }

    /// Remove the entry for `key`. Returns false if none was present.
    pub fn unregister(&self, key: RegistrationKey) -> bool {
        let removed = self.write().remove(&key);
        if let Some(descriptor) = &removed {
            debug!(action = %descriptor.name, %key, "action unregistered");
            self.stats.removals.fetch_add(1, Ordering::Relaxed);
        }
        removed.is_some()
    }

    /// Overwrite the handler slot of an existing entry in place, without
    /// removing or reinserting it. Returns false if no entry exists.
    pub fn patch_handler(&self, key: RegistrationKey, handler: ActionHandler) -> bool {
        let mut entries = self.write();
        match entries.get_mut(&key) {
            Some(entry) => {
                trace!(action = %entry.name, %key, "action handler patched");
                entry.handler = handler;
                self.stats.patches.fetch_add(1, Ordering::Relaxed);
                true
            },
            None => false,
        }
    }

    pub fn get(&self, key: RegistrationKey) -> Option<ActionDescriptor> {
        self.read().get(&key).cloned()
    }

    pub fn contains(&self, key: RegistrationKey) -> bool {
        self.read().contains_key(&key)
    }

    /// All current entries, for the agent runtime assembling a turn.
    pub fn snapshot(&self) -> Vec<(RegistrationKey, ActionDescriptor)> {
        self.read()
            .iter()
            .map(|(key, descriptor)| (*key, descriptor.clone()))
            .collect()
    }

    /// Name/description/parameter-schema triples for an LLM request.
    pub fn schemas(&self) -> Vec<Value> {
        self.read()
            .values()
            .map(|descriptor| {
                json!({
                    "name": descriptor.name,
                    "description": descriptor.description,
                    "parameters": json_schema(&descriptor.parameters),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<RegistrationKey, ActionDescriptor>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<RegistrationKey, ActionDescriptor>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            descriptor::handler,
            parameter::{ParamType, Parameter},
        },
        serde_json::json,
        std::sync::Arc,
    };

    fn descriptor(name: &str) -> ActionDescriptor {
        ActionDescriptor::new(name, handler(|_| async { Ok(json!(null)) }))
    }

    #[test]
    fn keys_are_unique_per_generation() {
        assert_ne!(RegistrationKey::generate(), RegistrationKey::generate());
    }

    #[test]
    fn register_then_get() {
        let registry = ActionRegistry::new();
        let key = RegistrationKey::generate();
        registry.register(key, descriptor("greet"));
        assert!(registry.contains(key));
        assert_eq!(registry.get(key).unwrap().name, "greet");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_replaces_existing_entry() {
        let registry = ActionRegistry::new();
        let key = RegistrationKey::generate();
        registry.register(key, descriptor("old"));
        registry.register(key, descriptor("new"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(key).unwrap().name, "new");
        assert_eq!(registry.stats().registrations(), 2);
    }

    #[test]
    fn unregister_absent_key_is_noop() {
        let registry = ActionRegistry::new();
        assert!(!registry.unregister(RegistrationKey::generate()));
        assert_eq!(registry.stats().removals(), 0);
    }

    #[test]
    fn patch_handler_swaps_slot_in_place() {
        let registry = ActionRegistry::new();
        let key = RegistrationKey::generate();
        registry.register(key, descriptor("greet"));

        let fresh = handler(|_| async { Ok(json!("fresh")) });
        assert!(registry.patch_handler(key, fresh.clone()));
        assert!(Arc::ptr_eq(&registry.get(key).unwrap().handler, &fresh));
        assert_eq!(registry.stats().patches(), 1);
        // No remove/insert pair happened.
        assert_eq!(registry.stats().registrations(), 1);
        assert_eq!(registry.stats().removals(), 0);
    }

    #[test]
    fn patch_handler_without_entry_fails() {
        let registry = ActionRegistry::new();
        let fresh = handler(|_| async { Ok(json!(null)) });
        assert!(!registry.patch_handler(RegistrationKey::generate(), fresh));
        assert_eq!(registry.stats().patches(), 0);
    }

    #[tokio::test]
    async fn patched_handler_is_the_one_invoked() {
        let registry = ActionRegistry::new();
        let key = RegistrationKey::generate();
        registry.register(key, descriptor("greet"));
        registry.patch_handler(key, handler(|_| async { Ok(json!("patched")) }));

        let entry = registry.get(key).unwrap();
        let result = (entry.handler)(json!({})).await.unwrap();
        assert_eq!(result, json!("patched"));
    }

    #[test]
    fn snapshot_lists_all_entries() {
        let registry = ActionRegistry::new();
        let first = RegistrationKey::generate();
        let second = RegistrationKey::generate();
        registry.register(first, descriptor("a"));
        registry.register(second, descriptor("b"));

        let mut names: Vec<String> = registry
            .snapshot()
            .into_iter()
            .map(|(_, descriptor)| descriptor.name)
            .collect();
        names.sort();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn schemas_carry_parameter_projection() {
        let registry = ActionRegistry::new();
        registry.register(
            RegistrationKey::generate(),
            descriptor("book_trip")
                .with_description("Books a trip")
                .with_parameters(vec![Parameter::new("city", ParamType::String)]),
        );

        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["name"], json!("book_trip"));
        assert_eq!(schemas[0]["description"], json!("Books a trip"));
        assert_eq!(
            schemas[0]["parameters"]["properties"]["city"],
            json!({ "type": "string" })
        );
    }
}
