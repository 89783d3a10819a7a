//! Per-component registration reconciler.

use std::sync::Arc;

use tracing::debug;

use weft_actions::{ActionDescriptor, ActionRegistry, RegistrationKey, Render, RenderCache};

use crate::signature::{DependencyMode, Signature};

/// Binds one UI component instance to the shared action registry.
///
/// The component builds a fresh [`ActionDescriptor`] on every lifecycle
/// pass (typically with fresh closures capturing current component state)
/// and hands it to [`ActionBinding::sync`]. The registry and render cache
/// are fixed at construction, so registration capabilities stay stable for
/// the binding's lifetime. Whether teardown comes from an explicit
/// [`ActionBinding::teardown`] call or from dropping the binding, the
/// registration is removed exactly once.
pub struct ActionBinding {
    key: RegistrationKey,
    registry: Arc<ActionRegistry>,
    render_cache: Arc<RenderCache>,
    last_signature: Option<Signature>,
    registered: bool,
    torn_down: bool,
}

impl ActionBinding {
    pub fn new(registry: Arc<ActionRegistry>, render_cache: Arc<RenderCache>) -> Self {
        Self {
            key: RegistrationKey::generate(),
            registry,
            render_cache,
            last_signature: None,
            registered: false,
            torn_down: false,
        }
    }

    /// The key this binding registers under. Stable across every pass of the
    /// binding's lifetime.
    pub fn key(&self) -> RegistrationKey {
        self.key
    }

    /// Run one lifecycle pass.
    ///
    /// In [`DependencyMode::AlwaysFresh`], the live registry entry's handler
    /// (and a cached render callable) are first patched in place, so
    /// closures built on this pass take effect without a re-registration.
    /// Then a full unregister-and-reregister runs only when the
    /// change-detection signature differs from the previous pass, which
    /// includes the very first pass. A disabled descriptor keeps the key out
    /// of the registry but leaves the binding armed: it registers as if for
    /// the first time once `disabled` flips back.
    pub fn sync(&mut self, action: ActionDescriptor, deps: DependencyMode) {
        if self.torn_down {
            return;
        }

        // Patch before change detection, every always-fresh pass.
        if deps.is_always_fresh() {
            self.patch(&action);
        }

        let signature = Signature::of(&action, &deps);
        if self.last_signature.as_ref() == Some(&signature) {
            return;
        }

        debug!(action = %action.name, key = %self.key, "registration signature changed");
        if self.registered {
            self.registry.unregister(self.key);
            self.registered = false;
        }
        if !action.disabled {
            let name = action.name.clone();
            let render = action.render.clone();
            self.registry.register(self.key, action);
            if let Some(render) = render {
                self.render_cache.insert(&name, render);
            }
            self.registered = true;
        }
        self.last_signature = Some(signature);
    }

    /// In-place refresh of the live handler slot and a cached render
    /// callable. Runs only against an existing registration; static render
    /// strings are left to change detection.
    fn patch(&self, action: &ActionDescriptor) {
        if !self.registry.patch_handler(self.key, action.handler.clone()) {
            return;
        }
        if let Some(render @ Render::Component(_)) = &action.render {
            self.render_cache.refresh(&action.name, render.clone());
        }
    }

    /// Remove this binding's registration. The removal runs at most once;
    /// later calls (and the drop hook) are no-ops, and the binding is
    /// terminal afterwards. The render cache keeps the action's slot:
    /// another live binding may still be registered under the same name,
    /// and the cache cannot tell.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.registered = false;
        debug!(key = %self.key, "action binding torn down");
        self.registry.unregister(self.key);
    }
}

impl Drop for ActionBinding {
    fn drop(&mut self) {
        self.teardown();
    }
}
