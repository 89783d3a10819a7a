//! Lifecycle binding between a UI component and the shared action registry.
//!
//! A component constructs one [`ActionBinding`] for its lifetime and calls
//! [`ActionBinding::sync`] on every lifecycle pass with a freshly built
//! descriptor. The binding decides whether the pass is a no-op, an in-place
//! handler/render patch, or a full unregister-and-reregister, and removes
//! the registration exactly once at teardown.

pub mod binding;
mod signature;

pub use {binding::ActionBinding, signature::DependencyMode};
