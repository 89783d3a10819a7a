//! Shared registry for UI-declared agent actions.
//!
//! UI components declare actions (name, typed parameter shape, handler,
//! optional render artifact). The agent runtime reads the registry when
//! building an LLM turn; the chat surface resolves render artifacts by
//! action name. Registration lifecycle lives in `weft-binding`.

pub mod descriptor;
pub mod parameter;
pub mod registry;
pub mod render_cache;

pub use {
    descriptor::{
        ActionDescriptor, ActionHandler, InvocationState, InvocationStatus, Render, RenderFn,
        handler,
    },
    parameter::{ParamType, Parameter, json_schema},
    registry::{ActionRegistry, RegistrationKey, RegistryStats},
    render_cache::RenderCache,
};
