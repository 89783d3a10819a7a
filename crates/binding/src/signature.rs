//! Change-detection signature over the shape-relevant descriptor fields.

use serde_json::Value;

use weft_actions::{ActionDescriptor, Render};

/// How the caller wants change detection gated.
///
/// With [`DependencyMode::AlwaysFresh`] (no dependency list) the live
/// handler/render slots are patched on every pass and a full
/// re-registration happens only when the descriptor's shape changes. With
/// [`DependencyMode::Explicit`] the listed values join the signature, so a
/// full re-registration happens exactly when one of them (or the shape)
/// changes, and the live slots are never patched between registrations.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyMode {
    AlwaysFresh,
    Explicit(Vec<Value>),
}

impl DependencyMode {
    pub fn is_always_fresh(&self) -> bool {
        matches!(self, Self::AlwaysFresh)
    }
}

/// Comparison key deciding whether a pass needs a full re-registration.
///
/// The handler and render callables are deliberately absent: callers in
/// always-fresh mode rebuild them on every pass, and including them would
/// mark every pass as changed and re-register forever.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Signature {
    name: String,
    description: Option<String>,
    disabled: bool,
    /// Structural fingerprint of the parameter list; deep and
    /// order-sensitive.
    parameters: Value,
    /// A static render string participates in change detection; a render
    /// callable does not.
    render_text: Option<String>,
    /// Caller-supplied dependency values, in explicit mode.
    deps: Option<Vec<Value>>,
}

impl Signature {
    pub(crate) fn of(action: &ActionDescriptor, deps: &DependencyMode) -> Self {
        Self {
            name: action.name.clone(),
            description: action.description.clone(),
            disabled: action.disabled,
            parameters: serde_json::to_value(&action.parameters).unwrap_or(Value::Null),
            render_text: match &action.render {
                Some(Render::Text(text)) => Some(text.clone()),
                _ => None,
            },
            deps: match deps {
                DependencyMode::AlwaysFresh => None,
                DependencyMode::Explicit(values) => Some(values.clone()),
            },
        }
    }
}
