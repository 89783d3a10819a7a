//! Action descriptors declared by UI components.

use std::{fmt, sync::Arc};

use {
    anyhow::Result,
    futures::{FutureExt, future::BoxFuture},
    serde_json::Value,
};

use crate::parameter::Parameter;

// ── Handler ─────────────────────────────────────────────────────────────────

/// Handler invoked with the parsed argument object when the agent calls the
/// action. Invocation happens outside this crate, during an agent turn.
pub type ActionHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Wrap an async closure into an [`ActionHandler`].
pub fn handler<F, Fut>(f: F) -> ActionHandler
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |args| f(args).boxed())
}

// ── Render ──────────────────────────────────────────────────────────────────

/// Status of an invocation, as exposed to render callables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    /// Arguments are still streaming in.
    InProgress,
    /// The handler is running.
    Executing,
    /// The handler has returned.
    Complete,
}

/// Snapshot of one invocation, passed to [`Render::Component`] callables.
#[derive(Debug, Clone)]
pub struct InvocationState {
    pub status: InvocationStatus,
    pub args: Value,
    pub result: Option<Value>,
}

/// Render callable producing an HTML fragment for the chat surface.
pub type RenderFn = Arc<dyn Fn(&InvocationState) -> String + Send + Sync>;

/// Display artifact attached to an action: a static string, or a callable
/// evaluated against invocation state each time the surface redraws.
#[derive(Clone)]
pub enum Render {
    Text(String),
    Component(RenderFn),
}

impl Render {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn component<F>(f: F) -> Self
    where
        F: Fn(&InvocationState) -> String + Send + Sync + 'static,
    {
        Self::Component(Arc::new(f))
    }

    /// The static text, if this artifact is a plain string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Component(_) => None,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }
}

impl fmt::Debug for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Component(_) => f.write_str("Component(..)"),
        }
    }
}

// ── ActionDescriptor ────────────────────────────────────────────────────────

/// A callable capability declared by a UI component: name, typed parameter
/// shape, handler, and optional render artifact.
///
/// Names are unique by convention only; nothing here enforces it. A
/// descriptor with `disabled` set is accepted but never registered.
#[derive(Clone)]
pub struct ActionDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub handler: ActionHandler,
    pub render: Option<Render>,
    pub disabled: bool,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>, handler: ActionHandler) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            handler,
            render: None,
            disabled: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("render", &self.render)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
