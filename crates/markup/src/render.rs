//! Renderable capability
//!
//! An external render context asks an object for a callback and invokes it
//! with an opaque info value. The tree itself never calls these callbacks.

use crate::arena::ElementArena;
use crate::error::Result;
use crate::serializer::HtmlSerializer;
use crate::types::NodeId;
use std::fmt;
use std::sync::Arc;

/// Callback producing markup from an info value
pub type RenderFn<I> = Arc<dyn Fn(&I) -> String + Send + Sync>;

pub trait Renderable<I> {
    fn renderable(&mut self) -> RenderFn<I>;
}

/// Named inline template backed by a callback
///
/// Without an explicit callback, the default one is created on first use.
pub struct InlineCodeElement<I> {
    name: String,
    callback: Option<RenderFn<I>>,
    default_callback: fn() -> RenderFn<I>,
}

impl<I> InlineCodeElement<I> {
    pub fn new(default_callback: fn() -> RenderFn<I>) -> Self {
        Self {
            name: String::new(),
            callback: None,
            default_callback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn(&I) -> String + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<I> fmt::Debug for InlineCodeElement<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineCodeElement")
            .field("name", &self.name)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl<I> Renderable<I> for InlineCodeElement<I> {
    fn renderable(&mut self) -> RenderFn<I> {
        let default_callback = self.default_callback;
        self.callback
            .get_or_insert_with(|| {
                tracing::trace!("Installing default callback for inline element {:?}", self.name);
                default_callback()
            })
            .clone()
    }
}

/// A finished element tree exposed as a renderable
///
/// The markup is captured when the callback is requested; the info value
/// is not consulted.
#[derive(Debug)]
pub struct NodeTemplate {
    arena: ElementArena,
    root_id: NodeId,
    serializer: HtmlSerializer,
}

impl NodeTemplate {
    pub fn new(arena: ElementArena, root_id: NodeId) -> Result<Self> {
        arena.get(root_id)?;
        Ok(Self {
            arena,
            root_id,
            serializer: HtmlSerializer::new(),
        })
    }

    pub fn with_serializer(mut self, serializer: HtmlSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn arena(&self) -> &ElementArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ElementArena {
        &mut self.arena
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn to_html(&self) -> Result<String> {
        self.serializer.serialize(&self.arena, self.root_id)
    }
}

impl<I: 'static> Renderable<I> for NodeTemplate {
    fn renderable(&mut self) -> RenderFn<I> {
        // The root is checked in `new` and child links always point into
        // the same arena, so rendering cannot fail here.
        let html = self.to_html().unwrap_or_default();
        Arc::new(move |_info: &I| html.clone())
    }
}
