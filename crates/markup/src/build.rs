//! On-demand element builders
//!
//! A builder creates a fresh arena for every call, lets the implementor
//! fill it from the caller's context and info values, and returns the
//! serialized markup. `C` and `I` are opaque to this crate.

use crate::arena::ElementArena;
use crate::error::Result;
use crate::render::{RenderFn, Renderable};
use crate::serializer::HtmlSerializer;
use crate::types::NodeId;
use std::sync::{Arc, Mutex, PoisonError};

/// Tag of the hidden container used when a builder declines to provide one
const HIDDEN_CONTAINER_TAG: &str = "_";

/// Builds one element and renders it
pub trait SingleElementBuilder<C, I> {
    /// Create the element that represents this builder (a `<div>` by default)
    fn build_initial_element(&self, arena: &mut ElementArena, _context: &C, _info: &I) -> NodeId {
        arena.create_default()
    }

    /// Fill the element
    fn build_final_element(
        &mut self,
        arena: &mut ElementArena,
        element_id: NodeId,
        context: &C,
        info: &I,
    ) -> Result<()>;

    fn serializer(&self) -> HtmlSerializer {
        HtmlSerializer::new()
    }

    fn build_element(&mut self, context: &C, info: &I) -> Result<String> {
        let mut arena = ElementArena::new();
        let element_id = self.build_initial_element(&mut arena, context, info);
        self.build_final_element(&mut arena, element_id, context, info)?;
        self.serializer().serialize(&arena, element_id)
    }
}

/// Builds a container and its children and renders them
///
/// Returning `None` from [`build_initial_container`](Self::build_initial_container)
/// renders only the children, without a wrapping tag.
pub trait ContainerElementBuilder<C, I> {
    fn build_initial_container(&self, arena: &mut ElementArena, _context: &C, _info: &I) -> Option<NodeId> {
        Some(arena.create_default())
    }

    fn build_final_container(
        &mut self,
        arena: &mut ElementArena,
        container_id: NodeId,
        context: &C,
        info: &I,
    ) -> Result<()>;

    fn serializer(&self) -> HtmlSerializer {
        HtmlSerializer::new()
    }

    fn build_container(&mut self, context: &C, info: &I) -> Result<String> {
        let mut arena = ElementArena::new();
        let serializer = self.serializer();

        match self.build_initial_container(&mut arena, context, info) {
            Some(container_id) => {
                self.build_final_container(&mut arena, container_id, context, info)?;
                serializer.serialize(&arena, container_id)
            }
            None => {
                let container_id = arena.create_element(HIDDEN_CONTAINER_TAG, true);
                self.build_final_container(&mut arena, container_id, context, info)?;

                let mut output = String::new();
                for &child_id in arena.children(container_id)? {
                    output.push_str(&serializer.serialize(&arena, child_id)?);
                }
                Ok(output)
            }
        }
    }
}

/// Binds a [`SingleElementBuilder`] to a context and exposes it as a renderable
///
/// The element is rebuilt on every call of the returned callback, so the
/// markup follows the info value passed in.
pub struct InlineBuildElement<B, C> {
    builder: Arc<Mutex<B>>,
    context: Arc<C>,
}

impl<B, C> InlineBuildElement<B, C> {
    pub fn new(builder: B, context: C) -> Self {
        Self {
            builder: Arc::new(Mutex::new(builder)),
            context: Arc::new(context),
        }
    }
}

impl<B, C, I> Renderable<I> for InlineBuildElement<B, C>
where
    B: SingleElementBuilder<C, I> + Send + 'static,
    C: Send + Sync + 'static,
    I: 'static,
{
    fn renderable(&mut self) -> RenderFn<I> {
        let builder = Arc::clone(&self.builder);
        let context = Arc::clone(&self.context);
        Arc::new(move |info: &I| {
            let mut builder = builder.lock().unwrap_or_else(PoisonError::into_inner);
            builder.build_element(&context, info).unwrap_or_else(|e| {
                tracing::warn!("Failed to build inline element: {}", e);
                String::new()
            })
        })
    }
}
