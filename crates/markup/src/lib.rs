//! Markup: programmatic HTML element trees
//!
//! Build a tree of elements, set attributes and classes, and serialize it
//! to formatted or compact HTML.
//!
//! ## Core Design
//!
//! ```text
//! ElementArena (owns Vec<ElementNode>) → NodeId (u32) links → HtmlSerializer → String
//! ```
//!
//! - **No Rc/RefCell**: parents and children refer to each other by index
//! - **One owner**: a node has at most one parent and is never its own ancestor
//! - **Scalars only**: attribute values are strings, booleans or numbers
//!
//! ```
//! use markup::{ElementArena, HtmlSerializer};
//!
//! let mut arena = ElementArena::new();
//! let list = arena.create_element("ul", true);
//! let item = arena.create_element("li", true);
//! arena.append_child(list, item).unwrap();
//! arena.get_mut(item).unwrap().add_class("active");
//!
//! let html = HtmlSerializer::new().serialize(&arena, list).unwrap();
//! assert_eq!(html, "<ul>\n\t<li class=\"active\">\n\t</li>\n</ul>\n");
//! ```

pub mod arena;
pub mod attributes;
pub mod build;
pub mod error;
pub mod head;
pub mod ids;
pub mod node;
pub mod render;
pub mod serializer;
pub mod types;
pub mod utils;

pub use arena::{ArenaConfig, ElementArena};
pub use attributes::Attributes;
pub use build::{ContainerElementBuilder, InlineBuildElement, SingleElementBuilder};
pub use error::{ElementError, Result};
pub use head::{Link, LinkRelation, RemoteSourceScript, ScriptOptions};
pub use ids::{CounterIdGenerator, FnIdGenerator, IdGenerator, IdStrategy, UuidIdGenerator};
pub use node::ElementNode;
pub use render::{InlineCodeElement, NodeTemplate, RenderFn, Renderable};
pub use serializer::{HtmlSerializer, NodeRef, SerializerConfig};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_node_creation() {
        let mut arena = ElementArena::new();
        let id = arena.create_default();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.node_ref(id).unwrap().to_string(), "<div>\n</div>\n");
    }

    #[test]
    fn test_config_from_json() {
        let config: ArenaConfig =
            serde_json::from_str(r#"{"auto_identification": true, "id_strategy": "uuid"}"#).unwrap();
        assert!(config.auto_identification);
        assert_eq!(config.id_prefix, "e_");
        assert_eq!(config.id_strategy, IdStrategy::Uuid);

        let config: SerializerConfig = serde_json::from_str(r#"{"indent": "    "}"#).unwrap();
        assert_eq!(config.newline, "\n");
    }
}
