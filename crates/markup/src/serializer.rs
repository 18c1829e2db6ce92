//! HTML Serializer - Convert an element subtree to markup text
//!
//! Each node renders as open tag + contents + close tag:
//! - `Bool(true)` attributes are bare keys, `Bool(false)` ones are dropped
//! - nodes without content self-close (`<br/>`)
//! - with `format_output`, tags are indented one unit per depth and end
//!   with a newline; `skip_inline_format` keeps an element on one line

use crate::arena::ElementArena;
use crate::attributes::Attributes;
use crate::error::Result;
use crate::types::{AttrValue, NodeId, NodeKind};
use crate::utils::escape_html;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Repeated once per depth level
    pub indent: String,
    pub newline: String,
    /// Initial output buffer size
    pub capacity: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            newline: "\n".to_string(),
            capacity: 256,
        }
    }
}

/// Element tree serializer
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer {
    config: SerializerConfig,
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a node and its subtree at depth 0
    pub fn serialize(&self, arena: &ElementArena, node_id: NodeId) -> Result<String> {
        self.serialize_at(arena, node_id, 0)
    }

    /// Serialize a node and its subtree starting at `depth`
    pub fn serialize_at(&self, arena: &ElementArena, node_id: NodeId, depth: usize) -> Result<String> {
        let mut output = String::with_capacity(self.config.capacity);
        self.serialize_node(arena, node_id, depth, false, &mut output)?;
        tracing::trace!("Serialized node {} ({} bytes)", node_id, output.len());
        Ok(output)
    }

    /// Serialize a single node recursively
    ///
    /// `compact` is set below an element with `skip_inline_format`.
    fn serialize_node(
        &self,
        arena: &ElementArena,
        node_id: NodeId,
        depth: usize,
        compact: bool,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;
        let formatted = node.format_output() && !compact;
        let indent = if formatted {
            self.config.indent.repeat(depth)
        } else {
            String::new()
        };
        let newline = if formatted { self.config.newline.as_str() } else { "" };

        match node.kind() {
            NodeKind::Text(text) => {
                output.push_str(&indent);
                output.push_str(&escape_html(text));
                output.push_str(newline);
            }
            NodeKind::Element => {
                output.push_str(&indent);
                output.push('<');
                output.push_str(node.tag_name());
                self.serialize_attributes(node.attributes(), output);

                if !node.is_content_allowed() {
                    output.push_str("/>");
                    output.push_str(newline);
                    return Ok(());
                }

                let inline = node.skip_inline_format();
                output.push('>');
                if !inline {
                    output.push_str(newline);
                }

                for &child_id in node.children_ids() {
                    self.serialize_node(arena, child_id, depth + 1, compact || inline, output)?;
                }

                if !inline {
                    output.push_str(&indent);
                }
                output.push_str("</");
                output.push_str(node.tag_name());
                output.push('>');
                output.push_str(newline);
            }
        }

        Ok(())
    }

    fn serialize_attributes(&self, attributes: &Attributes, output: &mut String) {
        for (key, value) in attributes.iter() {
            let key = escape_html(key);
            if key.is_empty() {
                continue;
            }
            match value {
                AttrValue::Bool(true) => {
                    output.push(' ');
                    output.push_str(&key);
                }
                AttrValue::Bool(false) => {}
                other => {
                    output.push_str(&format!(" {}=\"{}\"", key, escape_html(&other.to_string())));
                }
            }
        }
    }
}

/// A node borrowed together with its arena; `Display` renders the subtree
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a ElementArena,
    node_id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// `node_id` must exist in `arena`; see [`ElementArena::node_ref`]
    pub(crate) fn new(arena: &'a ElementArena, node_id: NodeId) -> Self {
        Self { arena, node_id }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Render at the given indentation depth with the default serializer
    pub fn to_html(&self, depth: usize) -> Result<String> {
        HtmlSerializer::new().serialize_at(self.arena, self.node_id, depth)
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root was checked by `ElementArena::node_ref` and child links
        // always point into the same arena, so this cannot fail.
        let html = self.to_html(0).unwrap_or_default();
        f.write_str(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(arena: &ElementArena, id: NodeId) -> String {
        HtmlSerializer::new().serialize(arena, id).unwrap()
    }

    #[test]
    fn test_self_closing() {
        let mut arena = ElementArena::new();
        let p = arena.create_element("p", false);
        assert_eq!(render(&arena, p), "<p/>\n");
    }

    #[test]
    fn test_attribute_rules() {
        let mut arena = ElementArena::new();
        let span = arena.create_element("span", false);
        let node = arena.get_mut(span).unwrap();
        node.set("style", "a: test");
        node.set("type", true);
        node.set("test", 2);
        assert_eq!(render(&arena, span), "<span style=\"a: test\" type test=\"2\"/>\n");

        let rew = arena.create_element("rew", false);
        let node = arena.get_mut(rew).unwrap();
        node.set("test1", true);
        node.set("test2", false);
        node.set("test", 0);
        assert_eq!(render(&arena, rew), "<rew test1 test=\"0\"/>\n");
    }

    #[test]
    fn test_unformatted() {
        let mut arena = ElementArena::new();
        let p = arena.create_element("p", true);
        arena.set_format_output(p, false).unwrap();
        assert_eq!(render(&arena, p), "<p></p>");

        let node = arena.get_mut(p).unwrap();
        node.set("test1", true);
        node.set("test2", false);
        node.set("test", 0);
        assert_eq!(render(&arena, p), "<p test1 test=\"0\"></p>");

        let t = arena.create_element("t", false);
        arena.get_mut(t).unwrap().set("label", "test");
        arena.append_child(p, t).unwrap();
        assert_eq!(render(&arena, p), "<p test1 test=\"0\"><t label=\"test\"/></p>");
    }

    #[test]
    fn test_formatted_nesting() {
        let mut arena = ElementArena::new();
        let ul = arena.create_element("ul", true);
        let li = arena.create_element("li", true);
        let br = arena.create_element("br", false);
        arena.append_child(ul, li).unwrap();
        arena.append_child(li, br).unwrap();

        assert_eq!(render(&arena, ul), "<ul>\n\t<li>\n\t\t<br/>\n\t</li>\n</ul>\n");
        assert_eq!(
            HtmlSerializer::new().serialize_at(&arena, li, 2).unwrap(),
            "\t\t<li>\n\t\t\t<br/>\n\t\t</li>\n"
        );
    }

    #[test]
    fn test_skip_inline_format() {
        let mut arena = ElementArena::new();
        let div = arena.create_default();
        let label = arena.create_element("label", true);
        let text = arena.create_text("Name & <email>");
        arena.append_child(div, label).unwrap();
        arena.append_child(label, text).unwrap();
        arena.set_skip_inline_format(label, true).unwrap();

        assert_eq!(
            render(&arena, div),
            "<div>\n\t<label>Name &amp; &lt;email&gt;</label>\n</div>\n"
        );
    }

    #[test]
    fn test_text_nodes_escaped() {
        let mut arena = ElementArena::new();
        let p = arena.create_element("p", true);
        let text = arena.create_text("1 < 2");
        arena.append_child(p, text).unwrap();
        assert_eq!(render(&arena, p), "<p>\n\t1 &lt; 2\n</p>\n");

        arena.set_format_output(p, false).unwrap();
        assert_eq!(render(&arena, p), "<p>1 &lt; 2</p>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let mut arena = ElementArena::new();
        let a = arena.create_element("a", true);
        arena.set_format_output(a, false).unwrap();
        arena.get_mut(a).unwrap().set("title", "say \"hi\" & <bye>");
        arena.get_mut(a).unwrap().set("", "dropped");
        assert_eq!(
            render(&arena, a),
            "<a title=\"say &quot;hi&quot; &amp; &lt;bye&gt;\"></a>"
        );
    }

    #[test]
    fn test_custom_indent() {
        let mut arena = ElementArena::new();
        let div = arena.create_default();
        let span = arena.create_element("span", true);
        arena.append_child(div, span).unwrap();

        let serializer = HtmlSerializer::with_config(SerializerConfig {
            indent: "  ".to_string(),
            ..SerializerConfig::default()
        });
        assert_eq!(
            serializer.serialize(&arena, div).unwrap(),
            "<div>\n  <span>\n  </span>\n</div>\n"
        );
    }

    #[test]
    fn test_node_ref_display() {
        let mut arena = ElementArena::new();
        let hr = arena.create_element("hr", false);
        assert_eq!(arena.node_ref(hr).unwrap().to_string(), "<hr/>\n");
        assert_eq!(arena.node_ref(hr).unwrap().to_html(1).unwrap(), "\t<hr/>\n");
    }
}
