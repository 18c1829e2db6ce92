//! Head element presets: `<link>` and remote `<script>`
//!
//! Thin constructors that create a preset node in an arena and keep its id.

use crate::arena::ElementArena;
use crate::error::Result;
use crate::types::NodeId;
use std::fmt;

/// Well-known `rel` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    Author,
    DnsPrefetch,
    Help,
    Icon,
    Shortcut,
    License,
    Next,
    Pingback,
    Preconnect,
    Prefetch,
    Preload,
    Prerender,
    Prev,
    Search,
}

impl LinkRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkRelation::Author => "author",
            LinkRelation::DnsPrefetch => "dns-prefetch",
            LinkRelation::Help => "help",
            LinkRelation::Icon => "icon",
            LinkRelation::Shortcut => "shortcut",
            LinkRelation::License => "license",
            LinkRelation::Next => "next",
            LinkRelation::Pingback => "pingback",
            LinkRelation::Preconnect => "preconnect",
            LinkRelation::Prefetch => "prefetch",
            LinkRelation::Preload => "preload",
            LinkRelation::Prerender => "prerender",
            LinkRelation::Prev => "prev",
            LinkRelation::Search => "search",
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<link rel="..." href="..." type="..."/>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    node_id: NodeId,
}

impl Link {
    pub const DEFAULT_TYPE: &'static str = "text/html";

    pub fn new(
        arena: &mut ElementArena,
        href: &str,
        relation: &str,
        content_type: Option<&str>,
    ) -> Result<Self> {
        let node_id = arena.create_element("link", false);
        let node = arena.get_mut(node_id)?;
        node.set("rel", relation);
        node.set("href", href);
        if let Some(content_type) = content_type.filter(|t| !t.is_empty()) {
            node.set("type", content_type);
        }
        Ok(Self { node_id })
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The `type` attribute, `text/html` when unset
    pub fn content_type(&self, arena: &ElementArena) -> Result<String> {
        let node = arena.get(self.node_id)?;
        Ok(node
            .attributes()
            .get_str("type")
            .unwrap_or(Self::DEFAULT_TYPE)
            .to_string())
    }
}

/// Optional attributes of a remote script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
    pub content_type: Option<String>,
    pub integrity: Option<String>,
    pub crossorigin: Option<String>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            content_type: Some(RemoteSourceScript::TYPE_JAVASCRIPT.to_string()),
            integrity: None,
            crossorigin: None,
        }
    }
}

/// `<script src="..." integrity="..." crossorigin="..." type="..."></script>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteSourceScript {
    node_id: NodeId,
}

impl RemoteSourceScript {
    pub const TYPE_JAVASCRIPT: &'static str = "application/javascript";
    pub const FALLBACK_TYPE: &'static str = "application/octet-stream";

    /// A JavaScript source without integrity or CORS settings
    pub fn new(arena: &mut ElementArena, src: &str) -> Result<Self> {
        Self::with_options(arena, src, ScriptOptions::default())
    }

    pub fn with_options(arena: &mut ElementArena, src: &str, options: ScriptOptions) -> Result<Self> {
        let node_id = arena.create_element("script", true);
        let node = arena.get_mut(node_id)?;
        node.set("src", src);

        let ScriptOptions {
            content_type,
            integrity,
            crossorigin,
        } = options;
        for (key, value) in [
            ("integrity", integrity),
            ("crossorigin", crossorigin),
            ("type", content_type),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                node.set(key, value);
            }
        }
        Ok(Self { node_id })
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The `type` attribute, `application/octet-stream` when unset
    pub fn content_type(&self, arena: &ElementArena) -> Result<String> {
        let node = arena.get(self.node_id)?;
        Ok(node
            .attributes()
            .get_str("type")
            .unwrap_or(Self::FALLBACK_TYPE)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link() {
        let mut arena = ElementArena::new();
        let link = Link::new(&mut arena, "/favicon.ico", LinkRelation::Icon.as_str(), None).unwrap();

        assert_eq!(link.content_type(&arena).unwrap(), "text/html");
        assert_eq!(
            arena.node_ref(link.node_id()).unwrap().to_string(),
            "<link rel=\"icon\" href=\"/favicon.ico\"/>\n"
        );

        let css = Link::new(&mut arena, "/a.css", "stylesheet", Some("text/css")).unwrap();
        assert_eq!(css.content_type(&arena).unwrap(), "text/css");
    }

    #[test]
    fn test_remote_script_defaults() {
        let mut arena = ElementArena::new();
        let script = RemoteSourceScript::new(&mut arena, "/app.js").unwrap();
        assert_eq!(script.content_type(&arena).unwrap(), "application/javascript");

        let id = script.node_id();
        arena.set_format_output(id, false).unwrap();
        assert_eq!(
            arena.node_ref(id).unwrap().to_string(),
            "<script src=\"/app.js\" type=\"application/javascript\"></script>"
        );
    }

    #[test]
    fn test_remote_script_options() {
        let mut arena = ElementArena::new();
        let script = RemoteSourceScript::with_options(
            &mut arena,
            "https://cdn.example.com/lib.js",
            ScriptOptions {
                content_type: None,
                integrity: Some("sha384-abc".to_string()),
                crossorigin: Some("anonymous".to_string()),
            },
        )
        .unwrap();

        assert_eq!(script.content_type(&arena).unwrap(), "application/octet-stream");
        let keys: Vec<_> = arena
            .get(script.node_id())
            .unwrap()
            .attributes()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["src", "integrity", "crossorigin"]);
    }

    #[test]
    fn test_relation_names() {
        assert_eq!(LinkRelation::DnsPrefetch.to_string(), "dns-prefetch");
        assert_eq!(LinkRelation::Prev.as_str(), "prev");
    }
}
