//! Arena-based element tree storage
//!
//! All nodes live in one `Vec<ElementNode>`; parent and child links are
//! `NodeId` indices. Nodes are never freed individually: detaching a node
//! only unlinks it, and it stays addressable until the arena is dropped.
//!
//! ```text
//! Arena: Vec<ElementNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{ElementError, Result};
use crate::ids::{IdGenerator, IdStrategy};
use crate::node::ElementNode;
use crate::serializer::NodeRef;
use crate::types::NodeId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Arena configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub capacity: usize,
    /// `format_output` of newly created nodes
    pub format_output: bool,
    /// `auto_identification_enabled` of newly created nodes
    pub auto_identification: bool,
    pub id_prefix: String,
    pub id_strategy: IdStrategy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            format_output: true,
            auto_identification: false,
            id_prefix: "e_".to_string(),
            id_strategy: IdStrategy::Counter,
        }
    }
}

/// Owner of every node of one or more element trees
#[derive(Debug)]
pub struct ElementArena {
    nodes: Vec<ElementNode>,
    config: ArenaConfig,
    id_generator: Box<dyn IdGenerator>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        let id_generator = config.id_strategy.generator();
        Self::with_id_generator(config, id_generator)
    }

    /// Use a caller-supplied id generator instead of `config.id_strategy`
    pub fn with_id_generator(config: ArenaConfig, id_generator: Box<dyn IdGenerator>) -> Self {
        Self {
            nodes: Vec::with_capacity(config.capacity),
            config,
            id_generator,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn alloc(&mut self, make: impl FnOnce(NodeId) -> ElementNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        let mut node = make(node_id);
        node.format_output = self.config.format_output;
        node.auto_identification_enabled = self.config.auto_identification;
        self.nodes.push(node);
        node_id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: impl Into<String>, content_allowed: bool) -> NodeId {
        let tag_name = tag_name.into();
        self.alloc(|id| ElementNode::element(id, tag_name, content_allowed))
    }

    /// Create a detached `<div>` that allows content
    pub fn create_default(&mut self) -> NodeId {
        self.create_element(ElementNode::DEFAULT_TAG, true)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let text = text.into();
        self.alloc(|id| ElementNode::text(id, text))
    }

    pub fn get(&self, node_id: NodeId) -> Result<&ElementNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(ElementError::NodeNotFound(node_id))
    }

    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut ElementNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(ElementError::NodeNotFound(node_id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementNode> {
        self.nodes.iter()
    }

    pub fn children(&self, node_id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(node_id)?.children_ids())
    }

    pub fn parent(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node_id)?.parent_id)
    }

    /// Iterate over ancestors, from parent to root
    pub fn ancestors(&self, node_id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            arena: self,
            current: self.get(node_id).ok().and_then(|n| n.parent_id),
        }
    }

    /// Check if `node_id` lies strictly below `ancestor_id`
    pub fn is_descendant_of(&self, node_id: NodeId, ancestor_id: NodeId) -> bool {
        self.ancestors(node_id).any(|id| id == ancestor_id)
    }

    /// Borrow a node as a displayable subtree
    pub fn node_ref(&self, node_id: NodeId) -> Result<NodeRef<'_>> {
        self.get(node_id)?;
        Ok(NodeRef::new(self, node_id))
    }

    // ---- tree mutation ----

    /// Append `child_id` as the last child of `parent_id`
    ///
    /// Re-appending a child to its current parent moves it to the end.
    /// On success the parent's format and auto-identification flags are
    /// applied to the child's subtree.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let parent = self.get(parent_id)?;
        if !parent.is_content_allowed() {
            return Err(ElementError::ContentNotAllowed(parent_id));
        }
        let format_output = parent.format_output;
        let auto_identification = parent.auto_identification_enabled;

        let current_parent = self.get(child_id)?.parent_id;
        if child_id == parent_id || self.is_descendant_of(parent_id, child_id) {
            return Err(ElementError::HierarchyCycle(child_id));
        }

        match current_parent {
            Some(current) if current == parent_id => {
                tracing::debug!("Moving node {} to the end of {}", child_id, parent_id);
                self.unlink(parent_id, child_id)?;
            }
            Some(_) => return Err(ElementError::AlreadyAttached(child_id)),
            None => {}
        }

        self.get_mut(parent_id)?.children_ids.push(child_id);
        self.get_mut(child_id)?.parent_id = Some(parent_id);

        self.apply_to_subtree(child_id, |node| {
            node.format_output = format_output;
            node.auto_identification_enabled = auto_identification;
        })?;

        if auto_identification && self.get(child_id)?.is_element() && !self.get(child_id)?.has("id") {
            let id = self.generate_id();
            self.get_mut(child_id)?.set_id(id);
        }

        tracing::trace!("Appended node {} to {}", child_id, parent_id);
        Ok(())
    }

    /// Remove `child_id` from `parent_id`; no-op if it is not a child there
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(parent_id)?;
        if self.get(child_id)?.parent_id == Some(parent_id) {
            self.unlink(parent_id, child_id)?;
            tracing::trace!("Removed node {} from {}", child_id, parent_id);
        }
        Ok(())
    }

    /// Remove a node from whatever parent holds it
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        match self.get(node_id)?.parent_id {
            Some(parent_id) => self.remove_child(parent_id, node_id),
            None => Ok(()),
        }
    }

    fn unlink(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get_mut(parent_id)?
            .children_ids
            .retain(|id| *id != child_id);
        self.get_mut(child_id)?.parent_id = None;
        Ok(())
    }

    /// Run `apply` on every node of the subtree, root first
    pub fn apply_to_subtree<F>(&mut self, start_id: NodeId, mut apply: F) -> Result<()>
    where
        F: FnMut(&mut ElementNode),
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get_mut(node_id)?;
            apply(&mut *node);
            stack.extend(node.children_ids.iter().rev().copied());
        }

        Ok(())
    }

    // ---- style flags ----

    /// Set `format_output` on the node and its whole subtree
    pub fn set_format_output(&mut self, node_id: NodeId, format_output: bool) -> Result<()> {
        self.apply_to_subtree(node_id, |node| node.format_output = format_output)
    }

    /// Set auto-identification on the node and its whole subtree
    pub fn set_auto_identification_enabled(&mut self, node_id: NodeId, enabled: bool) -> Result<()> {
        self.apply_to_subtree(node_id, |node| node.auto_identification_enabled = enabled)
    }

    /// Set `skip_inline_format` on this node only
    pub fn set_skip_inline_format(&mut self, node_id: NodeId, skip: bool) -> Result<()> {
        self.get_mut(node_id)?.set_skip_inline_format(skip);
        Ok(())
    }

    // ---- ids ----

    /// Produce a fresh `prefix + token` id
    pub fn generate_id(&mut self) -> String {
        let id = format!("{}{}", self.config.id_prefix, self.id_generator.next_token());
        tracing::trace!("Generated id {}", id);
        id
    }

    /// The node's id, generating and storing one first when it has none
    /// and auto-identification is enabled for it
    pub fn get_id(&mut self, node_id: NodeId) -> Result<String> {
        let node = self.get(node_id)?;
        if node.has("id") || !node.is_element() || !node.is_auto_identification_enabled() {
            return Ok(node.id().into_owned());
        }

        let id = self.generate_id();
        self.get_mut(node_id)?.set_id(id.clone());
        Ok(id)
    }

    // ---- search ----

    /// Traverse a subtree depth-first, pre-order, without recursion
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&ElementNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            stack.extend(node.children_ids.iter().rev().copied());
        }

        Ok(())
    }

    /// First element (root included) whose id equals `id`, in pre-order
    pub fn find_by_id(&self, root_id: NodeId, id: &str) -> Option<NodeId> {
        let mut stack = vec![root_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id).ok()?;
            if node.is_element() && node.has("id") && node.id() == id {
                return Some(node_id);
            }
            stack.extend(node.children_ids.iter().rev().copied());
        }

        None
    }

    /// Every element (root included) carrying `class`, in pre-order
    ///
    /// An unknown root yields an empty list.
    pub fn find_all_by_class(&self, root_id: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![root_id];

        while let Some(node_id) = stack.pop() {
            let Ok(node) = self.get(node_id) else {
                break;
            };
            if node.is_element() && node.contains_class(class) {
                found.push(node_id);
            }
            stack.extend(node.children_ids.iter().rev().copied());
        }

        found
    }

    // ---- cloning ----

    /// Copy a subtree into fresh nodes of this arena
    ///
    /// The clone has no parent. Ids are dropped on every copy and
    /// regenerated for copies whose auto-identification is enabled.
    pub fn deep_clone(&mut self, node_id: NodeId) -> Result<NodeId> {
        let mut order = Vec::new();
        self.traverse_df(node_id, |node| {
            order.push(node.node_id);
            Ok(())
        })?;

        let mut remap: AHashMap<NodeId, NodeId> = AHashMap::with_capacity(order.len());

        // Pre-order: every parent is copied before its children
        for source_id in order {
            let mut copy = self.get(source_id)?.clone();
            let new_id = self.nodes.len() as NodeId;
            let new_parent = if source_id == node_id {
                None
            } else {
                copy.parent_id.and_then(|p| remap.get(&p).copied())
            };

            copy.node_id = new_id;
            copy.parent_id = new_parent;
            copy.children_ids.clear();
            copy.remove("id");
            let needs_id = copy.is_element() && copy.auto_identification_enabled;

            self.nodes.push(copy);
            remap.insert(source_id, new_id);

            if let Some(parent_id) = new_parent {
                self.get_mut(parent_id)?.children_ids.push(new_id);
            }
            if needs_id {
                let id = self.generate_id();
                self.get_mut(new_id)?.set_id(id);
            }
        }

        let clone_id = remap
            .get(&node_id)
            .copied()
            .ok_or(ElementError::NodeNotFound(node_id))?;
        tracing::debug!("Cloned subtree {} into {} ({} nodes)", node_id, clone_id, remap.len());
        Ok(clone_id)
    }
}

impl Default for ElementArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node
pub struct AncestorIterator<'a> {
    arena: &'a ElementArena,
    current: Option<NodeId>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.arena.get(id).ok().and_then(|n| n.parent_id);
        Some(id)
    }
}
