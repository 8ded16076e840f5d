//! Geographic trie: state → county → attribute series

use super::node::{DataNode, GeoNode, NodeId, NodeKind, TrieNode};
use crate::model::{format_value, state_name};
use std::fmt::Write as _;

/// Sentinel returned by [`GeoTrie::search_value`] when nothing matches
pub const NOT_AVAILABLE: &str = "N/A";

/// Appended to the county name when searching
pub const COUNTY_SUFFIX: &str = " County";

/// Hierarchy of named places ending in attribute series
///
/// Nodes live in a single arena; the root is an unnamed geo node at index 0.
/// Paths match segment by segment, exactly and case-sensitively.
pub struct GeoTrie {
    nodes: Vec<TrieNode>,
}

impl GeoTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        GeoTrie {
            nodes: vec![TrieNode {
                parent: None,
                kind: NodeKind::Geo(GeoNode::default()),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    /// Insert a series under a '/'-separated path
    ///
    /// Missing places along the path are created. A new data node is always
    /// appended, even if the place already holds the same attribute; lookups
    /// only ever see the first one.
    pub fn insert(
        &mut self,
        path: &str,
        attribute: impl Into<String>,
        values: Vec<Option<f32>>,
        labels: Vec<String>,
    ) -> NodeId {
        let mut current = self.root();
        for segment in path.split('/') {
            current = match self.find_child(current, segment) {
                Some(child) => child,
                None => self.push_child(
                    current,
                    NodeKind::Geo(GeoNode {
                        name: segment.to_string(),
                        children: Vec::new(),
                    }),
                ),
            };
        }
        self.push_child(
            current,
            NodeKind::Data(DataNode::new(attribute, values, labels)),
        )
    }

    /// Find a geo child by exact name
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|&id| matches!(self.node(id).as_geo(), Some(geo) if geo.name == name))
    }

    /// Walk a sequence of names down from the root
    pub fn find_path<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Option<NodeId> {
        segments
            .into_iter()
            .try_fold(self.root(), |current, name| self.find_child(current, name))
    }

    /// First data node for `attribute` under a place
    pub fn find_data(&self, place: NodeId, attribute: &str) -> Option<&DataNode> {
        self.data_children(place).find(|d| d.attribute == attribute)
    }

    /// Look up one value by state code, county, attribute and year
    ///
    /// The county is searched as `"<county> County"`; no bare-name fallback.
    pub fn lookup(&self, state_code: &str, county: &str, attribute: &str, year: i32) -> Option<f32> {
        let state = state_name(state_code)?;
        let county = format!("{}{}", county, COUNTY_SUFFIX);
        let place = self.find_path([state, county.as_str()])?;
        self.find_data(place, attribute)?.value_at(year)
    }

    /// Look up one value, formatted, or "N/A"
    pub fn search_value(&self, state_code: &str, county: &str, attribute: &str, year: &str) -> String {
        year.parse()
            .ok()
            .and_then(|year| self.lookup(state_code, county, attribute, year))
            .map(format_value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Direct children of the root, in insertion order
    pub fn states(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.geo_children(self.root())
            .map(|(id, geo)| (id, geo.name.as_str()))
    }

    pub fn geo_children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &GeoNode)> + '_ {
        self.node(id)
            .children()
            .iter()
            .filter_map(move |&child| self.node(child).as_geo().map(|geo| (child, geo)))
    }

    pub fn data_children(&self, id: NodeId) -> impl Iterator<Item = &DataNode> + '_ {
        self.node(id)
            .children()
            .iter()
            .filter_map(move |&child| self.node(child).as_data())
    }

    /// Rebuild a node's path from its parent links
    ///
    /// Places read `/Alabama/Autauga County`; data nodes end in `/(data)`.
    /// The root is `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = self.node(cur);
            match &node.kind {
                NodeKind::Geo(geo) if node.parent.is_some() => names.push(geo.name.as_str()),
                NodeKind::Geo(_) => {}
                NodeKind::Data(_) => names.push("(data)"),
            }
            current = node.parent;
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.iter().rev().fold(String::new(), |mut acc, name| {
            acc.push('/');
            acc.push_str(name);
            acc
        })
    }

    /// Indented listing of the subtree under `id`
    pub fn dump_from(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_node(id, 0, &mut out);
        out
    }

    /// Indented listing of the whole trie
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for &child in self.node(self.root()).children() {
            self.dump_node(child, 0, &mut out);
        }
        out
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn data_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.as_data().is_some()).count()
    }

    // === Internal helpers ===

    fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TrieNode {
            parent: Some(parent),
            kind,
        });
        if let NodeKind::Geo(geo) = &mut self.nodes[parent.0].kind {
            geo.children.push(id);
        }
        id
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match &self.node(id).kind {
            NodeKind::Geo(geo) => {
                let _ = writeln!(out, "{}{}", indent, geo.name);
                for &child in &geo.children {
                    self.dump_node(child, depth + 1, out);
                }
            }
            NodeKind::Data(data) => {
                let span = match (data.labels.first(), data.labels.last()) {
                    (Some(first), Some(last)) => format!("{}..{}", first, last),
                    _ => "empty".to_string(),
                };
                let _ = writeln!(
                    out,
                    "{}{} [{}] ({} values)",
                    indent,
                    data.attribute,
                    span,
                    data.values.iter().flatten().count()
                );
            }
        }
    }
}

impl Default for GeoTrie {
    fn default() -> Self {
        Self::new()
    }
}
