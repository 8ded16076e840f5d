//! Trie node types

use serde::Serialize;

/// First year of every data series; `values[i]` belongs to `BASE_YEAR + i`
pub const BASE_YEAR: i32 = 2000;

/// Index of a node in the trie arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

/// A node in the geographic trie
///
/// The parent link is only used to rebuild paths; ownership runs from the
/// arena, and children are listed in insertion order.
#[derive(Clone, Debug)]
pub struct TrieNode {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A named place (state, county) that may hold places and data
    Geo(GeoNode),
    /// A leaf holding one attribute's yearly series
    Data(DataNode),
}

#[derive(Clone, Debug, Default)]
pub struct GeoNode {
    pub name: String,
    pub children: Vec<NodeId>,
}

/// One attribute's values for consecutive years starting at `BASE_YEAR`
///
/// A `None` slot is a year inside the span that the source data lacks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataNode {
    pub attribute: String,
    pub values: Vec<Option<f32>>,
    /// Year labels parallel to `values`
    pub labels: Vec<String>,
}

impl TrieNode {
    pub fn as_geo(&self) -> Option<&GeoNode> {
        match &self.kind {
            NodeKind::Geo(geo) => Some(geo),
            NodeKind::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&DataNode> {
        match &self.kind {
            NodeKind::Data(data) => Some(data),
            NodeKind::Geo(_) => None,
        }
    }

    /// Children of a geo node; data nodes have none
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Geo(geo) => &geo.children,
            NodeKind::Data(_) => &[],
        }
    }
}

impl DataNode {
    pub fn new(
        attribute: impl Into<String>,
        values: Vec<Option<f32>>,
        labels: Vec<String>,
    ) -> Self {
        DataNode {
            attribute: attribute.into(),
            values,
            labels,
        }
    }

    /// Value for a year, if the year falls inside the series and is present
    pub fn value_at(&self, year: i32) -> Option<f32> {
        let offset = usize::try_from(year.checked_sub(BASE_YEAR)?).ok()?;
        self.values.get(offset).copied().flatten()
    }

    /// Arithmetic mean over the present values
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .flatten()
            .fold((0.0f64, 0usize), |(s, c), v| (s + f64::from(*v), c + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
