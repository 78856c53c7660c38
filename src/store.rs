//! Node Store & Tree Index: the arena that owns every node, plus the
//! id/name lookup maps and the root pointer.

use std::collections::HashMap;

use crate::error::{Result, TaxonomyError};
use crate::node::{NodeIndex, NodeRecord, TaxonomyNode};

/// A rooted taxonomic tree: nodes carry an id, a name, a rank and an
/// optional parent-distance; edges encode the child → parent relation.
///
/// Construct one with [`Taxonomy::from_ncbi`], [`Taxonomy::from_gtdb`],
/// [`Taxonomy::from_json`] or [`Taxonomy::from_newick`]; query and mutate it
/// with the methods on this type.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) id_to_index: HashMap<String, NodeIndex>,
    pub(crate) name_to_indices: HashMap<String, Vec<NodeIndex>>,
    pub(crate) root: Option<NodeIndex>,
    /// Implicit parent distance assumed when a node's stored distance is
    /// `None`. NCBI-loaded taxonomies fill in `1.0`; every other format
    /// leaves a missing distance as `None`.
    pub(crate) implicit_distance: Option<f32>,
    /// Newick-loaded taxonomies never populate `name_to_indices`, mirroring
    /// the observable contract that `find_all_by_name` returns nothing for
    /// them.
    pub(crate) index_names: bool,
}

impl Taxonomy {
    pub(crate) fn empty() -> Self {
        Taxonomy {
            nodes: Vec::new(),
            id_to_index: HashMap::new(),
            name_to_indices: HashMap::new(),
            root: None,
            implicit_distance: None,
            index_names: true,
        }
    }

    /// The root node, or `None` if the taxonomy is empty.
    pub fn root(&self) -> Option<TaxonomyNode> {
        self.root.map(|idx| self.node_value(idx))
    }

    /// Count of live (non-tombstoned) nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.removed).count()
    }

    /// `true` if the taxonomy has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the internal index for an external id.
    pub fn internal_index(&self, id: &str) -> Result<NodeIndex> {
        self.id_to_index
            .get(id)
            .copied()
            .filter(|&idx| !self.nodes[idx].removed)
            .ok_or_else(|| TaxonomyError::UnknownId(id.to_string()))
    }

    /// Look up a node by id, returning `None` if it is unknown.
    pub fn get(&self, id: &str) -> Option<TaxonomyNode> {
        self.internal_index(id).ok().map(|idx| self.node_value(idx))
    }

    /// Look up a node by id, erroring if it is unknown.
    pub fn get_or_fail(&self, id: &str) -> Result<TaxonomyNode> {
        let idx = self.internal_index(id)?;
        Ok(self.node_value(idx))
    }

    /// All live nodes, in internal-index order.
    pub fn iterate(&self) -> impl Iterator<Item = TaxonomyNode> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.removed)
            .map(|(idx, _)| self.node_value(idx))
    }

    /// Every node whose name equals `name`, ordered by internal index.
    /// Always empty for Newick-loaded taxonomies.
    pub fn find_all_by_name(&self, name: &str) -> Vec<TaxonomyNode> {
        let mut indices = match self.name_to_indices.get(name) {
            Some(v) => v.clone(),
            None => return Vec::new(),
        };
        indices.retain(|&idx| !self.nodes[idx].removed);
        indices.sort_unstable();
        indices.into_iter().map(|idx| self.node_value(idx)).collect()
    }

    pub(crate) fn node_value(&self, idx: NodeIndex) -> TaxonomyNode {
        let rec = &self.nodes[idx];
        TaxonomyNode {
            id: rec.id.clone(),
            name: rec.name.clone(),
            rank: rec.rank.clone(),
            parent: rec.parent.map(|p| self.nodes[p].id.clone()),
            parent_distance: rec.parent_distance,
            hidden: rec.hidden,
        }
    }

    pub(crate) fn insert_name_index(&mut self, name: &str, idx: NodeIndex) {
        if self.index_names {
            self.name_to_indices
                .entry(name.to_string())
                .or_default()
                .push(idx);
        }
    }

    pub(crate) fn remove_name_index(&mut self, name: &str, idx: NodeIndex) {
        if let Some(v) = self.name_to_indices.get_mut(name) {
            v.retain(|&i| i != idx);
            if v.is_empty() {
                self.name_to_indices.remove(name);
            }
        }
    }

    /// `true` if `descendant` is `ancestor` or a descendant of `ancestor`.
    /// Used by `edit_node`'s reparent cycle check; O(depth).
    pub(crate) fn is_ancestor_of(&self, ancestor: NodeIndex, descendant: NodeIndex) -> bool {
        let mut cur = Some(descendant);
        while let Some(idx) = cur {
            if idx == ancestor {
                return true;
            }
            cur = self.nodes[idx].parent;
        }
        false
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Taxonomy ({} nodes)>", self.len())
    }
}
