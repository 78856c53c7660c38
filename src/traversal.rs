//! Lineage, parent/child navigation, LCA and rank-anchored lookup.

use std::collections::HashSet;

use crate::error::Result;
use crate::node::{NodeIndex, TaxonomyNode};
use crate::store::Taxonomy;

impl Taxonomy {
    /// The chain of internal indices from `idx` up to (and including) the
    /// root, deepest first.
    fn lineage_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            chain.push(i);
            cur = self.nodes[i].parent;
        }
        chain
    }

    /// `[id, parent(id), parent(parent(id)), …, root]`. Includes `id`
    /// itself; has length `depth + 1`.
    pub fn lineage(&self, id: &str) -> Result<Vec<TaxonomyNode>> {
        let idx = self.internal_index(id)?;
        Ok(self
            .lineage_indices(idx)
            .into_iter()
            .map(|i| self.node_value(i))
            .collect())
    }

    /// `lineage(id)` without its first element. Empty at the root.
    pub fn parents(&self, id: &str) -> Result<Vec<TaxonomyNode>> {
        let idx = self.internal_index(id)?;
        Ok(self
            .lineage_indices(idx)
            .into_iter()
            .skip(1)
            .map(|i| self.node_value(i))
            .collect())
    }

    /// The immediate parent, or `None` at the root.
    pub fn parent(&self, id: &str) -> Result<Option<TaxonomyNode>> {
        let idx = self.internal_index(id)?;
        Ok(self.nodes[idx].parent.map(|p| self.node_value(p)))
    }

    /// `(parent, distance)`, or `(None, None)` at the root. `distance` is
    /// the stored parent-distance of `id`, defaulting to `1.0` for
    /// NCBI-loaded taxonomies when no distance was stored; every other
    /// format reports the literal stored value (`None` if absent).
    pub fn parent_with_distance(&self, id: &str) -> Result<(Option<TaxonomyNode>, Option<f32>)> {
        let idx = self.internal_index(id)?;
        let rec = &self.nodes[idx];
        match rec.parent {
            None => Ok((None, None)),
            Some(p) => {
                let distance = rec.parent_distance.or(self.implicit_distance);
                Ok((Some(self.node_value(p)), distance))
            }
        }
    }

    /// Immediate children, in insertion order.
    pub fn children(&self, id: &str) -> Result<Vec<TaxonomyNode>> {
        let idx = self.internal_index(id)?;
        Ok(self.nodes[idx]
            .children
            .iter()
            .filter(|&&c| !self.nodes[c].removed)
            .map(|&c| self.node_value(c))
            .collect())
    }

    /// Lowest common ancestor of zero or more ids.
    ///
    /// `lca(&[])` is `Ok(None)`; `lca(&[x])` is `x` itself; any unknown id
    /// errors. For two or more ids, the lineage of each is intersected and
    /// the deepest node present in every intersection is returned,
    /// equivalently the first node on the first id's lineage (walked
    /// root-ward) that also appears in every other id's lineage.
    pub fn lca(&self, ids: &[&str]) -> Result<Option<TaxonomyNode>> {
        match ids.len() {
            0 => Ok(None),
            1 => Ok(Some(self.get_or_fail(ids[0])?)),
            _ => {
                let indices: Vec<NodeIndex> = ids
                    .iter()
                    .map(|id| self.internal_index(id))
                    .collect::<Result<_>>()?;

                let first_lineage = self.lineage_indices(indices[0]);
                let other_sets: Vec<HashSet<NodeIndex>> = indices[1..]
                    .iter()
                    .map(|&idx| self.lineage_indices(idx).into_iter().collect())
                    .collect();

                for &candidate in &first_lineage {
                    if other_sets.iter().all(|set| set.contains(&candidate)) {
                        return Ok(Some(self.node_value(candidate)));
                    }
                }
                // Unreachable in a well-formed single-rooted tree: the root
                // is always a common ancestor.
                Ok(None)
            }
        }
    }

    /// Walk `id`'s lineage (self included) and return the first node whose
    /// rank equals `rank`. `None` if no ancestor (or `id` itself) matches.
    pub fn parent_at_rank(&self, id: &str, rank: &str) -> Result<Option<TaxonomyNode>> {
        let idx = self.internal_index(id)?;
        for i in self.lineage_indices(idx) {
            if self.nodes[i].rank == rank {
                return Ok(Some(self.node_value(i)));
            }
        }
        Ok(None)
    }
}
