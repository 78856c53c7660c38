//! add / edit / remove / prune. `clone()` is the derived [`Clone`] impl on
//! [`Taxonomy`]: every field is owned, so a derived clone already produces
//! an independent taxonomy sharing no mutable state with the original.

use std::collections::HashSet;

use crate::error::{Result, TaxonomyError};
use crate::node::{NodeIndex, NodeRecord, TaxonomyNode};
use crate::store::Taxonomy;

/// Selects which half of `Taxonomy::prune`'s keep/remove pair is in effect.
#[derive(Debug, Clone, Copy)]
pub enum PruneSpec<'a> {
    /// Retain these ids plus their ancestor chains; drop everything else.
    Keep(&'a [&'a str]),
    /// Drop these ids and all of their descendants; retain everything else.
    Remove(&'a [&'a str]),
}

impl Taxonomy {
    /// Insert a new leaf node under `parent_id`.
    ///
    /// Errors if `parent_id` is unknown or `new_id` is already present. On
    /// success the new node's internal index is `len()` before the call;
    /// parent-distance starts as `None`.
    pub fn add_node(
        &mut self,
        parent_id: &str,
        new_id: &str,
        name: &str,
        rank: &str,
    ) -> Result<TaxonomyNode> {
        let parent_idx = self.internal_index(parent_id)?;
        if self.id_to_index.contains_key(new_id) {
            return Err(TaxonomyError::DuplicateId(new_id.to_string()));
        }

        let idx = self.nodes.len();
        let mut rec = NodeRecord::new(new_id.to_string(), name.to_string(), rank.to_string());
        rec.parent = Some(parent_idx);
        self.nodes.push(rec);
        self.id_to_index.insert(new_id.to_string(), idx);
        self.insert_name_index(name, idx);
        self.nodes[parent_idx].children.push(idx);

        Ok(self.node_value(idx))
    }

    /// Edit any subset of `id`'s mutable fields.
    ///
    /// Reparenting verifies the new parent exists and is not a descendant of
    /// `id` (an O(depth) cycle check), then moves `id` from its old
    /// parent's children list to the tail of the new parent's. Renaming
    /// updates the name index incrementally.
    pub fn edit_node(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        parent_distance: Option<Option<f32>>,
        name: Option<&str>,
        rank: Option<&str>,
    ) -> Result<TaxonomyNode> {
        let idx = self.internal_index(id)?;

        if let Some(new_parent_id) = parent_id {
            let new_parent_idx = self.internal_index(new_parent_id)?;
            if self.is_ancestor_of(idx, new_parent_idx) {
                return Err(TaxonomyError::Cycle {
                    child: id.to_string(),
                    new_parent: new_parent_id.to_string(),
                });
            }
            if let Some(old_parent_idx) = self.nodes[idx].parent {
                self.nodes[old_parent_idx].children.retain(|&c| c != idx);
            }
            self.nodes[new_parent_idx].children.push(idx);
            self.nodes[idx].parent = Some(new_parent_idx);
        }

        if let Some(distance) = parent_distance {
            self.nodes[idx].parent_distance = distance;
        }

        if let Some(new_name) = name {
            let old_name = self.nodes[idx].name.clone();
            if old_name != new_name {
                self.remove_name_index(&old_name, idx);
                self.insert_name_index(new_name, idx);
                self.nodes[idx].name = new_name.to_string();
            }
        }

        if let Some(new_rank) = rank {
            self.nodes[idx].rank = new_rank.to_string();
        }

        Ok(self.node_value(idx))
    }

    /// Remove `id`. Its children are reparented to `id`'s parent, appended
    /// to the tail of the new parent's children list, preserving their
    /// relative order. The root cannot be removed. The id and name-index
    /// entries are freed; the internal index is tombstoned rather than
    /// reused until the next `prune`.
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        let idx = self.internal_index(id)?;
        let parent_idx = match self.nodes[idx].parent {
            Some(p) => p,
            None => return Err(TaxonomyError::InvalidFormat(
                "cannot remove the root node".to_string(),
            )),
        };

        self.nodes[parent_idx].children.retain(|&c| c != idx);

        let children: Vec<NodeIndex> = std::mem::take(&mut self.nodes[idx].children);
        for &child in &children {
            self.nodes[child].parent = Some(parent_idx);
        }
        self.nodes[parent_idx].children.extend(children);

        let name = self.nodes[idx].name.clone();
        self.remove_name_index(&name, idx);
        self.id_to_index.remove(id);
        self.nodes[idx].removed = true;

        Ok(())
    }

    /// Prune the taxonomy down to a new, renumbered-but-order-preserved
    /// `Taxonomy` per [`PruneSpec`].
    pub fn prune(&self, spec: PruneSpec) -> Result<Taxonomy> {
        match spec {
            PruneSpec::Keep(keep) => self.prune_keep(keep),
            PruneSpec::Remove(remove) => self.prune_remove(remove),
        }
    }

    /// Retain only nodes in `keep` plus their ancestor chains back to the
    /// root. Returns a fresh `Taxonomy` with renumbered but order-preserved
    /// indices. `keep = &[]` yields an empty taxonomy.
    fn prune_keep(&self, keep: &[&str]) -> Result<Taxonomy> {
        let mut retain: HashSet<NodeIndex> = HashSet::new();
        for id in keep {
            let idx = self.internal_index(id)?;
            let mut cur = Some(idx);
            while let Some(i) = cur {
                if !retain.insert(i) {
                    break;
                }
                cur = self.nodes[i].parent;
            }
        }
        Ok(self.rebuild_from(&retain))
    }

    /// Remove every node in `remove` and all of its descendants. Returns a
    /// fresh `Taxonomy` with renumbered but order-preserved indices.
    fn prune_remove(&self, remove: &[&str]) -> Result<Taxonomy> {
        let mut drop: HashSet<NodeIndex> = HashSet::new();
        for id in remove {
            let idx = self.internal_index(id)?;
            self.collect_descendants(idx, &mut drop);
        }
        let retain: HashSet<NodeIndex> = (0..self.nodes.len())
            .filter(|&i| !self.nodes[i].removed && !drop.contains(&i))
            .collect();
        Ok(self.rebuild_from(&retain))
    }

    fn collect_descendants(&self, idx: NodeIndex, into: &mut HashSet<NodeIndex>) {
        if into.insert(idx) {
            for &child in &self.nodes[idx].children {
                self.collect_descendants(child, into);
            }
        }
    }

    /// Build a fresh, densely-indexed taxonomy containing exactly the
    /// indices in `retain`, preserving their relative (internal-index)
    /// order.
    fn rebuild_from(&self, retain: &HashSet<NodeIndex>) -> Taxonomy {
        let mut ordered: Vec<NodeIndex> = retain.iter().copied().collect();
        ordered.sort_unstable();

        let mut remap: Vec<Option<NodeIndex>> = vec![None; self.nodes.len()];
        for (new_idx, &old_idx) in ordered.iter().enumerate() {
            remap[old_idx] = Some(new_idx);
        }

        let mut out = Taxonomy::empty();
        out.implicit_distance = self.implicit_distance;
        out.index_names = self.index_names;

        for &old_idx in &ordered {
            let old = &self.nodes[old_idx];
            let mut rec = NodeRecord::new(old.id.clone(), old.name.clone(), old.rank.clone());
            rec.parent_distance = old.parent_distance;
            rec.hidden = old.hidden;
            rec.parent = old.parent.and_then(|p| remap[p]);
            rec.children = old
                .children
                .iter()
                .filter_map(|&c| remap[c])
                .collect();
            let new_idx = out.nodes.len();
            out.id_to_index.insert(rec.id.clone(), new_idx);
            if rec.parent.is_none() {
                out.root = Some(new_idx);
            }
            out.nodes.push(rec);
        }

        if out.index_names {
            for (idx, rec) in out.nodes.iter().enumerate() {
                out.name_to_indices
                    .entry(rec.name.clone())
                    .or_default()
                    .push(idx);
            }
        }

        out
    }
}
