//! Emit a `Taxonomy` back out as node-link JSON, a nested JSON tree, or
//! Newick. Read-only: none of these touch the taxonomy's internal state.

use serde_json::{json, Value};

use crate::error::{Result, TaxonomyError};
use crate::node::NodeIndex;
use crate::store::Taxonomy;

impl Taxonomy {
    /// Depth-first Newick serialization: `(c1,c2,…)name:dist`, children in
    /// insertion order, terminated by `;`. A node's Newick name is always
    /// its id (so `from_newick(t.to_newick())` round-trips identifiers).
    /// Distance is omitted when `None`.
    pub fn to_newick(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.write_newick_subtree(root, &mut out);
        }
        out.push(';');
        out
    }

    fn write_newick_subtree(&self, idx: NodeIndex, out: &mut String) {
        let rec = &self.nodes[idx];
        let live_children: Vec<NodeIndex> = rec
            .children
            .iter()
            .copied()
            .filter(|&c| !self.nodes[c].removed)
            .collect();

        if !live_children.is_empty() {
            out.push('(');
            for (i, &child) in live_children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.write_newick_subtree(child, out);
            }
            out.push(')');
        }
        out.push_str(&rec.id);
        if let Some(d) = rec.parent_distance {
            out.push(':');
            out.push_str(&d.to_string());
        }
    }

    /// `{directed: true, multigraph: false, graph: [], nodes: [...],
    /// links: [...]}`. `source` is a child's position in the emitted
    /// `nodes` array, `target` its parent's. Empty taxonomies emit empty
    /// arrays. Tombstoned nodes are skipped and the remaining nodes are
    /// renumbered densely, so `source`/`target` always index into the
    /// `nodes` array actually emitted (not the internal arena).
    pub fn to_json_node_links(&self) -> Value {
        let mut emitted_index: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut next = 0;
        for (idx, rec) in self.nodes.iter().enumerate() {
            if !rec.removed {
                emitted_index[idx] = Some(next);
                next += 1;
            }
        }

        let mut nodes = Vec::new();
        let mut links = Vec::new();

        for (idx, rec) in self.nodes.iter().enumerate() {
            if rec.removed {
                continue;
            }
            let mut node = json!({
                "id": rec.id,
                "name": rec.name,
                "rank": rec.rank,
                "hidden": rec.hidden,
            });
            if let Some(d) = rec.parent_distance {
                node["parent_distance"] = json!(d);
            }
            nodes.push(node);

            if let Some(parent) = rec.parent {
                let source = emitted_index[idx].unwrap();
                let target = emitted_index[parent].unwrap();
                links.push(json!({ "source": source, "target": target }));
            }
        }

        json!({
            "directed": true,
            "multigraph": false,
            "graph": [],
            "nodes": nodes,
            "links": links,
        })
    }

    /// Nested `{id, name, rank, children: [...]}`, rooted at the taxonomy's
    /// root. Errors with [`TaxonomyError::EmptyTree`] if there is no root.
    pub fn to_json_tree(&self) -> Result<Value> {
        match self.root {
            Some(root) => Ok(self.json_tree_subtree(root)),
            None => Err(TaxonomyError::EmptyTree),
        }
    }

    fn json_tree_subtree(&self, idx: NodeIndex) -> Value {
        let rec = &self.nodes[idx];
        let children: Vec<Value> = rec
            .children
            .iter()
            .copied()
            .filter(|&c| !self.nodes[c].removed)
            .map(|c| self.json_tree_subtree(c))
            .collect();

        json!({
            "id": rec.id,
            "name": rec.name,
            "rank": rec.rank,
            "children": children,
        })
    }
}
