//! Node-link JSON parser.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TaxonomyError};
use crate::node::NodeRecord;
use crate::store::Taxonomy;

#[derive(Deserialize)]
struct RawGraph {
    directed: bool,
    multigraph: bool,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Deserialize)]
struct RawNode {
    id: Value,
    #[serde(default)]
    name: String,
    #[serde(default)]
    rank: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    parent_distance: Option<f32>,
}

#[derive(Deserialize)]
struct RawLink {
    source: usize,
    target: usize,
}

fn normalize_id(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(TaxonomyError::InvalidFormat(format!(
            "node id must be a string or number, got {}",
            other
        ))),
    }
}

impl Taxonomy {
    /// Load a taxonomy from node-link JSON: `{nodes: [...], links: [...]}`
    /// where `links[i] = {source, target}` are integer indices into `nodes`
    /// and `source` is the child, `target` the parent. `directed` must be
    /// `true`; `multigraph` must be `false`. Internal indices are assigned
    /// in the order nodes appear in the array, fixing `internal_index`'s
    /// contract for this format.
    pub fn from_json(text: &str) -> Result<Taxonomy> {
        let raw: RawGraph = serde_json::from_str(text)?;

        if !raw.directed {
            return Err(TaxonomyError::InvalidFormat(
                "node-link JSON must have directed: true".to_string(),
            ));
        }
        if raw.multigraph {
            return Err(TaxonomyError::InvalidFormat(
                "node-link JSON must have multigraph: false".to_string(),
            ));
        }

        let mut tax = Taxonomy::empty();
        tax.implicit_distance = None;

        for raw_node in &raw.nodes {
            let id = normalize_id(&raw_node.id)?;
            if tax.id_to_index.contains_key(&id) {
                return Err(TaxonomyError::DuplicateId(id));
            }
            let mut rec = NodeRecord::new(id.clone(), raw_node.name.clone(), raw_node.rank.clone());
            rec.hidden = raw_node.hidden;
            rec.parent_distance = raw_node.parent_distance;
            let idx = tax.nodes.len();
            tax.nodes.push(rec);
            tax.id_to_index.insert(id, idx);
        }

        for link in &raw.links {
            let (source, target) = (link.source, link.target);
            if source >= tax.nodes.len() || target >= tax.nodes.len() {
                return Err(TaxonomyError::InvalidFormat(format!(
                    "link references out-of-range node index ({} -> {})",
                    source, target
                )));
            }
            if let Some(existing) = tax.nodes[source].parent {
                if existing != target {
                    return Err(TaxonomyError::InvalidFormat(format!(
                        "node {} has more than one parent",
                        tax.nodes[source].id
                    )));
                }
            } else {
                tax.nodes[source].parent = Some(target);
                tax.nodes[target].children.push(source);
            }
        }

        if tax.nodes.is_empty() {
            return Ok(tax);
        }

        let roots: Vec<usize> = (0..tax.nodes.len())
            .filter(|&idx| tax.nodes[idx].parent.is_none())
            .collect();

        match roots.len() {
            0 => return Err(TaxonomyError::MissingRoot),
            1 => tax.root = Some(roots[0]),
            _ => {
                let ids = roots.iter().map(|&idx| tax.nodes[idx].id.clone()).collect();
                return Err(TaxonomyError::MultipleRoots(ids));
            }
        }

        for idx in 0..tax.nodes.len() {
            let name = tax.nodes[idx].name.clone();
            tax.insert_name_index(&name, idx);
        }

        Ok(tax)
    }
}
