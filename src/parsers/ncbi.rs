//! NCBI `nodes.dmp` + `names.dmp` parser.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::split_dmp_fields;
use crate::error::{Result, TaxonomyError};
use crate::node::NodeRecord;
use crate::store::Taxonomy;

impl Taxonomy {
    /// Load a taxonomy from a directory containing `nodes.dmp` and
    /// `names.dmp` (NCBI's taxdmp layout).
    pub fn from_ncbi(dir: impl AsRef<Path>) -> Result<Taxonomy> {
        let dir = dir.as_ref();
        Taxonomy::from_ncbi_files(dir.join("nodes.dmp"), dir.join("names.dmp"))
    }

    /// Load a taxonomy from an explicit `nodes.dmp`/`names.dmp` pair.
    ///
    /// Only `scientific name` records are kept from `names.dmp` (later
    /// entries for the same tax_id overwrite earlier ones). The `tax_id ==
    /// parent_tax_id` self-reference is resolved to the root (parent
    /// `None`). Duplicate tax_ids in `nodes.dmp` are an error. The 11th
    /// `nodes.dmp` field (`genbank_hidden`) is parsed as an integer and
    /// nonzero is truthy, not the input's raw non-empty-string truthiness,
    /// which would make `"0"` evaluate to `true`.
    pub fn from_ncbi_files(nodes_path: impl AsRef<Path>, names_path: impl AsRef<Path>) -> Result<Taxonomy> {
        let nodes_path = nodes_path.as_ref();
        let names_path = names_path.as_ref();
        debug!("loading NCBI taxonomy nodes from {}", nodes_path.display());

        let mut tax = Taxonomy::empty();
        tax.implicit_distance = Some(1.0);

        // Pass 1: one record per nodes.dmp line, in file order. Records
        // parent_tax_id as a string for pass 2, since the parent line may
        // appear later in the file than its children.
        let mut parent_of: HashMap<String, String> = HashMap::new();

        let nodes_file = File::open(nodes_path)?;
        for (line_no, line_maybe) in BufReader::new(nodes_file).lines().enumerate() {
            let line = line_maybe?;
            let fields = split_dmp_fields(&line);
            if fields.len() < 11 {
                return Err(TaxonomyError::InvalidFormat(format!(
                    "nodes.dmp line {}: expected at least 11 fields, got {}",
                    line_no + 1,
                    fields.len()
                )));
            }
            let tax_id = fields[0].clone();
            let parent_tax_id = fields[1].clone();
            let rank = fields[2].clone();
            let hidden = fields[10].parse::<i64>().unwrap_or(0) != 0;

            if tax.id_to_index.contains_key(&tax_id) {
                return Err(TaxonomyError::DuplicateId(tax_id));
            }

            let mut rec = NodeRecord::new(tax_id.clone(), String::new(), rank);
            rec.hidden = hidden;
            let idx = tax.nodes.len();
            tax.nodes.push(rec);
            tax.id_to_index.insert(tax_id.clone(), idx);

            if tax_id != parent_tax_id {
                parent_of.insert(tax_id, parent_tax_id);
            }

            if line_no % 100_000 == 0 {
                debug!("(line {}) parsed nodes.dmp record {}", line_no, idx);
            }
        }

        // Pass 2: wire up parent pointers and children lists now that
        // every tax_id has a known index.
        let mut root = None;
        for idx in 0..tax.nodes.len() {
            let tax_id = tax.nodes[idx].id.clone();
            match parent_of.get(&tax_id) {
                Some(parent_id) => {
                    let parent_idx = *tax.id_to_index.get(parent_id).ok_or_else(|| {
                        TaxonomyError::InvalidFormat(format!(
                            "nodes.dmp: tax_id {} has unknown parent {}",
                            tax_id, parent_id
                        ))
                    })?;
                    tax.nodes[idx].parent = Some(parent_idx);
                    tax.nodes[parent_idx].children.push(idx);
                }
                None => {
                    if root.is_some() {
                        return Err(TaxonomyError::InvalidFormat(
                            "nodes.dmp has more than one self-referential root".to_string(),
                        ));
                    }
                    root = Some(idx);
                }
            }
        }
        tax.root = Some(root.ok_or_else(|| {
            TaxonomyError::InvalidFormat("nodes.dmp has no self-referential root".to_string())
        })?);

        // names.dmp: scientific names only, later entries win.
        debug!("loading NCBI taxonomy names from {}", names_path.display());
        let names_file = File::open(names_path)?;
        for line_maybe in BufReader::new(names_file).lines() {
            let line = line_maybe?;
            let fields = split_dmp_fields(&line);
            if fields.len() < 4 {
                continue;
            }
            if fields[3] != "scientific name" {
                continue;
            }
            let tax_id = &fields[0];
            let name = &fields[1];
            if let Some(&idx) = tax.id_to_index.get(tax_id) {
                tax.nodes[idx].name = name.clone();
            }
        }

        for idx in 0..tax.nodes.len() {
            let name = tax.nodes[idx].name.clone();
            tax.insert_name_index(&name, idx);
        }

        Ok(tax)
    }
}
