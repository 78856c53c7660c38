//! GTDB lineage TSV parser.

use log::debug;

use crate::error::{Result, TaxonomyError};
use crate::node::NodeRecord;
use crate::store::Taxonomy;

fn rank_for_prefix(token: &str) -> Result<&'static str> {
    let mut chars = token.chars();
    let letter = chars.next();
    let is_prefixed = matches!((chars.next(), chars.next()), (Some('_'), Some('_')));
    match (letter, is_prefixed) {
        (Some('d'), true) => Ok("domain"),
        (Some('p'), true) => Ok("phylum"),
        (Some('c'), true) => Ok("class"),
        (Some('o'), true) => Ok("order"),
        (Some('f'), true) => Ok("family"),
        (Some('g'), true) => Ok("genus"),
        (Some('s'), true) => Ok("species"),
        _ => Err(TaxonomyError::InvalidFormat(format!(
            "GTDB lineage token {:?} is missing a recognized rank prefix",
            token
        ))),
    }
}

impl Taxonomy {
    /// Load a taxonomy from GTDB-style TSV text: column 0 is a genome
    /// accession, and one later column holds a semicolon-joined,
    /// rank-prefixed lineage (`d__Bacteria;p__...;s__Escherichia coli`).
    ///
    /// The lineage column is located once, as the first column (in the
    /// first non-empty row) whose value starts with `d__`, and reused for
    /// every row. Lineage tokens are merged across rows by id: the same
    /// token appearing in many rows' lineages yields a single node.
    pub fn from_gtdb(text: &str) -> Result<Taxonomy> {
        let mut tax = Taxonomy::empty();
        tax.implicit_distance = None;

        // Rows preceding the first one that exhibits a `d__`-prefixed
        // column (typically a header line) are header/junk rows: they are
        // skipped entirely rather than kept as data once the lineage
        // column is known, so they can't later be mistaken for a
        // malformed lineage.
        let mut lineage_col: Option<usize> = None;
        let mut rows: Vec<Vec<&str>> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if lineage_col.is_none() {
                match fields.iter().position(|f| f.starts_with("d__")) {
                    Some(pos) => lineage_col = Some(pos),
                    None => continue,
                }
            }
            rows.push(fields);
        }

        let col = lineage_col.ok_or_else(|| {
            TaxonomyError::InvalidFormat(
                "no column with a GTDB lineage ('d__...') value found".to_string(),
            )
        })?;

        debug!("GTDB lineage column located at index {}", col);

        for (row_no, fields) in rows.iter().enumerate() {
            let lineage = fields.get(col).ok_or_else(|| {
                TaxonomyError::InvalidFormat(format!(
                    "row {} has no value in lineage column {}",
                    row_no + 1,
                    col
                ))
            })?;

            let tokens: Vec<&str> = lineage.split(';').map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
            if tokens.is_empty() {
                continue;
            }
            if !tokens[0].starts_with("d__") {
                return Err(TaxonomyError::InvalidFormat(format!(
                    "row {}: lineage does not start with a domain ('d__') token: {:?}",
                    row_no + 1,
                    tokens[0]
                )));
            }

            let mut parent_idx = None;
            for token in tokens {
                let rank = rank_for_prefix(token)?;
                let idx = match tax.id_to_index.get(token) {
                    Some(&i) => i,
                    None => {
                        let rec = NodeRecord::new(token.to_string(), token.to_string(), rank.to_string());
                        let i = tax.nodes.len();
                        tax.nodes.push(rec);
                        tax.id_to_index.insert(token.to_string(), i);
                        tax.insert_name_index(token, i);
                        i
                    }
                };

                if let Some(p) = parent_idx {
                    if tax.nodes[idx].parent.is_none() {
                        tax.nodes[idx].parent = Some(p);
                    }
                    if !tax.nodes[p].children.contains(&idx) {
                        tax.nodes[p].children.push(idx);
                    }
                }
                parent_idx = Some(idx);
            }
        }

        tax.root = tax.nodes.iter().position(|n| n.parent.is_none());
        if tax.root.is_none() && !tax.nodes.is_empty() {
            return Err(TaxonomyError::InvalidFormat(
                "GTDB taxonomy has no root domain node".to_string(),
            ));
        }

        Ok(tax)
    }
}
