//! Newick parser.
//!
//! Grammar: `tree := subtree ';'`,
//! `subtree := ('(' subtree (',' subtree)* ')')? name? (':' distance)?`.
//! Leaf tokens (names, distances) are tokenized with `nom`; the recursive
//! tree shape itself is walked by hand, since Newick's nesting needs actual
//! function recursion rather than a declarative combinator chain.

use nom::bytes::complete::is_not;
use nom::character::complete::char as nom_char;
use nom::combinator::opt;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::IResult;

use crate::error::{Result, TaxonomyError};
use crate::node::NodeRecord;
use crate::store::Taxonomy;

struct ParsedNode {
    name: Option<String>,
    distance: Option<f32>,
    children: Vec<ParsedNode>,
}

fn parse_name(input: &str) -> IResult<&str, &str> {
    is_not(",():;")(input)
}

fn parse_distance(input: &str) -> IResult<&str, f32> {
    let (input, _) = nom_char(':')(input)?;
    let (input, digits) = is_not(",();")(input)?;
    let value = digits.trim().parse::<f32>().map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Float))
    })?;
    Ok((input, value))
}

fn parse_subtree(input: &str) -> IResult<&str, ParsedNode> {
    let (input, children) = opt(delimited(
        nom_char('('),
        separated_list1(nom_char(','), parse_subtree),
        nom_char(')'),
    ))(input)?;
    let (input, name) = opt(parse_name)(input)?;
    let (input, distance) = opt(parse_distance)(input)?;
    Ok((
        input,
        ParsedNode {
            name: name.map(|s| s.trim().to_string()),
            distance,
            children: children.unwrap_or_default(),
        },
    ))
}

fn parse_tree(input: &str) -> IResult<&str, ParsedNode> {
    let (input, root) = parse_subtree(input)?;
    let (input, _) = nom_char(';')(input)?;
    Ok((input, root))
}

impl Taxonomy {
    /// Load a taxonomy from a Newick string, e.g.
    /// `(A:0.1,B:0.2,(C:0.3,D:0.4)E:0.5)F;`.
    ///
    /// Every named node becomes a node with `id = name`; unnamed internal
    /// nodes receive a synthetic unique id. Rank is always the empty
    /// string. Names are *not* indexed for `find_all_by_name`; a
    /// Newick-loaded taxonomy always returns an empty list there.
    pub fn from_newick(text: &str) -> Result<Taxonomy> {
        let trimmed = text.trim();
        let (remaining, parsed) = parse_tree(trimmed).map_err(|e| {
            TaxonomyError::InvalidFormat(format!("failed to parse Newick tree: {}", e))
        })?;
        if !remaining.trim().is_empty() {
            return Err(TaxonomyError::InvalidFormat(format!(
                "unexpected trailing content after ';': {:?}",
                remaining
            )));
        }

        let mut tax = Taxonomy::empty();
        tax.implicit_distance = None;
        tax.index_names = false;

        let mut counter = 0usize;
        let root_idx = build_node(&parsed, &mut tax, None, &mut counter)?;
        tax.root = Some(root_idx);

        Ok(tax)
    }
}

fn build_node(
    parsed: &ParsedNode,
    tax: &mut Taxonomy,
    parent: Option<usize>,
    counter: &mut usize,
) -> Result<usize> {
    let id = match &parsed.name {
        Some(n) if !n.is_empty() => n.clone(),
        _ => {
            let generated = format!("__unnamed_{}", counter);
            *counter += 1;
            generated
        }
    };

    if tax.id_to_index.contains_key(&id) {
        return Err(TaxonomyError::DuplicateId(id));
    }

    let mut rec = NodeRecord::new(id.clone(), id.clone(), String::new());
    rec.parent = parent;
    rec.parent_distance = parsed.distance;
    let idx = tax.nodes.len();
    tax.nodes.push(rec);
    tax.id_to_index.insert(id, idx);
    if let Some(p) = parent {
        tax.nodes[p].children.push(idx);
    }

    for child in &parsed.children {
        build_node(child, tax, Some(idx), counter)?;
    }

    Ok(idx)
}
