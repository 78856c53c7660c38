//! `taxonomy`: load, query, mutate and serialize rooted taxonomic trees
//! (NCBI, GTDB, node-link JSON, Newick).
//!
//! A [`Taxonomy`] is a directed graph whose nodes carry an identifier, a
//! human-readable name, a rank, and (optionally) a parent-distance; edges
//! encode the child → parent relation. Each node has at most one parent, so
//! the graph is a rooted tree with a single root whose parent is absent.
//!
//! ```
//! use taxonomy::Taxonomy;
//!
//! let tax = Taxonomy::from_newick("(A:0.1,B:0.2)R;").unwrap();
//! assert_eq!(tax.root().unwrap().id, "R");
//! assert_eq!(tax.children("R").unwrap().len(), 2);
//! ```
//!
//! The core is single-threaded per taxonomy: concurrent reads are safe,
//! but mutation requires exclusive access that callers must serialize
//! themselves (this crate takes no internal locks).

mod error;
mod mutation;
mod node;
mod parsers;
mod serialize;
mod store;
mod traversal;

pub use error::{Result, TaxonomyError};
pub use mutation::PruneSpec;
pub use node::{NodeIndex, TaxonomyNode};
pub use store::Taxonomy;
