//! sa_algo — the fault collapser, implication engine, and
//! frontier/X-path analysis. Operates purely on `sa_core` types; no I/O.

#![forbid(unsafe_code)]

pub mod collapser;
pub mod frontier;
pub mod imply;

pub use collapser::{collapse_circuit, collapse_fault, not_dominating, not_dominating_checkpoint, order};
pub use frontier::{d_frontier, j_frontier, x_path};
pub use imply::{imply_and_check, Direction};
