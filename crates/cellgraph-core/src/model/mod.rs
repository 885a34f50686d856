//! cellgraph data models.
//!
//! - [`graph`]: the parsed cell graph of one document. Read-only after
//!   construction; it never rejects structurally broken input, because those
//!   problems must be reportable.
//! - [`report`]: the fixed-shape result of checking one document.
//!
//! Models are mostly "dumb" data. Rules in `crate::pipeline` apply policy.

pub mod graph;
pub mod report;

pub use graph::{Cell, Graph};
pub use report::{Report, Stats};
