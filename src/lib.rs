//! Slopes: slope brick inventory reconciliation
//!
//! Reconciles a hand-kept inventory of slope bricks against the element
//! catalog and exports a deterministic CSV table.

pub mod cli;
pub mod core;
pub mod entities;
