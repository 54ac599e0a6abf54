//! CLI command implementations

pub mod check;
pub mod completions;
pub mod export;
pub mod inventory;
pub mod parts;
