//! Reference entities - parts, colors and inventory lines

pub mod color;
pub mod inventory;
pub mod part;

pub use color::{ColorAliasTable, KnownMissing, KnownMissingPair};
pub use inventory::{Inventory, InventoryEntry, InventoryLabel};
pub use part::{Orientation, PartCatalog, PartDescriptor};
