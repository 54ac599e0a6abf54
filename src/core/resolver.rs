//! Catalog resolution
//!
//! Validates one lookup response against the request and maps each needed
//! domain color onto a catalog element id. Any inconsistency in the
//! response is fatal: it is either fully trusted or not used at all.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::catalog::{BrickRecord, CatalogClient};
use crate::core::error::ReconcileError;
use crate::core::normalize::{ColorCounts, PatternCounts};
use crate::entities::color::{ColorAliasTable, KnownMissing};

/// Asset path the catalog must report for an element
pub fn expected_asset_path(element_id: &str) -> String {
    format!("/bricks/5/2/{}", element_id)
}

/// One requested color mapped to its element id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColorRecord {
    pub color: String,
    /// Empty only for a whitelisted known-missing pair
    pub element_id: String,
    pub pattern_counts: PatternCounts,
}

impl ResolvedColorRecord {
    /// Whether the catalog did not carry this color
    pub fn is_known_missing(&self) -> bool {
        self.element_id.is_empty()
    }
}

/// Validated catalog data for one design id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResult {
    pub design_id: u32,
    /// Sorted, comma-joined distinct descriptions
    pub description: String,
    /// Sorted, comma-joined distinct categories
    pub category: String,
    /// Keyed and ordered by color name
    pub colors: BTreeMap<String, ResolvedColorRecord>,
}

/// Resolves design ids against the catalog using the alias and whitelist tables
pub struct CatalogResolver<'a, C> {
    client: C,
    colors: &'a ColorAliasTable,
    known_missing: &'a KnownMissing,
}

impl<'a, C: CatalogClient> CatalogResolver<'a, C> {
    pub fn new(client: C, colors: &'a ColorAliasTable, known_missing: &'a KnownMissing) -> Self {
        Self {
            client,
            colors,
            known_missing,
        }
    }

    /// Fetch and validate one design id, covering every color in `needed`
    pub fn resolve(
        &self,
        design_id: u32,
        needed: &ColorCounts,
    ) -> Result<CatalogResult, ReconcileError> {
        let response = self.client.fetch(design_id)?;
        self.resolve_records(design_id, &response.bricks, needed)
    }

    /// Validate already-fetched records for `design_id`
    pub fn resolve_records(
        &self,
        design_id: u32,
        bricks: &[BrickRecord],
        needed: &ColorCounts,
    ) -> Result<CatalogResult, ReconcileError> {
        let found: BTreeSet<u32> = bricks.iter().map(|b| b.design_id).collect();
        if found.len() != 1 || !found.contains(&design_id) {
            return Err(ReconcileError::DesignIdMismatch {
                requested: design_id,
                found: found.into_iter().collect(),
            });
        }

        let description = join_distinct(bricks.iter().map(|b| b.description.as_str()));
        let category = join_distinct(bricks.iter().map(|b| b.category.as_str()));

        // Later records for the same vendor color replace earlier ones
        let by_vendor_color: BTreeMap<&str, &BrickRecord> =
            bricks.iter().map(|b| (b.color.as_str(), b)).collect();

        let mut colors = BTreeMap::new();
        for (color, pattern_counts) in needed {
            let aliases = self
                .colors
                .aliases(color)
                .ok_or_else(|| ReconcileError::UnknownColor {
                    color: color.clone(),
                })?;

            let element_id = match aliases
                .iter()
                .find_map(|alias| by_vendor_color.get(alias.as_str()))
            {
                Some(brick) => {
                    let expected = expected_asset_path(&brick.element_id);
                    if brick.asset != expected {
                        return Err(ReconcileError::AssetPathMismatch {
                            design_id,
                            element_id: brick.element_id.clone(),
                            asset: brick.asset.clone(),
                            expected,
                        });
                    }
                    brick.element_id.clone()
                }
                None if self.known_missing.contains(design_id, color) => String::new(),
                None => {
                    return Err(ReconcileError::MissingColorMapping {
                        design_id,
                        description,
                        color: color.clone(),
                        aliases: aliases.to_vec(),
                    })
                }
            };

            colors.insert(
                color.clone(),
                ResolvedColorRecord {
                    color: color.clone(),
                    element_id,
                    pattern_counts: pattern_counts.clone(),
                },
            );
        }

        Ok(CatalogResult {
            design_id,
            description,
            category,
            colors,
        })
    }
}

fn join_distinct<'s>(values: impl Iterator<Item = &'s str>) -> String {
    values.collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>().join(",")
}
