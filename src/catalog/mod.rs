//! Catalog Module
//!
//! The entity model and in-memory store backing the service.
//!
//! ## Core Concepts
//! - **Entities**: `Category` (tree node), `Profile` (dimensional variant of a
//!   category, e.g. "90 x 35mm"), `Product` (stock-keeping unit linked to exactly
//!   one of a category or a profile via `ProductLink`).
//! - **Store**: `CatalogStore` keeps the live collections in concurrent maps and
//!   validates entity invariants (unique slugs, unique I/N numbers, either-or
//!   product links, referential integrity) on insert.
//! - **Snapshot**: `CatalogSnapshot` is an ordered, read-only view handed to the
//!   search engine and the browse handlers; derived attributes (resolved category,
//!   display name, image fallback chain) are computed on it.
//! - **Loading**: the catalog is read from a JSON file at startup; invariant
//!   violations abort the load with a contextual error.

pub mod handlers;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
