//! Timber Catalog Service Library
//!
//! This library crate defines the core modules of the catalog service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The service is composed of two subsystems:
//!
//! - **`catalog`**: The entity model and in-memory store. Holds categories (a tree),
//!   dimensional profiles, and stock-keeping products, loaded from a JSON catalog file.
//!   Exposes read-only browse endpoints and ordered snapshots for the search engine.
//! - **`search`**: The fuzzy search and relevance-ranking engine behind the live
//!   search box. Contains the query tokenizer (lexical variants, unit tags), the
//!   candidate filter, the heuristic product scorer, and the HTTP search endpoint.

pub mod catalog;
pub mod search;
