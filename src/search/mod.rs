//! Search Service Module
//!
//! The fuzzy search and relevance-ranking engine behind the live search box.
//!
//! ## Overview
//! A query is answered from a read-only catalog snapshot in four steps:
//! tokenize the query into terms with lexical variants, filter each collection
//! by substring containment (AND across terms, OR across variants and fields),
//! score the product candidates with a weighted heuristic, then sort, truncate
//! and serialize. The whole pipeline is a pure synchronous function of the
//! query and the snapshot; no shared state, no I/O.
//!
//! ## Responsibilities
//! - **Tokenization**: lexical variants tolerating unit suffixes ("90mm" vs "90")
//!   and separator spellings ("90x35" vs "90 x 35"), plus unit tagging: a bare
//!   length like "3m" refers to a product option, not a dimensional name.
//! - **Filtering**: the membership gate per collection, with hard pool caps.
//! - **Ranking**: positional dimension matching and substring bonuses with
//!   hand-tuned weights; the score orders candidates, it never excludes them.
//! - **API**: the `GET /api/search?q=` endpoint for the Axum web server.
//!
//! ## Submodules
//! - **`engine`**: candidate filtering, ranking orchestration, serialization.
//! - **`scoring`**: the product relevance heuristic and numeric extraction.
//! - **`tokenizer`**: query parsing into terms, variants and normalized forms.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Data Transfer Objects (DTOs) for the search response.

pub mod engine;
pub mod handlers;
pub mod scoring;
pub mod tokenizer;
pub mod types;
