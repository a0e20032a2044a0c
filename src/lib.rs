//! # neuroq - Boolean Query Builder for Study Search
//!
//! neuroq is a terminal-first tool for incrementally building boolean
//! search expressions (`AND`/`OR`/`NOT`, parentheses, bracketed 3-D
//! coordinate literals like `[-22, -4, 18]`) and running them against a
//! remote neuroimaging study index.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`query`] - The expression editor: tokenizer, classifier, normalizer,
//!   and the term-removal algorithm behind chip deletion
//! - [`client`] - HTTP lookup of studies for a committed query
//! - [`tui`] - Interactive terminal UI (chips, raw-text box, results pane)
//! - [`output`] - Formatted one-shot output
//! - [`utils`] - Percent-encoding and configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use neuroq::query::{normalize, tokens, join_tokens, QueryEditor};
//!
//! // tokenize + classify, then repair boundary defects
//! let cleaned = join_tokens(&normalize(tokens("AND amygdala OR")));
//! assert_eq!(cleaned, "amygdala");
//!
//! // chip-driven editing over a single owned string
//! let mut editor = QueryEditor::with_query("fear AND NOT emotion");
//! editor.remove_chip(1);
//! assert_eq!(editor.query(), "fear");
//! ```
//!
//! The editor deliberately stays at the token-stream level: it repairs
//! leading/trailing operators, empty parenthesis pairs, and adjacent
//! operator collisions, but it is not a parser and does not check overall
//! parenthesis balance.

pub mod client;
pub mod output;
pub mod query;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
