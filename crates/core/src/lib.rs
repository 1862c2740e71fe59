//! Domain logic for the card collection backend.
//!
//! Everything here is transport-agnostic: the catalog, the report mirror and
//! the OCR engine are reached through traits so the HTTP crate can inject
//! real clients while tests inject stubs.

pub mod card;
pub mod catalog;
pub mod error;
pub mod mirror;
pub mod ocr;
pub mod report;
pub mod resolver;
pub mod types;
pub mod variants;
