//! # Metastore Testkit
//!
//! Testing utilities for the metastore.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden documents**: Known elements with their exact expected XML
//! - **Generators**: Proptest strategies for values, trees and security annexes
//! - **Fixtures**: The reference scenario element and a throwaway catalog directory
//!
//! ## Golden Documents
//!
//! ```rust
//! use metastore_testkit::documents::{all_documents, verify_all_documents};
//!
//! for doc in all_documents() {
//!     println!("{}: {} bytes", doc.name, doc.xml.len());
//! }
//! assert!(verify_all_documents().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use metastore_testkit::generators::element;
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(e in element()) {
//!         // encode, decode, compare
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use metastore_testkit::fixtures::{scenario_element, TempCatalog};
//!
//! let catalog = TempCatalog::new();
//! let element = catalog.bind(scenario_element());
//! assert!(element.source_path().is_some());
//! ```

pub mod documents;
pub mod fixtures;
pub mod generators;

pub use documents::{all_documents, verify_all_documents, GoldenDocument};
pub use fixtures::{scenario_element, TempCatalog};
