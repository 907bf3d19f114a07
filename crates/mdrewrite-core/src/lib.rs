//! mdrewrite-core - Markdown document AST
//!
//! This crate provides the target data structures of the rewriting engine in
//! `mdrewrite`. Downstream stages (serializers, further AST passes) only need
//! this crate.
//!
//! # Architecture
//!
//! ```text
//!                        ┌──────────────┐
//! Element Tree ─rules──▶ │ Markdown AST │ ──▶ serializer / next stage
//!                        └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mdrewrite_core::{MdKind, MdNode};
//!
//! let heading = MdNode::heading(2, vec![MdNode::Text("Title".to_string())]).unwrap();
//! assert_eq!(heading.kind(), MdKind::Heading);
//!
//! // Lists only accept list items
//! let err = MdNode::list(false, None, vec![MdNode::Text("stray".to_string())]).unwrap_err();
//! assert_eq!(err.target, MdKind::List);
//! ```

mod ast;
mod build;

pub use ast::{ListItem, MdKind, MdNode, TableCell, TableRow};
pub use build::{BuildResult, StructuralViolation, MAX_HEADING_DEPTH};
