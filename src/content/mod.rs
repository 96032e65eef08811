//! Content documents: loading, frontmatter and the document model.
//!
//! The loader is the only part of the crate that touches the filesystem.
//! Everything downstream works on the in-memory [`Document`] list.

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod loader;

pub use document::{DerivedFields, Document, DocumentRecord, RawDocument};
pub use error::{DataFetchError, FieldError, LoadError};
