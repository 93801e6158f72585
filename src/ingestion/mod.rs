//! Loading call tables from disk.
//!
//! Most callers should use [`load`] (from [`loader`]) or, for repeated access, a
//! [`TableCache`], which:
//!
//! - opens a gzip-compressed or plain delimited file (see [`Compression`])
//! - validates the required columns and derives `Category`
//! - parses timestamps and drops invalid rows
//! - optionally reports success/failure/alerts to a [`LoadObserver`]

pub mod cache;
pub mod compression;
pub mod csv;
pub mod loader;
pub mod observability;

pub use cache::TableCache;
pub use compression::Compression;
pub use loader::{load, LoadOptions};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, StdErrObserver,
    TracingObserver,
};
