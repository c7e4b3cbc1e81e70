//! Contracts between the report engine and its external collaborators.
//!
//! The engine never reads the filesystem, inspects dataframes or rasterizes
//! charts directly; it consumes these capabilities through the traits in
//! this crate. Implementations live in platform crates (or in the caller).

pub mod data;
pub mod resource;

pub use data::{ChartRenderError, ChartRenderer, InMemoryTable, TableSource};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
