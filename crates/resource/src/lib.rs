//! Platform resource providers for the qrydoc report engine.
//!
//! [`FilesystemResourceProvider`] loads fonts, logos and cover images from
//! a base directory. The in-memory provider from `qrydoc-traits` is
//! re-exported for convenience.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;
pub use qrydoc_traits::InMemoryResourceProvider;
