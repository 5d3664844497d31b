//! Resource providers and template naming for offerpress.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads template resources from a directory
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage (re-exported
//!   from `offerpress-traits`)
//!
//! [`TemplateNaming`] maps a fixed page index to the names of its descriptor
//! and background resources.

mod filesystem;
mod naming;

pub use filesystem::FilesystemResourceProvider;
pub use naming::TemplateNaming;

pub use offerpress_traits::InMemoryResourceProvider;
