//! Catalog source adapters.

pub mod directory;
pub mod file;
pub mod memory;

pub use directory::DirectoryCatalogSource;
pub use file::FileCatalogSource;
pub use memory::InMemoryCatalogSource;
