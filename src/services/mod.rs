pub mod disk_storage;
pub mod gallery;
pub mod metadata_store;
