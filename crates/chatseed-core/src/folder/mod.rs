//! Folder domain module.
//!
//! - `model`: `Folder` and `FolderType`
//! - `hierarchy`: parent-chain queries and validation
//! - `repository`: Repository trait for folder persistence

pub mod hierarchy;
mod model;
mod repository;

pub use model::{Folder, FolderType};
pub use repository::FolderRepository;
