//! Data Transfer Objects (DTOs) for persistence.
//!
//! The domain types in `chatseed-core` are the current schema. The DTOs here
//! describe older on-disk shapes and convert them forward.

pub mod export;

pub use export::{CURRENT_EXPORT_VERSION, ExportFile, export_string, import_str, import_value};
