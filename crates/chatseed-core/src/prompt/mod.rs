//! Prompt domain module.

mod model;
mod repository;
pub mod template;

pub use model::Prompt;
pub use repository::PromptRepository;
pub use template::PromptParameter;
