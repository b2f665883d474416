pub mod settings;

pub use settings::{CatalogConfig, ChatConfig, LlmConfig, ServerConfig, Settings};
