pub mod chat;

pub use chat::{ChatRequest, ChatResponse, ChatTurn, ClearRequest, ClearResponse, Role};
