pub mod history;
pub mod store;

pub use history::trim_history;
pub use store::SessionStore;
