pub mod persistence;
pub mod store;
pub mod tabs;

pub use persistence::ScopeStatePersistence;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tabs::{Tab, TabAvailability, UiSubState};
