pub mod memory_session;
pub mod session_token_storage;

pub use memory_session::{
    DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS, MemorySession, MemorySessionStore,
};
pub use session_token_storage::SessionTokenStorage;
