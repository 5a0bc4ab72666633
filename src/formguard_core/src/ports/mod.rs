pub mod events;
pub mod services;
pub mod session;
