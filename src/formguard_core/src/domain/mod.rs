pub mod credentials;
pub mod errors;
pub mod provider_key;
pub mod state;
pub mod token;
