pub mod login_service;
pub mod tracing;

pub use login_service::LoginService;
