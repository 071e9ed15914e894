pub mod session_service_errors;

pub use session_service_errors::SessionError;
