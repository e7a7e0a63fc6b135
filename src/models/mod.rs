//! Data models for the flow coordinator.

pub mod request;
pub mod token;

pub use request::AuthorizationRequest;
pub use token::Token;
