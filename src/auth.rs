//! Auth-domain models: scope lists, redacted secrets, and access tokens.

pub mod scope;
pub mod secret;
pub mod token;

pub use scope::*;
pub use secret::*;
pub use token::*;
