//! Identity: sign-up, login with lockout, bearer tokens and the `/me` profile
//!
//! Passwords are stored as Argon2id PHC strings, tokens are HS256 JWTs
//! signed with the configured shared secret. Everything here is reached
//! through [`AuthService`]; handlers only translate HTTP to service calls.

pub mod descriptor;
pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod model;
pub mod password;
pub mod service;
pub mod token;

pub use descriptor::AuthDescriptor;
pub use extractor::{AuthState, Authenticated};
pub use model::{Claims, Role, User};
pub use password::{PasswordPolicy, PasswordService};
pub use service::{AuthService, LockoutPolicy};
pub use token::{IssuedToken, TokenIssuer};
