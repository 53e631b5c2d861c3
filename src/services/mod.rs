//! Business logic services

pub mod backend;
pub mod resolver;
pub mod share;
pub mod token;

pub use backend::{BackendClient, FetchError};
pub use resolver::{resolve, CertificateLookupKey, ResolveError};
pub use token::{LinkCodec, TokenError, TokenPayload};
