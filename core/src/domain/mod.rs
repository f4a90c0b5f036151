//! Domain layer containing the token and revocation entities.

pub mod entities;

pub use entities::{claims, Claims, Header, NewRevocation, RevocationRecord, MAX_JTI_LENGTH};
