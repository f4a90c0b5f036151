//! Domain entities representing tokens and revocation records.

pub mod revocation;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use revocation::{NewRevocation, RevocationRecord, MAX_JTI_LENGTH};
pub use token::{claims, Claims, Header, ALGORITHM, TOKEN_TYPE};
