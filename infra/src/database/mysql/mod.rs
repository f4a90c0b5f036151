//! MySQL repository implementations

pub mod revocation_repository_impl;

#[cfg(test)]
mod tests;

pub use revocation_repository_impl::{validate_table_name, MySqlRevocationStore};
