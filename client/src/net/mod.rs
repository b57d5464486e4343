//! Networking modules for the identity provider and the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` defines the provider seam, `firebase` is the browser provider,
//! `api` handles REST calls, and `types` defines the shared wire schema.

pub mod api;
#[cfg(test)]
pub(crate) mod fake_identity;
pub mod firebase;
pub mod identity;
pub mod types;
