//! App-wide reactive state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` mirrors the identity provider, `mutations` guards in-flight
//! resource writes against stale responses, and `toast` queues user feedback.
//! Each is provided once by `app::App` as an `RwSignal`.

pub mod mutations;
pub mod session;
pub mod toast;
