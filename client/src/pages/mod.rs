//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, mutation tickets,
//! navigation) and delegates rendering details to `components`.

pub mod about;
pub(crate) mod actions;
pub mod blog_detail;
pub mod blog_editor;
pub mod blogs;
pub mod home;
pub mod login;
pub mod project_detail;
pub mod project_editor;
pub mod projects;
pub mod signup;
