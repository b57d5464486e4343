//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and resource widgets while reading shared
//! state from Leptos context providers. Requests are issued by pages.

pub mod comment_section;
pub mod footer;
pub mod like_button;
pub mod navbar;
pub mod owner_actions;
pub mod protected_route;
pub mod resource_card;
pub mod toaster;
