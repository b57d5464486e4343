//! View authorization gate: pure render-time decisions over the session.
//!
//! None of these checks carry security weight. The backend re-authorizes
//! every mutating call; the client only decides what to show.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::error::ActionError;
use crate::net::types::{Comment, OwnedResource, email_local_part};
use crate::state::session::{Session, SessionPhase};

/// What a protected route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still resolving: render a neutral waiting state, do not redirect.
    Wait,
    Enter,
    RedirectToLogin,
}

/// Which request a like control issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// Path segment of the like endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Unlike => "unlike",
        }
    }

    /// Button label for a control that would perform this action.
    pub fn label(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Unlike => "Unlike",
        }
    }
}

pub fn route_decision(session: &Session) -> RouteDecision {
    match session.phase() {
        SessionPhase::Unresolved => RouteDecision::Wait,
        SessionPhase::ResolvedAnonymous => RouteDecision::RedirectToLogin,
        SessionPhase::ResolvedAuthenticated => RouteDecision::Enter,
    }
}

/// False while resolving; afterwards, whether anyone is signed in.
pub fn can_enter_protected_route(session: &Session) -> bool {
    route_decision(session) == RouteDecision::Enter
}

/// Whether to render edit/delete affordances for `resource`.
pub fn is_owner<R: OwnedResource>(session: &Session, resource: &R) -> bool {
    session.uid().is_some_and(|uid| uid == resource.owner_uid())
}

/// Membership test of the viewer in the resource's likers, independent of order.
pub fn has_liked<R: OwnedResource>(session: &Session, resource: &R) -> bool {
    session
        .uid()
        .is_some_and(|uid| resource.liked_by().iter().any(|entry| entry.uid == uid))
}

/// Whether to render the delete control on `comment`.
pub fn is_comment_author(session: &Session, comment: &Comment) -> bool {
    session.uid().is_some_and(|uid| uid == comment.uid)
}

/// The toggle contract shared by every resource type.
///
/// # Errors
///
/// `AuthRequired` when nobody is signed in.
pub fn like_action<R: OwnedResource>(session: &Session, resource: &R) -> Result<LikeAction, ActionError> {
    if session.identity.is_none() {
        return Err(ActionError::AuthRequired);
    }
    if has_liked(session, resource) {
        Ok(LikeAction::Unlike)
    } else {
        Ok(LikeAction::Like)
    }
}

/// First `limit` liker names plus whether more exist.
pub fn liked_by_preview<R: OwnedResource>(resource: &R, limit: usize) -> (Vec<String>, bool) {
    let likers = resource.liked_by();
    let names = likers
        .iter()
        .take(limit)
        .map(|entry| email_local_part(&entry.email).to_owned())
        .collect();
    (names, likers.len() > limit)
}

/// "Liked by a, b, c & others", or `None` when nobody liked the resource.
pub fn liked_by_summary<R: OwnedResource>(resource: &R, limit: usize) -> Option<String> {
    let (names, more) = liked_by_preview(resource, limit);
    if names.is_empty() {
        return None;
    }
    let mut summary = format!("Liked by {}", names.join(", "));
    if more {
        summary.push_str(" & others");
    }
    Some(summary)
}
