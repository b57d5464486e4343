//! Stale-response control for resource mutations and view-scoped loads.
//!
//! DESIGN
//! ======
//! Like/unlike/comment requests may resolve out of order. Each mutation takes
//! a per-resource ticket and its response is applied only if no newer mutation
//! of the same resource was issued since, and only while the issuing view is
//! still mounted. Responses that fail either check are discarded.
//!
//! At most one mutation per resource is in flight: a second like, comment or
//! delete on the same resource is refused until the first one completes and
//! its response has been applied.
//!
//! Detail loads and mutations are sequenced in separate scopes, so a load key
//! never collides with a resource id.

#[cfg(test)]
#[path = "mutations_test.rs"]
mod mutations_test;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::net::identity::lock;
use crate::net::types::OwnedResource;

/// Namespace a ticket is sequenced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicketScope {
    Load,
    Mutation,
}

/// Proof that a mutation was issued; compared against the latest issued ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationTicket {
    scope: TicketScope,
    resource_id: String,
    seq: u64,
}

impl MutationTicket {
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn scope(&self) -> TicketScope {
        self.scope
    }
}

/// Monotonic per-resource mutation counter.
#[derive(Clone, Debug, Default)]
pub struct MutationSequencer {
    latest: Arc<Mutex<HashMap<(TicketScope, String), u64>>>,
}

impl MutationSequencer {
    pub fn begin(&self, resource_id: &str) -> MutationTicket {
        self.begin_in(TicketScope::Mutation, resource_id)
    }

    pub fn begin_in(&self, scope: TicketScope, resource_id: &str) -> MutationTicket {
        let mut latest = lock(&self.latest);
        let seq = latest.entry((scope, resource_id.to_owned())).or_insert(0);
        *seq += 1;
        MutationTicket { scope, resource_id: resource_id.to_owned(), seq: *seq }
    }

    /// True only for the most recently issued ticket of its scope and resource.
    pub fn is_current(&self, ticket: &MutationTicket) -> bool {
        lock(&self.latest).get(&(ticket.scope, ticket.resource_id.clone())) == Some(&ticket.seq)
    }
}

/// Ticket for a mutation that holds its resource's in-flight slot.
///
/// The slot is released on drop, including when the task is dropped unfinished.
#[derive(Debug)]
pub struct PendingMutation {
    ticket: MutationTicket,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl PendingMutation {
    pub fn ticket(&self) -> &MutationTicket {
        &self.ticket
    }

    pub fn resource_id(&self) -> &str {
        self.ticket.resource_id()
    }
}

impl Drop for PendingMutation {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.ticket.resource_id);
    }
}

/// Alive flag for a mounted view; cleared from the view's cleanup.
#[derive(Clone, Debug)]
pub struct ViewLifetime {
    alive: Arc<AtomicBool>,
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn end(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

/// Sequencer and lifetime for one view.
#[derive(Clone, Debug, Default)]
pub struct MutationGuard {
    sequencer: MutationSequencer,
    lifetime: ViewLifetime,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl MutationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, resource_id: &str) -> MutationTicket {
        self.sequencer.begin(resource_id)
    }

    /// Ticket for a view-scoped fetch; independent of mutation tickets.
    pub fn begin_load(&self, key: &str) -> MutationTicket {
        self.sequencer.begin_in(TicketScope::Load, key)
    }

    /// Claim the in-flight slot for `resource_id`. `None` while another
    /// mutation of the same resource is pending.
    pub fn try_begin(&self, resource_id: &str) -> Option<PendingMutation> {
        if !lock(&self.in_flight).insert(resource_id.to_owned()) {
            return None;
        }
        Some(PendingMutation {
            ticket: self.sequencer.begin(resource_id),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, resource_id: &str) -> bool {
        lock(&self.in_flight).contains(resource_id)
    }

    /// Whether a response for `ticket` may still update view state.
    pub fn should_apply(&self, ticket: &MutationTicket) -> bool {
        self.lifetime.is_alive() && self.sequencer.is_current(ticket)
    }

    /// Whether non-mutation responses (initial loads) may still update view state.
    pub fn is_alive(&self) -> bool {
        self.lifetime.is_alive()
    }

    /// Mark the view as unmounted; every later response is discarded.
    pub fn end(&self) {
        self.lifetime.end();
    }
}

/// Replace the item with `updated`'s id by `updated`. Returns whether one matched.
pub fn replace_by_id<T: OwnedResource>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove the item with `id`. Returns whether one matched.
pub fn remove_by_id<T: OwnedResource>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
