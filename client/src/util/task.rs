//! Browser-only task spawning.
//!
//! Server renders never start network work; the hydrated client repeats the
//! same component setup and runs it there.

use std::future::Future;

/// Run `fut` on the browser event loop. Dropped unstarted outside the browser.
pub fn spawn_browser_task<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "hydrate"))]
    drop(fut);
}
