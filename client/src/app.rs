//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the single `SessionTracker`: it is started when the root
//! mounts and stopped in the root's cleanup. Everything else reads the
//! session, toast queue, identity provider, and REST client from context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::{footer::Footer, navbar::Navbar, protected_route::ProtectedRoute, toaster::Toaster};
use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::net::firebase::FirebaseIdentity;
use crate::pages::{
    about::AboutPage, blog_detail::BlogDetailPage, blog_editor::BlogEditorPage, blogs::BlogsPage, home::HomePage,
    login::LoginPage, project_detail::ProjectDetailPage, project_editor::ProjectEditorPage, projects::ProjectsPage,
    signup::SignupPage,
};
use crate::state::session::{Session, SessionTracker};
use crate::state::toast::ToastState;

/// Identity provider used by the running app.
pub type AppIdentity = FirebaseIdentity;
/// Tracker copying provider notifications into the app-wide session signal.
pub type AppSessionTracker = SessionTracker<AppIdentity, RwSignal<Session>>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    let session = RwSignal::new(Session::default());
    let toasts = RwSignal::new(ToastState::default());
    let identity = FirebaseIdentity::new(&config);
    let api = ApiClient::from_config(&config);

    let tracker: AppSessionTracker = SessionTracker::new(identity.clone(), session);
    tracker.start();
    let tracker_cleanup = tracker.clone();
    on_cleanup(move || tracker_cleanup.stop());

    provide_context(session);
    provide_context(toasts);
    provide_context(identity);
    provide_context(api);
    provide_context(tracker);

    view! {
        <Stylesheet id="leptos" href="/pkg/folio.css"/>
        <Title text="Folio"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("home") view=HomePage/>
                    <Route path=StaticSegment("about") view=AboutPage/>
                    <Route path=StaticSegment("blogs") view=BlogsPage/>
                    <Route path=(StaticSegment("blogs"), ParamSegment("id")) view=BlogDetailPage/>
                    <Route path=StaticSegment("projects") view=ProjectsPage/>
                    <Route path=(StaticSegment("projects"), ParamSegment("id")) view=ProjectDetailPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route
                        path=StaticSegment("add-blog")
                        view=|| view! { <ProtectedRoute><BlogEditorPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("edit-blog"), ParamSegment("id"))
                        view=|| view! { <ProtectedRoute><BlogEditorPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("add-project")
                        view=|| view! { <ProtectedRoute><ProjectEditorPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("edit-project"), ParamSegment("id"))
                        view=|| view! { <ProtectedRoute><ProjectEditorPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
            <Footer/>
            <Toaster/>
        </Router>
    }
}
