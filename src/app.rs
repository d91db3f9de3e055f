use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::list_filter::filter_and_sort;
use crate::infra::http::client::ApiClient;
use crate::infra::memory::MemorySessionStore;
use crate::infra::sqlite::session_store::SqliteSessionStore;
use crate::ui::pages::forgot_password::ForgotPassword;
use crate::ui::pages::home::Home;
use crate::ui::pages::not_found::NotFound;
use crate::ui::pages::sections::{
    Classes, Keywords, Logs, Pricing, Replies, Schools, Students, Teachers, Users,
};
use crate::ui::pages::sign_in::SignIn;
use crate::ui::styles::{
    body_style, button_style, header_style, input_style, root_container_style, sidebar_style,
    ButtonKind,
};
use crate::usecase::ports::session::SessionStore;
use crate::usecase::services::session_service::SessionContext;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/signin")]
    SignIn {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[layout(ProtectedLayout)]
        #[route("/")]
        Home {},
        #[route("/schools")]
        Schools {},
        #[route("/classes")]
        Classes {},
        #[route("/teachers")]
        Teachers {},
        #[route("/students")]
        Students {},
        #[route("/replies")]
        Replies {},
        #[route("/keywords")]
        Keywords {},
        #[route("/pricing")]
        Pricing {},
        #[route("/users")]
        Users {},
        #[route("/logs")]
        Logs {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// A menu entry in the sidebar, the home grid and the quick-nav box.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: &'static str,
    pub blurb: &'static str,
    pub route: Route,
}

pub fn sections() -> Vec<Section> {
    vec![
        Section {
            label: "Schools",
            blurb: "Campuses and their contact details",
            route: Route::Schools {},
        },
        Section {
            label: "Classes",
            blurb: "Class groups by grade",
            route: Route::Classes {},
        },
        Section {
            label: "Teachers",
            blurb: "Staff and their subjects",
            route: Route::Teachers {},
        },
        Section {
            label: "Students",
            blurb: "Enrolment and roster import",
            route: Route::Students {},
        },
        Section {
            label: "Default replies",
            blurb: "Canned chatbot answers",
            route: Route::Replies {},
        },
        Section {
            label: "Forbidden keywords",
            blurb: "Words the chatbot blocks",
            route: Route::Keywords {},
        },
        Section {
            label: "Pricing",
            blurb: "Subscription plans",
            route: Route::Pricing {},
        },
        Section {
            label: "Users",
            blurb: "Dashboard accounts and roles",
            route: Route::Users {},
        },
        Section {
            label: "Audit logs",
            blurb: "Who changed what",
            route: Route::Logs {},
        },
    ]
}

fn section_search_text(section: &Section) -> String {
    format!("{} {}", section.label, section.blurb)
}

/// Sections whose label or blurb contains `query`. Runs on every
/// keystroke; the list is tiny.
pub fn matching_sections(query: &str) -> Vec<Section> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    filter_and_sort(&sections(), query.trim(), section_search_text, &[], "")
}

struct AppServices {
    config: AppConfig,
    session: SessionContext,
    api: ApiClient,
}

fn open_session_store() -> Arc<dyn SessionStore> {
    let opened = crate::default_db_path()
        .and_then(|db_path| Ok(SqliteSessionStore::open(db_path)?));
    match opened {
        Ok(store) => Arc::new(store),
        Err(err) => {
            log::warn!("sign-in will not survive a restart: {err:#}");
            Arc::new(MemorySessionStore::default())
        }
    }
}

fn bootstrap() -> Result<AppServices> {
    let config = AppConfig::load();
    let session = SessionContext::new(open_session_store());
    let api = ApiClient::new(
        &config.api_base_url,
        config.request_timeout(),
        Arc::new(session.clone()),
    )?;
    Ok(AppServices {
        config,
        session,
        api,
    })
}

#[component]
pub fn App() -> Element {
    let started = use_hook(|| match bootstrap() {
        Ok(services) => {
            provide_context(services.config);
            provide_context(services.session);
            provide_context(services.api);
            Ok(())
        }
        Err(err) => {
            log::error!("startup failed: {err:#}");
            Err(format!("{err:#}"))
        }
    });

    match started {
        Ok(()) => rsx! { Router::<Route> {} },
        Err(message) => rsx! {
            div {
                style: root_container_style(),
                p { style: "padding: 16px;", "Could not start: {message}" }
            }
        },
    }
}

/// Where the layout guard sends the user. A dead token is cleared on the way.
pub(crate) fn guard_redirect(session: &SessionContext) -> Option<Route> {
    if !session.is_expired() {
        return None;
    }
    log::info!("no valid session, redirecting to sign-in");
    session.clear_token();
    Some(Route::SignIn {})
}

/// Everything behind sign-in. Re-checks the token on every navigation.
#[component]
fn ProtectedLayout() -> Element {
    let session = use_context::<SessionContext>();
    let nav = navigator();
    let _current = use_route::<Route>();
    let expired = session.is_expired();

    let guard = session.clone();
    use_effect(use_reactive!(|expired| {
        if expired {
            if let Some(target) = guard_redirect(&guard) {
                nav.replace(target);
            }
        }
    }));

    if expired {
        return rsx! {};
    }

    rsx! {
        div {
            style: root_container_style(),
            Header {}
            div {
                style: body_style(),
                Sidebar {}
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let current = use_route::<Route>();
    let home_active = current == Route::Home {};
    let entries: Vec<(&'static str, Route, bool)> = sections()
        .into_iter()
        .map(|section| {
            let active = current == section.route;
            (section.label, section.route, active)
        })
        .collect();

    rsx! {
        nav {
            style: sidebar_style(),
            Link { to: Route::Home {}, style: sidebar_link_style(home_active), "Dashboard" }
            for (label, route, active) in entries {
                Link {
                    key: "{label}",
                    style: sidebar_link_style(active),
                    to: route,
                    "{label}"
                }
            }
        }
    }
}

fn sidebar_link_style(active: bool) -> &'static str {
    if active {
        "display: block; padding: 6px 10px; border-radius: 6px; background: #eef4ff; color: #2f6fde; text-decoration: none;"
    } else {
        "display: block; padding: 6px 10px; border-radius: 6px; color: #333; text-decoration: none;"
    }
}

#[component]
fn Header() -> Element {
    let session = use_context::<SessionContext>();
    let nav = navigator();
    let mut quick = use_signal(String::new);

    let matches = matching_sections(&quick.read());
    let first_match = matches.first().map(|section| section.route.clone());
    let user_label = session
        .claims()
        .and_then(|claims| claims.email.or(claims.user_id))
        .unwrap_or_default();

    rsx! {
        header {
            style: header_style(),
            strong { "School Admin" }
            div {
                style: "position: relative;",
                input {
                    r#type: "search",
                    style: input_style(),
                    placeholder: "Jump to section",
                    value: "{quick}",
                    oninput: move |event| quick.set(event.value()),
                    onkeydown: move |event| {
                        if event.key() != Key::Enter {
                            return;
                        }
                        if let Some(route) = first_match.clone() {
                            quick.set(String::new());
                            nav.push(route);
                        }
                    },
                }
                if !matches.is_empty() {
                    div {
                        style: "position: absolute; left: 0; top: 100%; margin-top: 4px; min-width: 240px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                        for (label, route) in matches.into_iter().map(|section| (section.label, section.route)) {
                            div {
                                key: "{label}",
                                style: "padding: 8px 10px; cursor: pointer;",
                                onclick: move |_| {
                                    quick.set(String::new());
                                    nav.push(route.clone());
                                },
                                "{label}"
                            }
                        }
                    }
                }
            }
            span { style: "margin-left: auto; color: #555;", "{user_label}" }
            button {
                style: button_style(ButtonKind::Plain),
                onclick: move |_| {
                    session.clear_token();
                    log::info!("signed out");
                    nav.replace(Route::SignIn {});
                },
                "Sign out"
            }
        }
    }
}
