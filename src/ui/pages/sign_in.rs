use dioxus::prelude::*;

use crate::app::Route;
use crate::infra::http::client::ApiClient;
use crate::ui::styles::{auth_card_style, button_style, input_style, status_style, ButtonKind};
use crate::usecase::services::auth_service::AuthService;
use crate::usecase::services::session_service::SessionContext;

#[component]
pub fn SignIn() -> Element {
    let session = use_context::<SessionContext>();
    let api = use_context::<ApiClient>();
    let nav = navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let session_for_check = session.clone();
    use_hook(move || {
        if !session_for_check.is_expired() {
            nav.replace(Route::Home {});
        }
    });

    let submit = move |_| {
        if busy() {
            return;
        }
        let auth = AuthService::new(api.clone());
        let session = session.clone();
        let email_value = email();
        let password_value = password();
        spawn(async move {
            busy.set(true);
            error.set(None);
            match auth.sign_in(&email_value, &password_value).await {
                Ok(token) => {
                    if let Err(err) = session.set_token(&token) {
                        log::warn!("signed in but the session was not saved: {err}");
                    }
                    nav.replace(Route::Home {});
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: auth_card_style(),
            h2 { style: "margin: 0 0 8px;", "Sign in" }
            input {
                r#type: "email",
                style: input_style(),
                placeholder: "Email",
                value: "{email}",
                oninput: move |event| email.set(event.value()),
            }
            input {
                r#type: "password",
                style: input_style(),
                placeholder: "Password",
                value: "{password}",
                oninput: move |event| password.set(event.value()),
            }
            button {
                style: button_style(ButtonKind::Primary),
                disabled: busy(),
                onclick: submit,
                if busy() { "Signing in..." } else { "Sign in" }
            }
            Link { to: Route::ForgotPassword {}, "Forgot password?" }
            if let Some(message) = error() {
                p { style: status_style(true), "{message}" }
            }
        }
    }
}
