use dioxus::prelude::*;

use crate::app::Route;
use crate::infra::http::client::ApiClient;
use crate::ui::styles::{auth_card_style, button_style, input_style, status_style, ButtonKind};
use crate::usecase::services::auth_service::{AuthError, AuthService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    Email,
    Code,
    NewPassword,
}

impl ResetStep {
    pub fn title(self) -> &'static str {
        match self {
            ResetStep::Email => "Reset your password",
            ResetStep::Code => "Enter the code we emailed you",
            ResetStep::NewPassword => "Choose a new password",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            ResetStep::Email => "Send code",
            ResetStep::Code => "Verify code",
            ResetStep::NewPassword => "Reset password",
        }
    }

    pub fn next(self) -> Option<ResetStep> {
        match self {
            ResetStep::Email => Some(ResetStep::Code),
            ResetStep::Code => Some(ResetStep::NewPassword),
            ResetStep::NewPassword => None,
        }
    }
}

#[component]
pub fn ForgotPassword() -> Element {
    let api = use_context::<ApiClient>();
    let nav = navigator();
    let mut step = use_signal(|| ResetStep::Email);
    let mut email = use_signal(String::new);
    let mut otp = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut message = use_signal(|| None::<(String, bool)>);

    let submit = move |_| {
        if busy() {
            return;
        }
        let auth = AuthService::new(api.clone());
        let current = step();
        let (email_value, otp_value) = (email(), otp());
        let (password_value, confirmation_value) = (password(), confirmation());
        spawn(async move {
            busy.set(true);
            message.set(None);
            let result: Result<(), AuthError> = match current {
                ResetStep::Email => auth.request_otp(&email_value).await,
                ResetStep::Code => auth.verify_otp(&email_value, &otp_value).await,
                ResetStep::NewPassword => {
                    auth.reset_password(&email_value, &otp_value, &password_value, &confirmation_value)
                        .await
                }
            };
            busy.set(false);
            match (result, current.next()) {
                (Ok(()), Some(next)) => {
                    if current == ResetStep::Email {
                        message.set(Some((format!("A code was sent to {}", email_value.trim()), false)));
                    }
                    step.set(next);
                }
                (Ok(()), None) => {
                    nav.replace(Route::SignIn {});
                }
                (Err(err), _) => message.set(Some((err.to_string(), true))),
            }
        });
    };

    let current = step();
    let title = current.title();
    let action = current.action_label();

    rsx! {
        div {
            style: auth_card_style(),
            h2 { style: "margin: 0 0 8px;", "{title}" }
            {match current {
                ResetStep::Email => rsx! {
                    input {
                        r#type: "email",
                        style: input_style(),
                        placeholder: "Email",
                        value: "{email}",
                        oninput: move |event| email.set(event.value()),
                    }
                },
                ResetStep::Code => rsx! {
                    input {
                        style: input_style(),
                        placeholder: "Code",
                        value: "{otp}",
                        oninput: move |event| otp.set(event.value()),
                    }
                    button {
                        style: button_style(ButtonKind::Plain),
                        disabled: busy(),
                        onclick: move |_| {
                            otp.set(String::new());
                            step.set(ResetStep::Email);
                        },
                        "Use a different email"
                    }
                },
                ResetStep::NewPassword => rsx! {
                    input {
                        r#type: "password",
                        style: input_style(),
                        placeholder: "New password",
                        value: "{password}",
                        oninput: move |event| password.set(event.value()),
                    }
                    input {
                        r#type: "password",
                        style: input_style(),
                        placeholder: "Confirm new password",
                        value: "{confirmation}",
                        oninput: move |event| confirmation.set(event.value()),
                    }
                },
            }}
            button {
                style: button_style(ButtonKind::Primary),
                disabled: busy(),
                onclick: submit,
                "{action}"
            }
            Link { to: Route::SignIn {}, "Back to sign in" }
            if let Some((text, is_error)) = message() {
                p { style: status_style(is_error), "{text}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_email_code_password() {
        assert_eq!(ResetStep::Email.next(), Some(ResetStep::Code));
        assert_eq!(ResetStep::Code.next(), Some(ResetStep::NewPassword));
        assert_eq!(ResetStep::NewPassword.next(), None);
        assert_eq!(ResetStep::NewPassword.action_label(), "Reset password");
    }
}
