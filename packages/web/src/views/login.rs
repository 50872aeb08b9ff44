//! Login page view with an email/password form.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to the dashboard
    let state = session.session();
    if !state.loading && state.authenticated {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = {
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let session = session.clone();
            spawn(async move {
                error.set(None);

                let e = email().trim().to_string();
                let p = password();

                if e.is_empty() {
                    error.set(Some("Please enter your email".to_string()));
                    return;
                }
                if p.is_empty() {
                    error.set(Some("Please enter your password".to_string()));
                    return;
                }

                loading.set(true);
                match session.login(&e, &p).await {
                    Ok(()) => {
                        nav.replace(Route::Dashboard {});
                    }
                    Err(err) => {
                        loading.set(false);
                        error.set(Some(err.to_string()));
                    }
                }
            });
        }
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-brand", "Taskpin" }
            p { class: "auth-subtitle", "Sign in to your account" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "Don't have an account? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
