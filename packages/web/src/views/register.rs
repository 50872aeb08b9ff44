//! Registration page view.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

/// Registration page component.
#[component]
pub fn Register() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to the dashboard
    let state = session.session();
    if !state.loading && state.authenticated {
        nav.replace(Route::Dashboard {});
    }

    let handle_register = {
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let session = session.clone();
            spawn(async move {
                error.set(None);

                let e = email().trim().to_string();
                let p = password();
                let c = confirm();

                if e.is_empty() {
                    error.set(Some("Please enter your email".to_string()));
                    return;
                }
                if p.len() < 8 {
                    error.set(Some(
                        "Password must be at least 8 characters".to_string(),
                    ));
                    return;
                }
                if p != c {
                    error.set(Some("Passwords do not match".to_string()));
                    return;
                }

                loading.set(true);
                // Registration signs the new account in right away.
                match session.register(&e, &p).await {
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
            p { class: "auth-subtitle", "Create your account" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

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

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm(),
                    oninput: move |evt| confirm.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
