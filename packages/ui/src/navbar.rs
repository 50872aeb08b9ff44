use dioxus::prelude::*;

use store::Account;

#[component]
pub fn Navbar(user: Option<Account>, on_logout: EventHandler<()>) -> Element {
    rsx! {
        header {
            class: "navbar",
            span { class: "navbar-brand", "Taskpin" }
            div {
                class: "navbar-session",
                if let Some(user) = user {
                    span { class: "navbar-email", "{user.email}" }
                }
                button {
                    class: "secondary",
                    onclick: move |_| on_logout.call(()),
                    "Log out"
                }
            }
        }
    }
}
