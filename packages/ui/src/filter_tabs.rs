use dioxus::prelude::*;

use store::FilterTab;

#[component]
pub fn FilterTabs(active: FilterTab, on_select: EventHandler<FilterTab>) -> Element {
    rsx! {
        div {
            class: "filter-tabs",
            button {
                class: "tab",
                class: if active == FilterTab::Incomplete { "active" },
                onclick: move |_| on_select.call(FilterTab::Incomplete),
                "Active"
            }
            button {
                class: "tab",
                class: if active == FilterTab::Completed { "active" },
                onclick: move |_| on_select.call(FilterTab::Completed),
                "Completed"
            }
        }
    }
}
