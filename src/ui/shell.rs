use dioxus::prelude::*;

use crate::ui::{components::price_sidebar::PriceSidebar, theme};
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        div { class: "app",
            header {
                class: "header",
                h1 { "💉 {APP_NAME}" }
                p {
                    class: "{theme::text_muted()}",
                    "Estimate the potential financial impact of vaccination services offered in your pharmacy."
                }
            }
            div { class: "layout",
                PriceSidebar {}
                main { class: "content", {children} }
            }
            footer {
                class: "footer",
                div {
                    class: "disclaimer",
                    "⚠️ "
                    strong { "Disclaimer:" }
                    " This tool is for estimation purposes only and does not guarantee actual revenue outcomes. Please validate all inputs before applying in a clinical or business setting."
                }
                p { class: "{theme::text_muted()}", "{version_label()}" }
            }
        }
    }
}
