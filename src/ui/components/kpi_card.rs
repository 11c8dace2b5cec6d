use dioxus::prelude::*;

use crate::ui::theme;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>, negative: bool) -> Element {
    rsx! {
        div {
            class: "{theme::panel()} kpi",
            h3 { class: "{theme::label_class()}", "{title}" }
            p { class: "kpi-value {theme::amount_tone(negative)}", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi-caption {theme::text_muted()}", "{desc}" }
            }
        }
    }
}
