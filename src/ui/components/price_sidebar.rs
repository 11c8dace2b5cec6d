use dioxus::prelude::*;

use crate::{
    domain::SessionState,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

/// Per-vaccine fee overrides for the current session. Edits only take effect on the next
/// calculation.
#[component]
pub fn PriceSidebar() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let fields = state.with(|st| {
        st.defaults()
            .iter()
            .map(|entry| (entry.name.clone(), st.price_input(&entry.name).to_string()))
            .collect::<Vec<_>>()
    });

    let on_reset = {
        let mut state = state;
        move |_| {
            state.with_mut(|st| st.reset_prices());
            push_toast(toasts, ToastKind::Info, "Restored default vaccine pricing.");
        }
    };

    rsx! {
        aside {
            class: "sidebar",
            h2 { class: "{theme::section_title()}", "💰 Customise Vaccine Pricing" }
            div {
                class: "price-fields",
                for (name, value) in fields {
                    PriceOverrideField { key: "{name}", name: name.clone(), value }
                }
            }
            button { class: "{theme::btn_secondary()}", onclick: on_reset, "Reset Defaults" }
        }
    }
}

#[component]
fn PriceOverrideField(name: String, value: String) -> Element {
    let mut state = use_context::<Signal<SessionState>>();
    let field_name = name.clone();

    rsx! {
        label {
            class: "field",
            span { class: "{theme::label_class()}", "{name}" }
            input {
                class: "{theme::input_class()}",
                r#type: "number",
                min: "0",
                step: "0.01",
                value: "{value}",
                oninput: move |evt| state.with_mut(|st| st.set_price_input(&field_name, evt.value())),
            }
        }
    }
}
