use dioxus::prelude::*;

use crate::{
    domain::SessionState,
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::CalculatorPage,
        shell::Shell,
    },
    util::assets,
};

#[component]
pub fn App() -> Element {
    // One session per window; price overrides and form input never outlive it.
    let state = use_signal(|| {
        log::info!("Starting calculator session with default vaccine pricing");
        SessionState::default()
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Shell { CalculatorPage {} }
        Toast {}
    }
}
