use dioxus::prelude::*;

use crate::{
    domain::{
        format_break_even, format_breakdown, format_currency, format_email, Calculation,
        SessionState, NO_COADMIN,
    },
    ui::{
        components::{
            breakdown_table::BreakdownTable,
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    // Edits stay local until submitted so the estimator only ever sees a complete snapshot.
    let mut pending = use_signal(|| state.with(|st| st.form.clone()));
    let current = pending();

    let names = state.with(|st| {
        st.defaults()
            .names()
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    let calculation = state.with(|st| st.last_calculation.clone());

    let on_submit = {
        let mut state = state;
        move |evt: FormEvent| {
            evt.prevent_default();
            let snapshot = pending();
            let outcome = state.with_mut(|st| st.submit(snapshot).map(|_| ()));
            if let Err(err) = outcome {
                push_toast(toasts, ToastKind::Error, format!("Cannot calculate: {err}"));
            }
        }
    };

    rsx! {
        div { class: "page",
            form {
                class: "{theme::panel()}",
                onsubmit: on_submit,
                h2 { class: "{theme::section_title()}", "🧮 Calculation Inputs" }
                div { class: "grid-2",
                    label { class: "field",
                        span { class: "{theme::label_class()}", "Main Vaccine" }
                        select {
                            class: "{theme::input_class()}",
                            value: "{current.main_vaccine}",
                            onchange: move |evt| pending.with_mut(|f| f.main_vaccine = evt.value()),
                            for name in names.iter() {
                                option {
                                    value: "{name}",
                                    selected: *name == current.main_vaccine,
                                    "{name}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        span { class: "{theme::label_class()}", "Optional Co-admin Vaccine" }
                        select {
                            class: "{theme::input_class()}",
                            value: "{current.coadmin_vaccine}",
                            onchange: move |evt| pending.with_mut(|f| f.coadmin_vaccine = evt.value()),
                            option {
                                value: NO_COADMIN,
                                selected: current.coadmin_vaccine == NO_COADMIN,
                                "{NO_COADMIN}"
                            }
                            for name in names.iter() {
                                option {
                                    value: "{name}",
                                    selected: *name == current.coadmin_vaccine,
                                    "{name}"
                                }
                            }
                        }
                    }
                }
                div { class: "grid-2",
                    label { class: "field",
                        span { class: "{theme::label_class()}", "🎯 Target Patients" }
                        input {
                            class: "{theme::input_class()}",
                            r#type: "number",
                            min: "0",
                            step: "1",
                            value: "{current.target_patients}",
                            oninput: move |evt| pending.with_mut(|f| f.target_patients = evt.value()),
                        }
                    }
                    div { class: "field",
                        label { class: "{theme::checkbox_row()}",
                            input {
                                r#type: "checkbox",
                                checked: current.stock_cost.enabled,
                                onclick: move |_| pending.with_mut(|f| f.stock_cost.enabled = !f.stock_cost.enabled),
                            }
                            span { "Include Stock Cost" }
                        }
                        if current.stock_cost.enabled {
                            AmountField {
                                label: "💸 Total Stock Cost ($)".to_string(),
                                value: current.stock_cost.text.clone(),
                                on_input: move |text| pending.with_mut(|f| f.stock_cost.text = text),
                            }
                        }
                    }
                }
                div { class: "field",
                    label { class: "{theme::checkbox_row()}",
                        input {
                            r#type: "checkbox",
                            checked: current.basket_size.enabled,
                            onclick: move |_| pending.with_mut(|f| f.basket_size.enabled = !f.basket_size.enabled),
                        }
                        span { "🛒 Include Basket Size" }
                    }
                    if current.basket_size.enabled {
                        AmountField {
                            label: "Avg. Basket Size per Patient ($)".to_string(),
                            value: current.basket_size.text.clone(),
                            on_input: move |text| pending.with_mut(|f| f.basket_size.text = text),
                        }
                    }
                }
                button { class: "{theme::btn_primary()}", r#type: "submit", "Calculate Earnings" }
            }

            if let Some(calculation) = calculation {
                ResultsPanel { calculation: calculation.clone() }
                EmailPanel { calculation }
            }
        }
    }
}

#[component]
fn AmountField(label: String, value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        label { class: "field",
            span { class: "{theme::label_class()}", "{label}" }
            input {
                class: "{theme::input_class()}",
                r#type: "number",
                min: "0",
                step: "0.01",
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

#[component]
fn ResultsPanel(calculation: Calculation) -> Element {
    let result = calculation.result;
    let earnings = format_currency(result.total_earnings);
    let rows = format_breakdown(&result);
    let break_even = result.break_even_patients.map(format_break_even);

    rsx! {
        section { class: "{theme::panel()}",
            h2 { class: "{theme::section_title()}", "💡 Results" }
            div { class: "grid-2",
                KpiCard {
                    title: "💰 Estimated Potential Earnings".to_string(),
                    value: earnings,
                    description: Some(format!(
                        "{} per patient",
                        format_currency(result.revenue_per_patient())
                    )),
                    negative: result.is_loss(),
                }
                if let Some(patients) = break_even {
                    KpiCard {
                        title: "📊 Break-even Patients".to_string(),
                        value: patients,
                        description: Some("Patients needed to cover the stock cost".to_string()),
                        negative: false,
                    }
                }
            }
            h2 { class: "{theme::section_title()}", "📊 Breakdown" }
            BreakdownTable { rows }
        }
    }
}

#[component]
fn EmailPanel(calculation: Calculation) -> Element {
    let mut state = use_context::<Signal<SessionState>>();
    let recipient = state.with(|st| st.recipient.clone());
    let address = recipient.trim().to_string();
    let draft = (!address.is_empty())
        .then(|| format_email(&calculation.input, &calculation.result, &address));

    rsx! {
        section { class: "{theme::panel()}",
            h2 { class: "{theme::section_title()}", "📧 Send Estimate by Email" }
            label { class: "field",
                span { class: "{theme::label_class()}", "Enter recipient email:" }
                input {
                    class: "{theme::input_class()}",
                    r#type: "email",
                    value: "{recipient}",
                    oninput: move |evt| state.with_mut(|st| st.recipient = evt.value()),
                }
            }
            if let Some(draft) = draft {
                p { class: "email-subject", "Subject: {draft.subject}" }
                pre { class: "email-preview", "{draft.body}" }
                a { class: "{theme::mail_link()}", href: "{draft.compose_uri}", "📩 Send Email" }
            }
        }
    }
}
