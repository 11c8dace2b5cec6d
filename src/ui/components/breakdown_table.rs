use dioxus::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{BreakdownRow, DisplayValue};
use crate::ui::theme;

#[component]
pub fn BreakdownTable(rows: Vec<BreakdownRow>) -> Element {
    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                class: "breakdown",
                thead {
                    tr {
                        th { "Component" }
                        th { class: "numeric", "Value" }
                    }
                }
                tbody {
                    for row in rows {
                        BreakdownRowView { row }
                    }
                }
            }
        }
    }
}

#[component]
fn BreakdownRowView(row: BreakdownRow) -> Element {
    let value_class = match row.value {
        DisplayValue::Currency(amount) => theme::amount_tone(amount < Decimal::ZERO),
        DisplayValue::Count(_) => "",
        DisplayValue::NotApplicable => theme::text_muted(),
    };
    rsx! {
        tr {
            td { "{row.component.label()}" }
            td { class: "numeric {value_class}", "{row.value}" }
        }
    }
}
