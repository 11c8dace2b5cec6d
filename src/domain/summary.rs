//! Display formatting for estimation results: breakdown table rows, currency strings and
//! the pre-filled email draft.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use super::estimator::{EstimationInput, EstimationResult};

pub const EMAIL_SUBJECT: &str = "Vaccination Earnings Estimate";
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    MainVaccine,
    CoadminVaccine,
    BasketSize,
    StockCost,
    TargetPatients,
    TotalEarnings,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Component::MainVaccine,
        Component::CoadminVaccine,
        Component::BasketSize,
        Component::StockCost,
        Component::TargetPatients,
        Component::TotalEarnings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Component::MainVaccine => "Main Vaccine",
            Component::CoadminVaccine => "Co-admin Vaccine",
            Component::BasketSize => "Basket Size",
            Component::StockCost => "Stock Cost",
            Component::TargetPatients => "Target Patients",
            Component::TotalEarnings => "Total Earnings",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayValue {
    Currency(Decimal),
    Count(u32),
    /// Component was excluded from the calculation.
    NotApplicable,
}

impl DisplayValue {
    fn from_optional(value: Option<Decimal>) -> Self {
        value.map_or(DisplayValue::NotApplicable, DisplayValue::Currency)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Currency(amount) => f.write_str(&format_currency(*amount)),
            DisplayValue::Count(count) => write!(f, "{count}"),
            DisplayValue::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakdownRow {
    pub component: Component,
    pub value: DisplayValue,
}

/// Six rows in fixed order, one per [`Component`].
pub fn format_breakdown(result: &EstimationResult) -> Vec<BreakdownRow> {
    Component::ALL
        .iter()
        .map(|component| {
            let value = match component {
                Component::MainVaccine => DisplayValue::Currency(result.main_component),
                Component::CoadminVaccine => DisplayValue::from_optional(result.coadmin_component),
                Component::BasketSize => DisplayValue::from_optional(result.basket_component),
                Component::StockCost => DisplayValue::from_optional(result.stock_component),
                Component::TargetPatients => DisplayValue::Count(result.target_patients),
                Component::TotalEarnings => DisplayValue::Currency(result.total_earnings),
            };
            BreakdownRow {
                component: *component,
                value,
            }
        })
        .collect()
}

/// `$1,932.00` style rendering. Rounds half away from zero; losses render as `-$452.00`.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Whole-patient display of the break-even count.
pub fn format_break_even(patients: Decimal) -> String {
    let mut rounded = patients.round_dp(0);
    rounded.rescale(0);
    group_thousands(&rounded.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    /// `mailto:` link for the mail client; nothing is sent from here.
    pub compose_uri: String,
}

pub fn format_email(input: &EstimationInput, result: &EstimationResult, recipient: &str) -> EmailDraft {
    let optional_currency = |value: Option<Decimal>| {
        value
            .map(format_currency)
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    };

    let body = [
        format!("Main Vaccine: {}", input.main_vaccine),
        format!(
            "Secondary Vaccine: {}",
            input.coadmin_vaccine.as_deref().unwrap_or(NOT_APPLICABLE)
        ),
        format!("Target Patients: {}", result.target_patients),
        format!("Stock Cost: {}", optional_currency(result.stock_component)),
        format!("Basket Size: {}", optional_currency(result.basket_component)),
        format!(
            "Estimated Earnings: {}",
            format_currency(result.total_earnings)
        ),
    ]
    .join("\n");

    let compose_uri = format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(EMAIL_SUBJECT),
        urlencoding::encode(&body)
    );

    EmailDraft {
        subject: EMAIL_SUBJECT.to_string(),
        body,
        compose_uri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::get_default_prices;
    use crate::domain::estimator::estimate;
    use rust_decimal_macros::dec;

    fn parse_currency(text: &str) -> Decimal {
        let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
        cleaned.parse().unwrap()
    }

    fn full_input() -> EstimationInput {
        EstimationInput::new("COVID-19 (site visit)", 2_000)
            .with_coadmin("Influenza")
            .with_stock_cost(dec!(3000))
            .with_basket_size(dec!(5))
    }

    #[test]
    fn currency_uses_separators_and_two_decimals() {
        assert_eq!(format_currency(dec!(1932)), "$1,932.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(0.005)), "$0.01");
        assert_eq!(format_currency(dec!(-452)), "-$452.00");
        assert_eq!(format_currency(dec!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn break_even_displays_whole_patients() {
        assert_eq!(format_break_even(dec!(500) / dec!(46.67)), "11");
        assert_eq!(format_break_even(dec!(0)), "0");
        assert_eq!(format_break_even(dec!(12345.4)), "12,345");
    }

    #[test]
    fn breakdown_has_six_rows_in_order() {
        let result = estimate(&full_input(), &get_default_prices()).unwrap();
        let rows = format_breakdown(&result);

        let labels: Vec<_> = rows.iter().map(|row| row.component.label()).collect();
        assert_eq!(
            labels,
            [
                "Main Vaccine",
                "Co-admin Vaccine",
                "Basket Size",
                "Stock Cost",
                "Target Patients",
                "Total Earnings"
            ]
        );
        assert_eq!(rows[4].value.to_string(), "2000");
        assert_eq!(rows[5].value.to_string(), "$290,440.00");
    }

    #[test]
    fn excluded_components_render_not_applicable() {
        let input = EstimationInput::new("Influenza", 100);
        let result = estimate(&input, &get_default_prices()).unwrap();
        let rendered: Vec<_> = format_breakdown(&result)
            .iter()
            .map(|row| row.value.to_string())
            .collect();

        assert_eq!(rendered, ["$19.32", "N/A", "N/A", "N/A", "100", "$1,932.00"]);
    }

    #[test]
    fn included_zero_is_distinct_from_excluded() {
        let input = EstimationInput::new("Influenza", 100).with_stock_cost(dec!(0));
        let result = estimate(&input, &get_default_prices()).unwrap();
        let rows = format_breakdown(&result);

        assert_eq!(rows[3].value, DisplayValue::Currency(dec!(0)));
        assert_eq!(rows[3].value.to_string(), "$0.00");
    }

    #[test]
    fn breakdown_currency_round_trips() {
        let result = estimate(&full_input(), &get_default_prices()).unwrap();

        for row in format_breakdown(&result) {
            if let DisplayValue::Currency(amount) = row.value {
                assert_eq!(parse_currency(&row.value.to_string()), amount);
            }
        }

        let loss = estimate(
            &EstimationInput::new("COVID-19 (site visit)", 20)
                .with_stock_cost(dec!(3000))
                .with_basket_size(dec!(5)),
            &get_default_prices(),
        )
        .unwrap();
        assert_eq!(parse_currency(&format_currency(loss.total_earnings)), dec!(-452));
    }

    #[test]
    fn email_body_lists_all_fields() {
        let input = full_input();
        let result = estimate(&input, &get_default_prices()).unwrap();
        let draft = format_email(&input, &result, "manager@pharmacy.example");

        assert_eq!(draft.subject, "Vaccination Earnings Estimate");
        assert_eq!(
            draft.body,
            "Main Vaccine: COVID-19 (site visit)\n\
             Secondary Vaccine: Influenza\n\
             Target Patients: 2000\n\
             Stock Cost: $3,000.00\n\
             Basket Size: $5.00\n\
             Estimated Earnings: $290,440.00"
        );
    }

    #[test]
    fn email_body_marks_toggled_off_fields() {
        let input = EstimationInput::new("Influenza", 100);
        let result = estimate(&input, &get_default_prices()).unwrap();
        let draft = format_email(&input, &result, "a@b.example");

        assert!(draft.body.contains("Main Vaccine: Influenza"));
        assert!(draft.body.contains("Secondary Vaccine: N/A"));
        assert!(draft.body.contains("Target Patients: 100"));
        assert!(draft.body.contains("Stock Cost: N/A"));
        assert!(draft.body.contains("Basket Size: N/A"));
        assert!(draft.body.contains("Estimated Earnings: $1,932.00"));
    }

    #[test]
    fn compose_uri_encodes_subject_and_body() {
        let input = EstimationInput::new("Influenza", 100);
        let result = estimate(&input, &get_default_prices()).unwrap();
        let draft = format_email(&input, &result, "owner+vax@pharmacy.example");

        assert!(draft
            .compose_uri
            .starts_with("mailto:owner+vax@pharmacy.example?subject=Vaccination%20Earnings%20Estimate&body="));
        let (_, encoded_body) = draft.compose_uri.split_once("&body=").unwrap();
        assert!(encoded_body.starts_with("Main%20Vaccine%3A%20Influenza%0ASecondary"));
        assert!(encoded_body.contains("%241%2C932.00"));
        assert!(!encoded_body.contains(' '));
        assert!(!encoded_body.contains('\n'));
        assert_eq!(urlencoding::decode(encoded_body).unwrap(), draft.body);
    }
}
