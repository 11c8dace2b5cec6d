use std::collections::HashMap;

use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::catalog::{apply_overrides, get_default_prices, PriceCatalog, PriceOverrides};
use super::error::{EstimateError, EstimateResult};
use super::estimator::{estimate, EstimationInput, EstimationResult};

/// Label of the co-admin option meaning "no second vaccine".
pub const NO_COADMIN: &str = "None";

pub const DEFAULT_TARGET_PATIENTS: u32 = 100;
pub const DEFAULT_STOCK_COST: Decimal = dec!(100.00);
pub const DEFAULT_BASKET_SIZE: Decimal = dec!(10.00);

/// A numeric field gated by a checkbox. The text survives while the toggle is off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggledAmount {
    pub enabled: bool,
    pub text: String,
}

impl ToggledAmount {
    pub fn disabled(default: Decimal) -> Self {
        Self {
            enabled: false,
            text: format!("{default:.2}"),
        }
    }

    /// Parsed amount when enabled, `None` otherwise.
    pub fn resolve(&self, field: &str) -> EstimateResult<Option<Decimal>> {
        if !self.enabled {
            return Ok(None);
        }
        parse_amount(field, &self.text).map(Some)
    }
}

/// Raw text of the calculation form as the user typed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationForm {
    pub main_vaccine: String,
    pub coadmin_vaccine: String,
    pub target_patients: String,
    pub stock_cost: ToggledAmount,
    pub basket_size: ToggledAmount,
}

impl CalculationForm {
    pub fn new(catalog: &PriceCatalog) -> Self {
        Self {
            main_vaccine: catalog.names().next().unwrap_or_default().to_string(),
            coadmin_vaccine: NO_COADMIN.to_string(),
            target_patients: DEFAULT_TARGET_PATIENTS.to_string(),
            stock_cost: ToggledAmount::disabled(DEFAULT_STOCK_COST),
            basket_size: ToggledAmount::disabled(DEFAULT_BASKET_SIZE),
        }
    }

    /// Validates the form into an immutable snapshot for the estimator.
    pub fn to_input(&self) -> EstimateResult<EstimationInput> {
        let mut input =
            EstimationInput::new(self.main_vaccine.clone(), parse_patients(&self.target_patients)?);
        if let Some(name) = coadmin_from_selection(&self.coadmin_vaccine) {
            input = input.with_coadmin(name);
        }
        if let Some(cost) = self.stock_cost.resolve("stock cost")? {
            input = input.with_stock_cost(cost);
        }
        if let Some(basket) = self.basket_size.resolve("basket size")? {
            input = input.with_basket_size(basket);
        }
        Ok(input)
    }
}

/// Maps the co-admin dropdown value onto an optional vaccine name.
pub fn coadmin_from_selection(selection: &str) -> Option<String> {
    if selection == NO_COADMIN || selection.trim().is_empty() {
        None
    } else {
        Some(selection.to_string())
    }
}

/// Parses a required non-negative money amount.
pub fn parse_amount(field: &str, text: &str) -> EstimateResult<Decimal> {
    let trimmed = text.trim().trim_start_matches('$').replace(',', "");
    if trimmed.is_empty() {
        return Err(EstimateError::required(field));
    }
    let value: Decimal = trimmed
        .parse()
        .map_err(|_| EstimateError::invalid(field, format!("'{}' is not a number", text.trim())))?;
    if value < Decimal::ZERO {
        return Err(EstimateError::negative(field));
    }
    Ok(value)
}

pub fn parse_patients(text: &str) -> EstimateResult<u32> {
    const FIELD: &str = "target patients";
    let trimmed = text.trim().replace(',', "");
    if trimmed.is_empty() {
        return Err(EstimateError::required(FIELD));
    }
    let value: i64 = trimmed.parse().map_err(|_| {
        EstimateError::invalid(FIELD, format!("'{}' is not a whole number", text.trim()))
    })?;
    if value < 0 {
        return Err(EstimateError::negative(FIELD));
    }
    u32::try_from(value).map_err(|_| EstimateError::invalid(FIELD, "too large"))
}

/// A successful submission: the snapshot that was estimated and its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    pub input: EstimationInput,
    pub result: EstimationResult,
}

/// Everything one calculator window holds. Created per session and never shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    defaults: PriceCatalog,
    /// Override text per vaccine name, seeded from the defaults.
    pub price_inputs: HashMap<String, String>,
    pub form: CalculationForm,
    pub recipient: String,
    pub last_calculation: Option<Calculation>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(get_default_prices())
    }
}

impl SessionState {
    pub fn new(defaults: PriceCatalog) -> Self {
        let form = CalculationForm::new(&defaults);
        Self {
            price_inputs: default_price_inputs(&defaults),
            defaults,
            form,
            recipient: String::new(),
            last_calculation: None,
        }
    }

    pub fn defaults(&self) -> &PriceCatalog {
        &self.defaults
    }

    pub fn price_input(&self, name: &str) -> &str {
        self.price_inputs.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set_price_input(&mut self, name: &str, text: String) {
        self.price_inputs.insert(name.to_string(), text);
    }

    pub fn reset_prices(&mut self) {
        self.price_inputs = default_price_inputs(&self.defaults);
        info!("Restored default vaccine pricing");
    }

    /// Parses the sidebar fields into overrides for entries that differ from the defaults.
    pub fn overrides(&self) -> EstimateResult<PriceOverrides> {
        let mut overrides = PriceOverrides::new();
        for entry in self.defaults.iter() {
            let Some(text) = self.price_inputs.get(&entry.name) else {
                continue;
            };
            let price = parse_amount(&format!("price for {}", entry.name), text)?;
            if price != entry.unit_price {
                overrides.insert(entry.name.clone(), price);
            }
        }
        Ok(overrides)
    }

    pub fn resolved_prices(&self) -> EstimateResult<PriceCatalog> {
        apply_overrides(&self.defaults, &self.overrides()?)
    }

    /// Runs one calculation from `form`. On failure the previous result is cleared.
    pub fn submit(&mut self, form: CalculationForm) -> EstimateResult<&Calculation> {
        self.form = form;
        self.last_calculation = None;

        let calculation = self.calculate().inspect_err(|err| {
            warn!("Rejected calculation input: {err}");
        })?;

        info!(
            "Calculated earnings {} for {} patients of {}",
            calculation.result.total_earnings,
            calculation.input.target_patients,
            calculation.input.main_vaccine
        );
        Ok(self.last_calculation.insert(calculation))
    }

    fn calculate(&self) -> EstimateResult<Calculation> {
        let prices = self.resolved_prices()?;
        let input = self.form.to_input()?;
        debug!("Submitting {input:?}");
        let result = estimate(&input, &prices)?;
        Ok(Calculation { input, result })
    }
}

fn default_price_inputs(catalog: &PriceCatalog) -> HashMap<String, String> {
    catalog
        .iter()
        .map(|entry| (entry.name.clone(), format!("{:.2}", entry.unit_price)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionState {
        SessionState::default()
    }

    #[test]
    fn new_session_seeds_form_and_prices() {
        let state = session();
        assert_eq!(state.form.main_vaccine, "Influenza");
        assert_eq!(state.form.coadmin_vaccine, NO_COADMIN);
        assert_eq!(state.form.target_patients, "100");
        assert_eq!(state.form.stock_cost.text, "100.00");
        assert_eq!(state.form.basket_size.text, "10.00");
        assert_eq!(state.price_input("COVID-19 (site visit)"), "122.40");
        assert_eq!(state.overrides().unwrap(), PriceOverrides::new());
        assert!(state.last_calculation.is_none());
    }

    #[test]
    fn submit_uses_session_overrides() {
        let mut state = session();
        state.set_price_input("Shingles", "0".to_string());

        let mut form = state.form.clone();
        form.main_vaccine = "Shingles".to_string();
        form.target_patients = "10".to_string();

        let calculation = state.submit(form).unwrap();
        assert_eq!(calculation.result.total_earnings, dec!(0));
        assert!(state.last_calculation.is_some());
    }

    #[test]
    fn submit_with_stock_and_coadmin() {
        let mut state = session();
        let mut form = state.form.clone();
        form.main_vaccine = "COVID-19".to_string();
        form.coadmin_vaccine = "Influenza".to_string();
        form.target_patients = "50".to_string();
        form.stock_cost = ToggledAmount {
            enabled: true,
            text: "500".to_string(),
        };

        let result = &state.submit(form).unwrap().result;
        assert_eq!(result.total_earnings, dec!(1833.50));
        assert_eq!(result.break_even_patients.map(|b| b.round()), Some(dec!(11)));
    }

    #[test]
    fn none_selection_matches_omitted_coadmin() {
        let mut state = session();
        let form = state.form.clone();
        let via_selection = state.submit(form).unwrap().result.clone();

        let direct = estimate(&EstimationInput::new("Influenza", 100), &get_default_prices()).unwrap();
        assert_eq!(via_selection.total_earnings, direct.total_earnings);
        assert_eq!(coadmin_from_selection(NO_COADMIN), None);
    }

    #[test]
    fn toggling_keeps_stored_amount() {
        let mut state = session();
        let mut form = state.form.clone();
        form.basket_size = ToggledAmount {
            enabled: true,
            text: "12.50".to_string(),
        };
        let enabled = state.submit(form.clone()).unwrap().result.total_earnings;

        form.basket_size.enabled = false;
        let disabled = state.submit(form.clone()).unwrap().result.total_earnings;
        assert_eq!(disabled, dec!(1932.00));
        assert_eq!(form.basket_size.text, "12.50");

        form.basket_size.enabled = true;
        let re_enabled = state.submit(form).unwrap().result.total_earnings;
        assert_eq!(enabled, re_enabled);
        assert_eq!(re_enabled, dec!(3182.00));
    }

    #[test]
    fn stock_toggle_round_trip_restores_break_even() {
        let mut state = session();
        let mut form = state.form.clone();
        form.main_vaccine = "COVID-19".to_string();
        form.coadmin_vaccine = "Influenza".to_string();
        form.target_patients = "50".to_string();
        form.stock_cost = ToggledAmount {
            enabled: true,
            text: "500".to_string(),
        };
        let enabled = state.submit(form.clone()).unwrap().result.clone();
        assert_eq!(enabled.total_earnings, dec!(1833.50));
        assert!(enabled.break_even_patients.is_some());

        form.stock_cost.enabled = false;
        let disabled = state.submit(form.clone()).unwrap().result.clone();
        assert_eq!(disabled.total_earnings, dec!(2333.50));
        assert_eq!(disabled.stock_component, None);
        assert_eq!(disabled.break_even_patients, None);
        assert_eq!(form.stock_cost.text, "500");

        form.stock_cost.enabled = true;
        let re_enabled = state.submit(form).unwrap().result.clone();
        assert_eq!(re_enabled, enabled);
    }

    #[test]
    fn disabled_field_ignores_invalid_text() {
        let mut form = CalculationForm::new(&get_default_prices());
        form.stock_cost.text = "-50".to_string();
        assert_eq!(form.to_input().unwrap().stock_cost, None);

        form.stock_cost.enabled = true;
        assert!(matches!(
            form.to_input(),
            Err(EstimateError::InvalidInput { .. })
        ));
    }

    #[test]
    fn negative_price_override_is_rejected_and_clears_result() {
        let mut state = session();
        let form = state.form.clone();
        state.submit(form.clone()).unwrap();

        state.set_price_input("Influenza", "-19.32".to_string());
        let err = state.submit(form).unwrap_err();
        assert_eq!(err, EstimateError::negative("price for Influenza"));
        assert!(state.last_calculation.is_none());
    }

    #[test]
    fn blank_price_is_rejected_and_clears_result() {
        let mut state = session();
        let form = state.form.clone();
        state.submit(form.clone()).unwrap();

        state.set_price_input("Influenza", "  ".to_string());
        let err = state.submit(form).unwrap_err();
        assert_eq!(err, EstimateError::required("price for Influenza"));
        assert!(state.last_calculation.is_none());
    }

    #[test]
    fn blank_patient_count_is_rejected_and_clears_result() {
        let mut state = session();
        let mut form = state.form.clone();
        state.submit(form.clone()).unwrap();

        form.target_patients = String::new();
        let err = state.submit(form).unwrap_err();
        assert_eq!(err, EstimateError::required("target patients"));
        assert!(state.last_calculation.is_none());
    }

    #[test]
    fn blank_enabled_stock_cost_is_rejected_and_clears_result() {
        let mut state = session();
        let mut form = state.form.clone();
        state.submit(form.clone()).unwrap();

        form.stock_cost = ToggledAmount {
            enabled: true,
            text: String::new(),
        };
        let err = state.submit(form.clone()).unwrap_err();
        assert_eq!(err, EstimateError::required("stock cost"));
        assert!(state.last_calculation.is_none());

        // blank text is fine while the toggle is off
        form.stock_cost.enabled = false;
        assert!(state.submit(form).is_ok());
    }

    #[test]
    fn reset_prices_restores_defaults() {
        let mut state = session();
        state.set_price_input("Rabies", "44".to_string());
        assert_eq!(state.overrides().unwrap().len(), 1);

        state.reset_prices();
        assert!(state.overrides().unwrap().is_empty());
        assert_eq!(state.price_input("Rabies"), "19.32");
    }

    #[test]
    fn patients_are_validated() {
        assert_eq!(parse_patients(" 1,200 "), Ok(1200));
        assert_eq!(parse_patients(" "), Err(EstimateError::required("target patients")));
        assert_eq!(
            parse_patients("-3"),
            Err(EstimateError::negative("target patients"))
        );
        assert!(parse_patients("2.5").is_err());
        assert!(parse_patients("99999999999").is_err());
    }

    #[test]
    fn amounts_are_validated() {
        assert_eq!(parse_amount("stock cost", "$1,250.50"), Ok(dec!(1250.50)));
        assert_eq!(
            parse_amount("stock cost", "  "),
            Err(EstimateError::required("stock cost"))
        );
        assert_eq!(
            parse_amount("stock cost", "-1"),
            Err(EstimateError::negative("stock cost"))
        );
        assert!(matches!(
            parse_amount("stock cost", "ten"),
            Err(EstimateError::InvalidInput { .. })
        ));
    }
}
