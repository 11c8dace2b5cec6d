use log::debug;
use rust_decimal::Decimal;

use super::catalog::PriceCatalog;
use super::error::{EstimateError, EstimateResult};

/// One consistent snapshot of the calculation form, taken when the user submits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimationInput {
    pub main_vaccine: String,
    pub coadmin_vaccine: Option<String>,
    pub target_patients: u32,
    /// `None` when the stock cost toggle is off.
    pub stock_cost: Option<Decimal>,
    /// `None` when the basket size toggle is off.
    pub basket_size: Option<Decimal>,
}

impl EstimationInput {
    pub fn new(main_vaccine: impl Into<String>, target_patients: u32) -> Self {
        Self {
            main_vaccine: main_vaccine.into(),
            coadmin_vaccine: None,
            target_patients,
            stock_cost: None,
            basket_size: None,
        }
    }

    pub fn with_coadmin(mut self, vaccine: impl Into<String>) -> Self {
        self.coadmin_vaccine = Some(vaccine.into());
        self
    }

    pub fn with_stock_cost(mut self, cost: Decimal) -> Self {
        self.stock_cost = Some(cost);
        self
    }

    pub fn with_basket_size(mut self, basket: Decimal) -> Self {
        self.basket_size = Some(basket);
        self
    }
}

/// Earnings breakdown derived from an [`EstimationInput`]. Optional components are `None`
/// when excluded, which is distinct from an included component worth zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimationResult {
    pub main_component: Decimal,
    pub coadmin_component: Option<Decimal>,
    pub basket_component: Option<Decimal>,
    pub stock_component: Option<Decimal>,
    pub target_patients: u32,
    pub total_earnings: Decimal,
    /// Unrounded; only rounded when displayed.
    pub break_even_patients: Option<Decimal>,
}

impl EstimationResult {
    /// Revenue earned for each vaccinated patient.
    pub fn revenue_per_patient(&self) -> Decimal {
        self.main_component
            + self.coadmin_component.unwrap_or_default()
            + self.basket_component.unwrap_or_default()
    }

    pub fn is_loss(&self) -> bool {
        self.total_earnings < Decimal::ZERO
    }
}

pub fn estimate(input: &EstimationInput, prices: &PriceCatalog) -> EstimateResult<EstimationResult> {
    ensure_non_negative("stock cost", input.stock_cost)?;
    ensure_non_negative("basket size", input.basket_size)?;

    let main_price = prices.price_of(&input.main_vaccine)?;
    let coadmin_price = input
        .coadmin_vaccine
        .as_deref()
        .map(|name| prices.price_of(name))
        .transpose()?;

    let per_patient = main_price
        .checked_add(coadmin_price.unwrap_or_default())
        .and_then(|sum| sum.checked_add(input.basket_size.unwrap_or_default()))
        .ok_or(EstimateError::AmountOutOfRange)?;

    let stock = input.stock_cost.unwrap_or_default();
    let total_earnings = per_patient
        .checked_mul(Decimal::from(input.target_patients))
        .and_then(|revenue| revenue.checked_sub(stock))
        .ok_or(EstimateError::AmountOutOfRange)?;

    let break_even_patients = match input.stock_cost {
        Some(stock) if per_patient > Decimal::ZERO => Some(
            stock
                .checked_div(per_patient)
                .ok_or(EstimateError::AmountOutOfRange)?,
        ),
        _ => None,
    };

    debug!(
        "Estimated main={} coadmin={:?} per_patient={} patients={} stock={:?} total={} break_even={:?}",
        input.main_vaccine,
        input.coadmin_vaccine,
        per_patient,
        input.target_patients,
        input.stock_cost,
        total_earnings,
        break_even_patients
    );

    Ok(EstimationResult {
        main_component: main_price,
        coadmin_component: coadmin_price,
        basket_component: input.basket_size,
        stock_component: input.stock_cost,
        target_patients: input.target_patients,
        total_earnings,
        break_even_patients,
    })
}

fn ensure_non_negative(field: &str, value: Option<Decimal>) -> EstimateResult<()> {
    match value {
        Some(amount) if amount < Decimal::ZERO => Err(EstimateError::negative(field)),
        _ => Ok(()),
    }
}
