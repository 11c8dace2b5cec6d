use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::{EstimateError, EstimateResult};

/// Standard per-dose fee shared by most vaccines in the table.
const STANDARD_FEE: Decimal = dec!(19.32);

/// Built-in fee table in display order.
const DEFAULT_PRICES: [(&str, Decimal); 20] = [
    ("Influenza", STANDARD_FEE),
    ("COVID-19", dec!(27.35)),
    ("COVID-19 (site visit)", dec!(122.40)),
    ("Pneumococcal", STANDARD_FEE),
    ("Respiratory Syncytial Virus (RSV)", STANDARD_FEE),
    ("Measles, mumps, rubella", STANDARD_FEE),
    ("Diphtheria, tetanus, pertussis", STANDARD_FEE),
    ("Shingles", STANDARD_FEE),
    ("Hepatitis A", STANDARD_FEE),
    ("Hepatitis B", STANDARD_FEE),
    ("Typhoid", STANDARD_FEE),
    ("Human papillomavirus", STANDARD_FEE),
    ("Japanese encephalitis", STANDARD_FEE),
    ("Meningococcal ACWY", STANDARD_FEE),
    ("Meningococcal B", STANDARD_FEE),
    ("Meningococcal C", STANDARD_FEE),
    ("Mpox (Monkeypox)", STANDARD_FEE),
    ("Poliomyelitis", STANDARD_FEE),
    ("Varicella", STANDARD_FEE),
    ("Rabies", STANDARD_FEE),
];

/// A single billable vaccine and the fee charged per administration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaccinePrice {
    pub name: String,
    pub unit_price: Decimal,
}

/// User-supplied replacement fees keyed by vaccine name. Lives only as long as the session.
pub type PriceOverrides = HashMap<String, Decimal>;

/// Ordered vaccine fee table. Names are unique; order is the display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceCatalog {
    entries: Vec<VaccinePrice>,
}

impl PriceCatalog {
    pub fn iter(&self) -> impl Iterator<Item = &VaccinePrice> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&VaccinePrice> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Looks up the fee for `name`, failing for anything outside the table.
    pub fn price_of(&self, name: &str) -> EstimateResult<Decimal> {
        self.get(name)
            .map(|entry| entry.unit_price)
            .ok_or_else(|| EstimateError::UnknownVaccine(name.to_string()))
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        get_default_prices()
    }
}

pub fn get_default_prices() -> PriceCatalog {
    PriceCatalog {
        entries: DEFAULT_PRICES
            .iter()
            .map(|(name, price)| VaccinePrice {
                name: (*name).to_string(),
                unit_price: *price,
            })
            .collect(),
    }
}

/// Returns a copy of `defaults` with each overridden fee replaced.
///
/// Negative fees and names missing from the table are rejected rather than clamped or
/// ignored, so the estimator never sees a price the user did not intend.
pub fn apply_overrides(
    defaults: &PriceCatalog,
    overrides: &PriceOverrides,
) -> EstimateResult<PriceCatalog> {
    for (name, price) in overrides {
        if !defaults.contains(name) {
            return Err(EstimateError::UnknownVaccine(name.clone()));
        }
        if *price < Decimal::ZERO {
            return Err(EstimateError::negative(format!("price for {name}")));
        }
    }

    let entries = defaults
        .iter()
        .map(|entry| VaccinePrice {
            name: entry.name.clone(),
            unit_price: overrides
                .get(&entry.name)
                .copied()
                .unwrap_or(entry.unit_price),
        })
        .collect();

    Ok(PriceCatalog { entries })
}
