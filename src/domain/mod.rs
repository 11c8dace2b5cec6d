//! Pricing, estimation and summary logic for the earnings calculator.

pub mod catalog;
pub mod error;
pub mod estimator;
pub mod session;
pub mod summary;

pub use session::{Calculation, SessionState, NO_COADMIN};
pub use summary::{
    format_break_even, format_breakdown, format_currency, format_email, BreakdownRow, DisplayValue,
};
