pub mod calculator;

pub use calculator::CalculatorPage;
