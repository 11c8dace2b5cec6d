pub mod breakdown_table;
pub mod kpi_card;
pub mod price_sidebar;
pub mod toast;
