pub mod aggregation_service;
pub mod budget_service;
pub mod currency_service;
pub mod expense_service;
pub mod export_service;
pub mod project_service;
