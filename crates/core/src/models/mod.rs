pub mod analytics;
pub mod budget;
pub mod category;
pub mod currency;
pub mod expense;
pub mod ledger;
pub mod project;
pub mod settings;
