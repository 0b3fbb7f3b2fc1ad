use chrono::{NaiveDate, NaiveTime};
use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::budget::{BudgetClassification, BudgetStatus};
use expense_tracker_core::models::category::{ExpenseCategory, CATEGORY_INFO};
use expense_tracker_core::models::currency::{Currency, ExchangeRates, CURRENCIES};
use expense_tracker_core::models::expense::{Expense, ExpenseUpdate, NewExpense};
use expense_tracker_core::models::ledger::Ledger;
use expense_tracker_core::models::settings::Settings;
use std::collections::HashMap;
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  ExpenseCategory
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn info_table_matches_declaration_order() {
        for (i, category) in ExpenseCategory::ALL.iter().enumerate() {
            assert_eq!(CATEGORY_INFO[i].category, *category);
            assert_eq!(category.info().category, *category);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(ExpenseCategory::Food.label(), "Food & Dining");
        assert_eq!(ExpenseCategory::Transportation.label(), "Transportation");
        assert_eq!(ExpenseCategory::Other.label(), "Other");
    }

    #[test]
    fn display_is_lowercase_id() {
        assert_eq!(ExpenseCategory::Healthcare.to_string(), "healthcare");
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("FOOD".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Food);
        assert_eq!(" utilities ".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Utilities);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "groceries".parse::<ExpenseCategory>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory(s) if s == "groceries"));
    }

    #[test]
    fn lenient_lookup_falls_back_to_other() {
        assert_eq!(ExpenseCategory::from_str_or_other("groceries"), ExpenseCategory::Other);
        assert_eq!(ExpenseCategory::from_str_or_other("shopping"), ExpenseCategory::Shopping);
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&ExpenseCategory::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let back: ExpenseCategory = serde_json::from_str("\"education\"").unwrap();
        assert_eq!(back, ExpenseCategory::Education);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Currency & ExchangeRates
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    #[test]
    fn info_table_matches_declaration_order() {
        for (i, currency) in Currency::ALL.iter().enumerate() {
            assert_eq!(CURRENCIES[i].code, *currency);
        }
    }

    #[test]
    fn parse_codes() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("krw".parse::<Currency>().unwrap(), Currency::Krw);
    }

    #[test]
    fn parse_unknown_code_fails() {
        let err = "PLN".parse::<Currency>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCurrency(s) if s == "PLN"));
    }

    #[test]
    fn display_and_serde_use_iso_code() {
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(serde_json::to_string(&Currency::Jpy).unwrap(), "\"JPY\"");
        let back: Currency = serde_json::from_str("\"NZD\"").unwrap();
        assert_eq!(back, Currency::Nzd);
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(Currency::Jpy.info().minor_units, 0);
        assert_eq!(Currency::Krw.info().minor_units, 0);
        assert_eq!(Currency::Usd.info().minor_units, 2);
    }

    #[test]
    fn metadata() {
        let info = Currency::Inr.info();
        assert_eq!(info.symbol, "₹");
        assert_eq!(info.name, "Indian Rupee");
        assert_eq!(info.locale, "en-IN");
    }

    #[test]
    fn default_rates_anchor_on_usd() {
        let rates = ExchangeRates::default();
        assert_eq!(rates.reference(), Currency::Usd);
        assert_eq!(rates.get(Currency::Usd).unwrap(), 1.0);
        assert_eq!(rates.get(Currency::Eur).unwrap(), 0.92);
        assert_eq!(rates.get(Currency::Krw).unwrap(), 1320.50);
    }

    #[test]
    fn default_rates_cover_every_currency() {
        let rates = ExchangeRates::default();
        assert_eq!(rates.currencies(), Currency::ALL.to_vec());
    }

    #[test]
    fn custom_table_accepted() {
        let rates = ExchangeRates::new(
            Currency::Eur,
            HashMap::from([(Currency::Eur, 1.0), (Currency::Usd, 1.1)]),
        )
        .unwrap();
        assert_eq!(rates.reference(), Currency::Eur);
        assert!(rates.contains(Currency::Usd));
        assert!(!rates.contains(Currency::Gbp));
    }

    #[test]
    fn missing_currency_lookup_fails() {
        let rates =
            ExchangeRates::new(Currency::Usd, HashMap::from([(Currency::Usd, 1.0)])).unwrap();
        assert!(matches!(rates.get(Currency::Eur), Err(CoreError::UnknownCurrency(_))));
    }

    #[test]
    fn reference_rate_must_be_one() {
        let result = ExchangeRates::new(
            Currency::Usd,
            HashMap::from([(Currency::Usd, 1.2), (Currency::Eur, 0.9)]),
        );
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn reference_rate_must_be_present() {
        let result = ExchangeRates::new(Currency::Usd, HashMap::from([(Currency::Eur, 0.9)]));
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn rates_must_be_positive() {
        let result = ExchangeRates::new(
            Currency::Usd,
            HashMap::from([(Currency::Usd, 1.0), (Currency::Eur, 0.0)]),
        );
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));

        let result = ExchangeRates::new(
            Currency::Usd,
            HashMap::from([(Currency::Usd, 1.0), (Currency::Eur, f64::NAN)]),
        );
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Expense
// ═══════════════════════════════════════════════════════════════════

mod expense {
    use super::*;

    #[test]
    fn new_trims_description_and_assigns_id() {
        let project = Uuid::new_v4();
        let input = NewExpense::new(d(2025, 1, 15), ExpenseCategory::Food, 12.5)
            .with_description("  lunch  ");
        let a = Expense::new(project, input.clone());
        let b = Expense::new(project, input);

        assert_eq!(a.description, "lunch");
        assert_eq!(a.project_id, project);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let original = Expense::new(
            Uuid::new_v4(),
            NewExpense::new(d(2025, 1, 15), ExpenseCategory::Food, 12.5).with_description("lunch"),
        );
        let update = ExpenseUpdate {
            amount: Some(20.0),
            ..Default::default()
        };
        let updated = update.apply_to(&original);

        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.description, "lunch");
    }

    #[test]
    fn empty_update() {
        assert!(ExpenseUpdate::default().is_empty());
        let update = ExpenseUpdate {
            category: Some(ExpenseCategory::Other),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn serde_roundtrip_json() {
        let expense = Expense::new(
            Uuid::new_v4(),
            NewExpense::new(d(2024, 12, 31), ExpenseCategory::Shopping, 99.99),
        );
        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Budget status
// ═══════════════════════════════════════════════════════════════════

mod budget {
    use super::*;

    fn status(spent: f64, limit: f64, classification: BudgetClassification) -> BudgetStatus {
        BudgetStatus {
            category: ExpenseCategory::Food,
            spent,
            limit,
            percentage_used: spent / limit * 100.0,
            progress_pct: (spent / limit * 100.0).min(100.0),
            remaining: limit - spent,
            classification,
        }
    }

    #[test]
    fn overspend() {
        let s = status(130.0, 100.0, BudgetClassification::Exceeded);
        assert!(s.is_over_budget());
        assert_eq!(s.overspend(), 30.0);

        let s = status(50.0, 100.0, BudgetClassification::Ok);
        assert!(!s.is_over_budget());
        assert_eq!(s.overspend(), 0.0);
    }

    #[test]
    fn classification_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BudgetClassification::Approaching).unwrap(),
            "\"approaching\""
        );
        assert_eq!(BudgetClassification::Exceeded.to_string(), "exceeded");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings & Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.ledger_currency, Currency::Usd);
        assert_eq!(settings.preferred_currency, Currency::Usd);
        assert_eq!(settings.monthly_budget, None);
        assert!(!settings.daily_reminder_enabled);
        assert_eq!(settings.daily_reminder_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn settings_missing_optional_fields_use_defaults() {
        let json = r#"{"ledger_currency":"USD","preferred_currency":"EUR"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.preferred_currency, Currency::Eur);
        assert!(!settings.daily_reminder_enabled);
        assert_eq!(settings.daily_reminder_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn default_ledger_has_one_project() {
        let ledger = Ledger::default();
        assert_eq!(ledger.projects.len(), 1);
        assert_eq!(ledger.projects[0].name, "Personal");
        assert!(ledger.expenses.is_empty());
        assert!(ledger.budgets.is_empty());
    }

    #[test]
    fn scoped_iterators() {
        let mut ledger = Ledger::default();
        let home = ledger.projects[0].id;
        let other = Uuid::new_v4();
        let input = NewExpense::new(d(2025, 1, 1), ExpenseCategory::Food, 1.0);
        ledger.expenses.push(Expense::new(home, input.clone()));
        ledger.expenses.push(Expense::new(other, input));

        assert_eq!(ledger.expenses_for(home).count(), 1);
        assert_eq!(ledger.expenses_for(other).count(), 1);
        assert!(ledger.project(other).is_none());
    }
}
