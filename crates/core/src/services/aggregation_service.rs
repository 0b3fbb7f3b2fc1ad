use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::analytics::{AggregateSummary, CategoryTotal, MonthlyPoint, WeeklyPoint};
use crate::models::category::ExpenseCategory;
use crate::models::currency::Currency;
use crate::models::expense::Expense;

/// Number of weeks shown in the weekly comparison chart.
pub const DEFAULT_WEEK_WINDOW: usize = 8;

/// Number of months shown in the spending trend chart.
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Reduces expense lists into totals and chart series.
///
/// **Invariant**: every expense handed to this service is denominated in the
/// same currency (the ledger currency). Sums never mix currencies; callers
/// convert the results, not the inputs.
///
/// Pure business logic, recomputed from the full input on every call.
/// Empty input yields zero/empty results, never an error.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of all amounts; 0 for no expenses.
    pub fn total<'a, I>(&self, expenses: I) -> f64
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        expenses.into_iter().map(|e| e.amount).sum()
    }

    /// Category → sum. Categories without expenses are absent (not 0).
    pub fn by_category<'a, I>(&self, expenses: I) -> HashMap<ExpenseCategory, f64>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut sums = HashMap::new();
        for expense in expenses {
            *sums.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        sums
    }

    /// Categories ranked by descending sum, at most `limit` entries.
    /// Equal sums keep the order in which the categories were first seen.
    pub fn top_categories<'a, I>(&self, expenses: I, limit: usize) -> Vec<CategoryTotal>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        // Buckets in first-encounter order
        let mut buckets: Vec<(ExpenseCategory, f64)> = Vec::new();
        for expense in expenses {
            match buckets.iter_mut().find(|(c, _)| *c == expense.category) {
                Some((_, sum)) => *sum += expense.amount,
                None => buckets.push((expense.category, expense.amount)),
            }
        }

        let total: f64 = buckets.iter().map(|(_, sum)| sum).sum();

        // sort_by is stable, so ties stay in encounter order
        buckets.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        buckets.truncate(limit);

        buckets
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category,
                amount,
                share_pct: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
            })
            .collect()
    }

    /// "YYYY-MM" → sum, bucketed by expense date (not creation time).
    pub fn by_month<'a, I>(&self, expenses: I) -> BTreeMap<String, f64>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut sums = BTreeMap::new();
        for expense in expenses {
            *sums.entry(month_key(expense.date)).or_insert(0.0) += expense.amount;
        }
        sums
    }

    /// "YYYY-Www" → sum, using ISO week numbering.
    ///
    /// The ISO week-year disambiguates year boundaries: 2021-01-01 falls in
    /// week 53 of 2020 and is bucketed as "2020-W53".
    pub fn by_week<'a, I>(&self, expenses: I) -> BTreeMap<String, f64>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut sums = BTreeMap::new();
        for expense in expenses {
            *sums.entry(week_key(expense.date)).or_insert(0.0) += expense.amount;
        }
        sums
    }

    /// The most recent `window` weeks that have expenses, oldest first.
    pub fn weekly_series<'a, I>(&self, expenses: I, window: usize) -> Vec<WeeklyPoint>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let weeks = self.by_week(expenses);
        let skip = weeks.len().saturating_sub(window);

        weeks
            .into_iter()
            .skip(skip)
            .map(|(week, amount)| WeeklyPoint {
                label: week_label(&week),
                week,
                amount,
            })
            .collect()
    }

    /// Spending for the trailing `month_count` calendar months ending with
    /// the month of `today` (inclusive), oldest first.
    ///
    /// Always returns exactly `month_count` points; months without expenses
    /// are zero-filled so charts get a continuous axis.
    pub fn monthly_trend<'a, I>(
        &self,
        expenses: I,
        month_count: usize,
        today: NaiveDate,
    ) -> Vec<MonthlyPoint>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let sums = self.by_month(expenses);

        (0..month_count)
            .rev()
            .map(|back| {
                let (year, month) = shift_month(today.year(), today.month(), back as i64);
                let key = format!("{year:04}-{month:02}");
                let label = NaiveDate::from_ymd_opt(year, month, 1)
                    .map(|d| d.format("%b %Y").to_string())
                    .unwrap_or_else(|| key.clone());
                MonthlyPoint {
                    amount: sums.get(&key).copied().unwrap_or(0.0),
                    month: key,
                    label,
                }
            })
            .collect()
    }

    /// Compute every aggregate in one go.
    pub fn summarize<'a, I>(&self, expenses: I, currency: Currency) -> AggregateSummary
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let expenses: Vec<&Expense> = expenses.into_iter().collect();

        let total_amount = self.total(expenses.iter().copied());
        let transaction_count = expenses.len();
        let average_amount = if transaction_count > 0 {
            total_amount / transaction_count as f64
        } else {
            0.0
        };

        let summary = AggregateSummary {
            currency,
            total_amount,
            transaction_count,
            average_amount,
            amount_by_category: self.by_category(expenses.iter().copied()),
            amount_by_month: self.by_month(expenses.iter().copied()),
            amount_by_week: self.by_week(expenses.iter().copied()),
        };

        debug!(
            count = summary.transaction_count,
            total = summary.total_amount,
            categories = summary.amount_by_category.len(),
            "Summarized expenses"
        );
        summary
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// "YYYY-MM" bucket key for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// "YYYY-Www" ISO week bucket key for a date.
pub fn week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// "2025-W03" → "W03 2025"
fn week_label(key: &str) -> String {
    match key.split_once('-') {
        Some((year, week)) => format!("{week} {year}"),
        None => key.to_string(),
    }
}

/// Step `back` months before (year, month). Month is 1-based.
fn shift_month(year: i32, month: u32, back: i64) -> (i32, u32) {
    let index = year as i64 * 12 + (month as i64 - 1) - back;
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}
