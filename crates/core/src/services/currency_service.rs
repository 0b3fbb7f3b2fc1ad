use tracing::debug;

use crate::errors::CoreError;
use crate::models::currency::{Currency, ExchangeRates, Grouping, SymbolPosition};

/// Converts and formats money amounts using a fixed exchange-rate table.
///
/// Every conversion between two different currencies goes through the
/// table's reference currency: `amount / rate[from] * rate[to]`.
/// Because of the division, A → B → A is only approximately the original
/// amount. Rates are static, so this is accepted.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    rates: ExchangeRates,
}

impl CurrencyService {
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }

    /// Convert an amount from one currency to another.
    /// E.g., convert(100.0, USD, EUR) → 92.0 with the default table.
    ///
    /// Same-currency conversion returns the amount untouched.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> Result<f64, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Cannot convert non-finite amount {amount}"
            )));
        }
        if from == to {
            return Ok(amount);
        }

        let from_rate = self.rates.get(from)?;
        let to_rate = self.rates.get(to)?;
        let converted = amount / from_rate * to_rate;

        debug!(%from, %to, amount, converted, "Converted amount");
        Ok(converted)
    }

    /// How many units of `to` one unit of `from` buys.
    pub fn rate(&self, from: Currency, to: Currency) -> Result<f64, CoreError> {
        if from == to {
            return Ok(1.0);
        }
        Ok(self.rates.get(to)? / self.rates.get(from)?)
    }

    /// Format an amount with the currency's symbol and locale conventions.
    ///
    /// `format(1234.5, Usd)` → `"$1,234.50"`, `format(1234.5, Eur)` → `"1.234,50 €"`.
    pub fn format(&self, amount: f64, currency: Currency) -> String {
        format_with_digits(amount, currency, currency.info().minor_units)
    }

    /// Format without fractional digits (chart axis ticks).
    pub fn format_compact(&self, amount: f64, currency: Currency) -> String {
        format_with_digits(amount, currency, 0)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new(ExchangeRates::default())
    }
}

fn format_with_digits(amount: f64, currency: Currency, digits: u32) -> String {
    let info = currency.info();
    let locale = &info.format;

    let scale = 10u64.pow(digits);
    // f64::round rounds half away from zero
    let minor = (amount.abs() * scale as f64).round() as u64;
    let whole = minor / scale;
    let fraction = minor % scale;

    let mut number = group_digits(whole, locale.group_separator, locale.grouping);
    if digits > 0 {
        number.push_str(locale.decimal_separator);
        number.push_str(&format!("{:0width$}", fraction, width = digits as usize));
    }

    let sign = if amount < 0.0 && minor > 0 { "-" } else { "" };
    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{}{number}", info.symbol),
        SymbolPosition::PrefixSpaced => format!("{sign}{} {number}", info.symbol),
        SymbolPosition::SuffixSpaced => format!("{sign}{number} {}", info.symbol),
    }
}

fn group_digits(value: u64, separator: &str, grouping: Grouping) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_group = match grouping {
        Grouping::Thousands => 3,
        Grouping::Indian => 2,
    };

    // Walk the head from the right in groups of `head_group`
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(separator)
}
