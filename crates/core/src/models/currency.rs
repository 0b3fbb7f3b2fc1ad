use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// Supported currencies (ISO 4217 codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
    Sgd,
    Hkd,
    Krw,
    Mxn,
    Brl,
    Zar,
    Sek,
    Nok,
    Dkk,
    Nzd,
    Aed,
}

/// How digits of the integer part are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567 (lakh / crore)
    Indian,
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Prefix,
    /// `R$ 1,00`
    PrefixSpaced,
    /// `1,00 €`
    SuffixSpaced,
}

/// Number formatting conventions of a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    pub grouping: Grouping,
    pub symbol_position: SymbolPosition,
}

impl LocaleFormat {
    const fn new(
        group_separator: &'static str,
        decimal_separator: &'static str,
        grouping: Grouping,
        symbol_position: SymbolPosition,
    ) -> Self {
        Self {
            group_separator,
            decimal_separator,
            grouping,
            symbol_position,
        }
    }
}

const EN: LocaleFormat = LocaleFormat::new(",", ".", Grouping::Thousands, SymbolPosition::Prefix);
const EN_IN: LocaleFormat = LocaleFormat::new(",", ".", Grouping::Indian, SymbolPosition::Prefix);
const DE: LocaleFormat =
    LocaleFormat::new(".", ",", Grouping::Thousands, SymbolPosition::SuffixSpaced);
const DE_CH: LocaleFormat =
    LocaleFormat::new("’", ".", Grouping::Thousands, SymbolPosition::PrefixSpaced);
const PT_BR: LocaleFormat =
    LocaleFormat::new(".", ",", Grouping::Thousands, SymbolPosition::PrefixSpaced);
const EN_ZA: LocaleFormat =
    LocaleFormat::new(" ", ",", Grouping::Thousands, SymbolPosition::PrefixSpaced);
const NORDIC: LocaleFormat =
    LocaleFormat::new(" ", ",", Grouping::Thousands, SymbolPosition::SuffixSpaced);
const AR_AE: LocaleFormat =
    LocaleFormat::new(",", ".", Grouping::Thousands, SymbolPosition::PrefixSpaced);

/// Static reference data for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: Currency,
    pub symbol: &'static str,
    pub name: &'static str,
    /// BCP 47 locale tag used for display
    pub locale: &'static str,
    pub format: LocaleFormat,
    /// Number of fractional digits shown (0 for currencies without minor units)
    pub minor_units: u32,
}

const fn info(
    code: Currency,
    symbol: &'static str,
    name: &'static str,
    locale: &'static str,
    format: LocaleFormat,
    minor_units: u32,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        symbol,
        name,
        locale,
        format,
        minor_units,
    }
}

/// Lookup table for currency metadata, in declaration order of [`Currency`].
pub const CURRENCIES: [CurrencyInfo; 20] = [
    info(Currency::Usd, "$", "US Dollar", "en-US", EN, 2),
    info(Currency::Eur, "€", "Euro", "de-DE", DE, 2),
    info(Currency::Gbp, "£", "British Pound", "en-GB", EN, 2),
    info(Currency::Inr, "₹", "Indian Rupee", "en-IN", EN_IN, 2),
    info(Currency::Jpy, "¥", "Japanese Yen", "ja-JP", EN, 0),
    info(Currency::Cad, "C$", "Canadian Dollar", "en-CA", EN, 2),
    info(Currency::Aud, "A$", "Australian Dollar", "en-AU", EN, 2),
    info(Currency::Chf, "Fr", "Swiss Franc", "de-CH", DE_CH, 2),
    info(Currency::Cny, "¥", "Chinese Yuan", "zh-CN", EN, 2),
    info(Currency::Sgd, "S$", "Singapore Dollar", "en-SG", EN, 2),
    info(Currency::Hkd, "HK$", "Hong Kong Dollar", "zh-HK", EN, 2),
    info(Currency::Krw, "₩", "South Korean Won", "ko-KR", EN, 0),
    info(Currency::Mxn, "Mex$", "Mexican Peso", "es-MX", EN, 2),
    info(Currency::Brl, "R$", "Brazilian Real", "pt-BR", PT_BR, 2),
    info(Currency::Zar, "R", "South African Rand", "en-ZA", EN_ZA, 2),
    info(Currency::Sek, "kr", "Swedish Krona", "sv-SE", NORDIC, 2),
    info(Currency::Nok, "kr", "Norwegian Krone", "nb-NO", NORDIC, 2),
    info(Currency::Dkk, "kr", "Danish Krone", "da-DK", DE, 2),
    info(Currency::Nzd, "NZ$", "New Zealand Dollar", "en-NZ", EN, 2),
    info(Currency::Aed, "د.إ", "UAE Dirham", "ar-AE", AR_AE, 2),
];

impl Currency {
    pub const ALL: [Currency; 20] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Chf,
        Currency::Cny,
        Currency::Sgd,
        Currency::Hkd,
        Currency::Krw,
        Currency::Mxn,
        Currency::Brl,
        Currency::Zar,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
        Currency::Nzd,
        Currency::Aed,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Sgd => "SGD",
            Currency::Hkd => "HKD",
            Currency::Krw => "KRW",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Zar => "ZAR",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Nzd => "NZD",
            Currency::Aed => "AED",
        }
    }

    pub fn info(&self) -> &'static CurrencyInfo {
        &CURRENCIES[*self as usize]
    }

    pub fn symbol(&self) -> &'static str {
        self.info().symbol
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CoreError;

    /// Parse a currency code, case-insensitive ("usd", " EUR ").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CoreError::UnknownCurrency(s.to_string()))
    }
}

/// Fixed exchange-rate table.
///
/// Each rate says how many units of that currency equal one unit of the
/// reference currency. The reference currency's own rate is exactly 1.
/// Rates are static configuration, not live market data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    reference: Currency,
    rates: HashMap<Currency, f64>,
}

impl ExchangeRates {
    /// Build a validated rate table.
    ///
    /// Fails if the reference currency is missing or not exactly 1,
    /// or if any rate is non-finite or not positive.
    pub fn new(reference: Currency, rates: HashMap<Currency, f64>) -> Result<Self, CoreError> {
        match rates.get(&reference) {
            Some(r) if *r == 1.0 => {}
            Some(r) => {
                return Err(CoreError::InvalidConfig(format!(
                    "Reference currency {reference} must have rate 1, got {r}"
                )))
            }
            None => {
                return Err(CoreError::InvalidConfig(format!(
                    "Reference currency {reference} missing from rate table"
                )))
            }
        }

        if let Some((currency, rate)) = rates.iter().find(|(_, r)| !r.is_finite() || **r <= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "Exchange rate for {currency} must be a positive number, got {rate}"
            )));
        }

        Ok(Self { reference, rates })
    }

    /// The currency all rates are expressed against.
    pub fn reference(&self) -> Currency {
        self.reference
    }

    /// Rate of `currency` relative to the reference currency.
    pub fn get(&self, currency: Currency) -> Result<f64, CoreError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| CoreError::UnknownCurrency(currency.code().to_string()))
    }

    pub fn contains(&self, currency: Currency) -> bool {
        self.rates.contains_key(&currency)
    }

    /// Currencies present in the table, in declaration order.
    pub fn currencies(&self) -> Vec<Currency> {
        Currency::ALL
            .iter()
            .copied()
            .filter(|c| self.rates.contains_key(c))
            .collect()
    }
}

impl Default for ExchangeRates {
    /// Built-in USD-anchored table.
    fn default() -> Self {
        let rates = HashMap::from([
            (Currency::Usd, 1.0),
            (Currency::Eur, 0.92),
            (Currency::Gbp, 0.79),
            (Currency::Inr, 83.12),
            (Currency::Jpy, 149.50),
            (Currency::Cad, 1.36),
            (Currency::Aud, 1.53),
            (Currency::Chf, 0.88),
            (Currency::Cny, 7.24),
            (Currency::Sgd, 1.34),
            (Currency::Hkd, 7.82),
            (Currency::Krw, 1320.50),
            (Currency::Mxn, 17.15),
            (Currency::Brl, 4.97),
            (Currency::Zar, 18.65),
            (Currency::Sek, 10.42),
            (Currency::Nok, 10.58),
            (Currency::Dkk, 6.87),
            (Currency::Nzd, 1.63),
            (Currency::Aed, 3.67),
        ]);
        Self { reference: Currency::Usd, rates }
    }
}
