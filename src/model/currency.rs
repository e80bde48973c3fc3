use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency the overage fee is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Cad,
    Eur,
    Gbp,
    Cny,
}

static ALL_CURRENCIES: &[Currency] = &[
    Currency::Usd,
    Currency::Cad,
    Currency::Eur,
    Currency::Gbp,
    Currency::Cny,
];

impl Currency {
    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cny => "CNY",
        }
    }

    /// Returns all supported currencies in picker order.
    pub fn all() -> &'static [Currency] {
        ALL_CURRENCIES
    }

    /// Returns the next currency in picker order, wrapping around.
    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    /// Returns the previous currency in picker order, wrapping around.
    pub fn prev(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

#[mutants::skip]
impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
