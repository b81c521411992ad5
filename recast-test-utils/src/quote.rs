// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// A market-data quote: the kind of value a shared, expensive upstream feed
/// typically produces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quote {
    pub symbol: String,
    pub bid: i64,
}

impl Quote {
    #[must_use]
    pub fn new(symbol: impl Into<String>, bid: i64) -> Self {
        Self {
            symbol: symbol.into(),
            bid,
        }
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote[symbol={}, bid={}]", self.symbol, self.bid)
    }
}

#[must_use]
pub fn quote_acme() -> Quote {
    Quote::new("ACME", 101)
}

#[must_use]
pub fn quote_initech() -> Quote {
    Quote::new("INTC", 88)
}

#[must_use]
pub fn quote_hooli() -> Quote {
    Quote::new("HOOL", 250)
}

#[must_use]
pub fn quote_umbrella() -> Quote {
    Quote::new("UMBR", 64)
}
