//! Product Catalogue
//!
//! Licence editions offered for purchase and the countries accepted on the
//! billing address.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Licence editions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[default]
    #[serde(rename = "golden-edition-subscription")]
    GoldenEdition,
    #[serde(rename = "ultimate-edition-subscription")]
    UltimateEdition,
}

impl Product {
    /// Every edition, in display order
    pub const ALL: [Self; 2] = [Self::GoldenEdition, Self::UltimateEdition];

    /// Product type sent to the payment service
    pub const fn product_type(self) -> &'static str {
        match self {
            Self::GoldenEdition => "golden-edition-subscription",
            Self::UltimateEdition => "ultimate-edition-subscription",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::GoldenEdition => "Golden Edition",
            Self::UltimateEdition => "Ultimate Edition",
        }
    }

    /// Price of one licence in USD
    pub fn unit_price(self) -> Decimal {
        match self {
            Self::GoldenEdition => dec!(49),
            Self::UltimateEdition => dec!(99),
        }
    }

    /// Price for `licenses` seats
    pub fn total(self, licenses: u32) -> Decimal {
        self.unit_price() * Decimal::from(licenses)
    }

    /// Display label for a plan id returned by the payment service.
    ///
    /// Unknown plan ids are shown as-is.
    pub fn label_for(plan: &str) -> String {
        plan.parse::<Self>()
            .map_or_else(|_| plan.to_string(), |p| p.name().to_string())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.product_type())
    }
}

impl FromStr for Product {
    type Err = UnknownProduct;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.product_type() == s)
            .ok_or_else(|| UnknownProduct(s.to_string()))
    }
}

/// Returned when a product type string matches no edition
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown product type: {0}")]
pub struct UnknownProduct(pub String);

/// A country selectable on the billing address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country {
        code: "US",
        name: "United States",
    },
    Country {
        code: "CA",
        name: "Canada",
    },
    Country {
        code: "IN",
        name: "India",
    },
];

/// Look up a country by its ISO code
pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}
