//! Form Validation
//!
//! Declarative rule table keyed by field path. Each path owns an independent
//! error slot; the first failing rule for a path fills it.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use validator::ValidateEmail;

use crate::product::country;

/// Path of a field in the purchase form (`address.city`, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    BillingEmail,
    AdminEmail,
    CompanyName,
    NoOfLicenses,
    AddressLine1,
    AddressLine2,
    City,
    State,
    Country,
    PostalCode,
}

impl FieldPath {
    pub const ALL: [Self; 10] = [
        Self::BillingEmail,
        Self::AdminEmail,
        Self::CompanyName,
        Self::NoOfLicenses,
        Self::AddressLine1,
        Self::AddressLine2,
        Self::City,
        Self::State,
        Self::Country,
        Self::PostalCode,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BillingEmail => "billingEmail",
            Self::AdminEmail => "adminEmail",
            Self::CompanyName => "companyName",
            Self::NoOfLicenses => "noOfLicenses",
            Self::AddressLine1 => "address.addressLine1",
            Self::AddressLine2 => "address.addressLine2",
            Self::City => "address.city",
            Self::State => "address.state",
            Self::Country => "address.country",
            Self::PostalCode => "address.postalCode",
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown field path: {s}"))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single validation rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Non-blank value
    Required,
    /// Email format; blank values pass (pair with `Required`)
    Email,
    /// Licence count: a whole number from 1 up to `u32::MAX`
    LicenseCount,
    /// ISO code from the country list; blank values pass
    KnownCountry,
}

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_NOT_INTEGER: &str = "Must be a whole number";
pub const MSG_MIN_LICENSES: &str = "Must be at least 1";
pub const MSG_TOO_MANY_LICENSES: &str = "Number is too large";
pub const MSG_UNKNOWN_COUNTRY: &str = "Select a country";

impl Rule {
    /// Check a raw field value, returning the error message on failure
    pub fn check(self, value: &str) -> Option<&'static str> {
        let trimmed = value.trim();
        match self {
            Self::Required => trimmed.is_empty().then_some(MSG_REQUIRED),
            Self::Email => {
                (!trimmed.is_empty() && !trimmed.validate_email()).then_some(MSG_INVALID_EMAIL)
            }
            Self::LicenseCount => match license_count(trimmed) {
                Ok(n) if n >= 1 => None,
                Ok(_) => Some(MSG_MIN_LICENSES),
                Err(e) => match e.kind() {
                    IntErrorKind::Empty => Some(MSG_REQUIRED),
                    IntErrorKind::PosOverflow => Some(MSG_TOO_MANY_LICENSES),
                    _ if is_negative_integer(trimmed) => Some(MSG_MIN_LICENSES),
                    _ => Some(MSG_NOT_INTEGER),
                },
            },
            Self::KnownCountry => {
                (!trimmed.is_empty() && country(trimmed).is_none()).then_some(MSG_UNKNOWN_COUNTRY)
            }
        }
    }
}

/// Parse a licence count as typed. Shared by the rule table and the order
/// builder so both agree on what a valid count is.
pub fn license_count(value: &str) -> Result<u32, ParseIntError> {
    value.trim().parse()
}

fn is_negative_integer(value: &str) -> bool {
    value
        .strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Rule table for the purchase form. `address.addressLine2` is optional and
/// carries no rules.
pub const RULES: &[(FieldPath, &[Rule])] = &[
    (FieldPath::BillingEmail, &[Rule::Required, Rule::Email]),
    (FieldPath::AdminEmail, &[Rule::Required, Rule::Email]),
    (FieldPath::CompanyName, &[Rule::Required]),
    (FieldPath::NoOfLicenses, &[Rule::LicenseCount]),
    (FieldPath::AddressLine1, &[Rule::Required]),
    (FieldPath::City, &[Rule::Required]),
    (FieldPath::State, &[Rule::Required]),
    (FieldPath::Country, &[Rule::Required, Rule::KnownCountry]),
    (FieldPath::PostalCode, &[Rule::Required]),
];

/// Field path -> human-readable error message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FieldPath, &'static str>);

impl FormErrors {
    pub fn get(&self, path: FieldPath) -> Option<&'static str> {
        self.0.get(&path).copied()
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &'static str)> + '_ {
        self.0.iter().map(|(p, m)| (*p, *m))
    }

    pub(crate) fn insert(&mut self, path: FieldPath, message: &'static str) {
        self.0.entry(path).or_insert(message);
    }
}

/// Run the rule table against a field lookup
pub fn validate<'a>(value_of: impl Fn(FieldPath) -> &'a str) -> FormErrors {
    let mut errors = FormErrors::default();
    for (path, rules) in RULES {
        let value = value_of(*path);
        if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
            errors.insert(*path, message);
        }
    }
    errors
}
