//! Purchase Form State
//!
//! Holds the raw field values of the licence purchase form, keeps the admin
//! email in step with the billing email while "same as billing" is ticked,
//! and turns a valid form into an [`OrderRequest`].
//!
//! Validation only runs when the form is submitted; editing a field leaves
//! the previous error map untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::OrderRequest;
use crate::product::Product;
use crate::validation::{self, FieldPath, FormErrors, MSG_NOT_INTEGER};

/// Billing address
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// Raw values as typed by the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseForm {
    pub billing_email: String,
    pub admin_email: String,
    pub company_name: String,
    /// Kept as text so a half-typed value can be shown back unchanged
    pub no_of_licenses: String,
    pub product: Product,
    pub address: Address,
}

impl PurchaseForm {
    pub fn new(product: Product) -> Self {
        Self {
            billing_email: String::new(),
            admin_email: String::new(),
            company_name: String::new(),
            no_of_licenses: "1".into(),
            product,
            address: Address::default(),
        }
    }

    /// Current value at `path`
    pub fn value(&self, path: FieldPath) -> &str {
        match path {
            FieldPath::BillingEmail => &self.billing_email,
            FieldPath::AdminEmail => &self.admin_email,
            FieldPath::CompanyName => &self.company_name,
            FieldPath::NoOfLicenses => &self.no_of_licenses,
            FieldPath::AddressLine1 => &self.address.address_line1,
            FieldPath::AddressLine2 => &self.address.address_line2,
            FieldPath::City => &self.address.city,
            FieldPath::State => &self.address.state,
            FieldPath::Country => &self.address.country,
            FieldPath::PostalCode => &self.address.postal_code,
        }
    }

    fn slot(&mut self, path: FieldPath) -> &mut String {
        match path {
            FieldPath::BillingEmail => &mut self.billing_email,
            FieldPath::AdminEmail => &mut self.admin_email,
            FieldPath::CompanyName => &mut self.company_name,
            FieldPath::NoOfLicenses => &mut self.no_of_licenses,
            FieldPath::AddressLine1 => &mut self.address.address_line1,
            FieldPath::AddressLine2 => &mut self.address.address_line2,
            FieldPath::City => &mut self.address.city,
            FieldPath::State => &mut self.address.state,
            FieldPath::Country => &mut self.address.country,
            FieldPath::PostalCode => &mut self.address.postal_code,
        }
    }

    /// Licence count, if the typed value is a positive whole number
    pub fn licenses(&self) -> Option<u32> {
        validation::license_count(&self.no_of_licenses)
            .ok()
            .filter(|n| *n >= 1)
    }
}

impl Default for PurchaseForm {
    fn default() -> Self {
        Self::new(Product::default())
    }
}

/// Form controller: values, "same as billing" flag and last error map
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    values: PurchaseForm,
    same_as_billing: bool,
    errors: FormErrors,
}

impl FormState {
    pub fn new(product: Product) -> Self {
        Self {
            values: PurchaseForm::new(product),
            ..Default::default()
        }
    }

    pub const fn values(&self) -> &PurchaseForm {
        &self.values
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, path: FieldPath) -> Option<&'static str> {
        self.errors.get(path)
    }

    pub const fn same_as_billing(&self) -> bool {
        self.same_as_billing
    }

    /// The checkbox can only be ticked once a billing email is present
    pub fn can_toggle_same_as_billing(&self) -> bool {
        self.same_as_billing || !self.values.billing_email.trim().is_empty()
    }

    /// Whether the admin email input accepts edits
    pub const fn admin_email_editable(&self) -> bool {
        !self.same_as_billing
    }

    /// Apply a single field edit.
    ///
    /// Returns `false` when the edit was ignored (admin email while mirrored).
    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) -> bool {
        match path {
            FieldPath::BillingEmail => {
                self.set_billing_email(value);
                true
            }
            FieldPath::AdminEmail if self.same_as_billing => false,
            _ => {
                *self.values.slot(path) = value.into();
                true
            }
        }
    }

    pub fn set_billing_email(&mut self, value: impl Into<String>) {
        self.values.billing_email = value.into();
        if self.same_as_billing {
            self.values.admin_email.clone_from(&self.values.billing_email);
        }
    }

    pub fn set_product(&mut self, product: Product) {
        self.values.product = product;
    }

    /// Flip "same as billing". Ticking copies the billing email into the
    /// admin email, unticking clears it.
    ///
    /// Returns the new flag value.
    pub fn toggle_same_as_billing(&mut self) -> bool {
        if !self.can_toggle_same_as_billing() {
            return self.same_as_billing;
        }
        self.same_as_billing = !self.same_as_billing;
        if self.same_as_billing {
            self.values.admin_email.clone_from(&self.values.billing_email);
        } else {
            self.values.admin_email.clear();
        }
        self.same_as_billing
    }

    /// Admin email sent with the order
    pub fn resolved_admin_email(&self) -> &str {
        if self.same_as_billing || self.values.admin_email.trim().is_empty() {
            self.values.billing_email.trim()
        } else {
            self.values.admin_email.trim()
        }
    }

    /// Total price, `None` while the licence count is not a valid number
    pub fn total(&self) -> Option<Decimal> {
        self.values.licenses().map(|n| self.values.product.total(n))
    }

    /// Run the rule table and replace the error map
    pub fn validate(&mut self) -> &FormErrors {
        self.errors = validation::validate(|path| self.values.value(path));
        &self.errors
    }

    /// Validate and build the order request
    pub fn submit(&mut self) -> Result<OrderRequest, FormErrors> {
        if !self.validate().is_empty() {
            tracing::debug!(errors = self.errors.len(), "Purchase form rejected");
            return Err(self.errors.clone());
        }

        // The rule table accepts exactly what `licenses()` parses; keep the
        // slot filled should the two ever drift.
        let Some(licenses) = self.values.licenses() else {
            self.errors.insert(FieldPath::NoOfLicenses, MSG_NOT_INTEGER);
            return Err(self.errors.clone());
        };

        let address = &self.values.address;
        Ok(OrderRequest {
            billing_email: self.values.billing_email.trim().to_string(),
            admin_email: self.resolved_admin_email().to_string(),
            no_of_licenses: licenses,
            company_name: self.values.company_name.trim().to_string(),
            product: self.values.product,
            address: Address {
                address_line1: address.address_line1.trim().to_string(),
                address_line2: address.address_line2.trim().to_string(),
                city: address.city.trim().to_string(),
                state: address.state.trim().to_string(),
                country: address.country.trim().to_string(),
                postal_code: address.postal_code.trim().to_string(),
            },
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::validation::{MSG_INVALID_EMAIL, MSG_REQUIRED, MSG_TOO_MANY_LICENSES};
    use rust_decimal_macros::dec;

    pub(crate) fn filled_form() -> FormState {
        let mut form = FormState::new(Product::GoldenEdition);
        form.set_field(FieldPath::BillingEmail, "billing@acme.io");
        form.set_field(FieldPath::AdminEmail, "admin@acme.io");
        form.set_field(FieldPath::CompanyName, "Acme");
        form.set_field(FieldPath::NoOfLicenses, "3");
        form.set_field(FieldPath::AddressLine1, "1 Main St");
        form.set_field(FieldPath::City, "Springfield");
        form.set_field(FieldPath::State, "IL");
        form.set_field(FieldPath::Country, "US");
        form.set_field(FieldPath::PostalCode, "62701");
        form
    }

    #[test]
    fn test_defaults() {
        let form = FormState::new(Product::UltimateEdition);
        assert_eq!(form.values().no_of_licenses, "1");
        assert_eq!(form.values().product, Product::UltimateEdition);
        assert!(!form.same_as_billing());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_toggle_copies_then_clears() {
        let mut form = FormState::default();
        form.set_billing_email("a@acme.io");

        assert!(form.toggle_same_as_billing());
        assert_eq!(form.values().admin_email, "a@acme.io");

        assert!(!form.toggle_same_as_billing());
        assert_eq!(form.values().admin_email, "");
    }

    #[test]
    fn test_billing_edits_follow_while_flag_on() {
        let mut form = FormState::default();
        form.set_billing_email("a@acme.io");
        form.toggle_same_as_billing();

        form.set_field(FieldPath::BillingEmail, "b@acme.io");
        assert_eq!(form.values().admin_email, "b@acme.io");

        form.toggle_same_as_billing();
        form.set_field(FieldPath::BillingEmail, "c@acme.io");
        assert_eq!(form.values().admin_email, "");
    }

    #[test]
    fn test_toggle_refused_without_billing_email() {
        let mut form = FormState::default();
        assert!(!form.can_toggle_same_as_billing());
        assert!(!form.toggle_same_as_billing());
        assert!(!form.same_as_billing());
    }

    #[test]
    fn test_toggle_refused_with_blank_billing_email() {
        let mut form = FormState::default();
        form.set_billing_email("   ");
        assert!(!form.can_toggle_same_as_billing());
        assert!(!form.toggle_same_as_billing());
        assert_eq!(form.values().admin_email, "");
    }

    #[test]
    fn test_admin_email_locked_while_mirrored() {
        let mut form = FormState::default();
        form.set_billing_email("a@acme.io");
        form.toggle_same_as_billing();
        assert!(!form.set_field(FieldPath::AdminEmail, "other@acme.io"));
        assert_eq!(form.values().admin_email, "a@acme.io");
    }

    #[test]
    fn test_edits_do_not_revalidate() {
        let mut form = FormState::default();
        form.validate();
        assert_eq!(form.error(FieldPath::CompanyName), Some(MSG_REQUIRED));

        form.set_field(FieldPath::CompanyName, "Acme");
        assert_eq!(form.error(FieldPath::CompanyName), Some(MSG_REQUIRED));

        form.validate();
        assert_eq!(form.error(FieldPath::CompanyName), None);
    }

    #[test]
    fn test_total() {
        let form = filled_form();
        assert_eq!(form.total(), Some(dec!(147)));

        let mut form = filled_form();
        form.set_field(FieldPath::NoOfLicenses, "abc");
        assert_eq!(form.total(), None);
    }

    #[test]
    fn test_submit_builds_order_request() {
        let mut form = filled_form();
        form.set_field(FieldPath::AddressLine2, "Suite 4");
        let order = form.submit().unwrap();

        assert_eq!(order.billing_email, "billing@acme.io");
        assert_eq!(order.admin_email, "admin@acme.io");
        assert_eq!(order.no_of_licenses, 3);
        assert_eq!(order.product, Product::GoldenEdition);
        assert_eq!(order.address.address_line2, "Suite 4");
    }

    #[test]
    fn test_submit_uses_billing_email_when_mirrored() {
        let mut form = filled_form();
        form.toggle_same_as_billing();
        let order = form.submit().unwrap();
        assert_eq!(order.admin_email, "billing@acme.io");
    }

    #[test]
    fn test_submit_rejects_every_missing_required_field() {
        for path in [
            FieldPath::BillingEmail,
            FieldPath::AdminEmail,
            FieldPath::CompanyName,
            FieldPath::AddressLine1,
            FieldPath::City,
            FieldPath::State,
            FieldPath::Country,
            FieldPath::PostalCode,
        ] {
            let mut form = filled_form();
            form.set_field(path, "");
            let errors = form.submit().unwrap_err();
            assert_eq!(errors.get(path), Some(MSG_REQUIRED), "{path}");
            assert_eq!(errors.len(), 1, "{path}");
        }
    }

    #[test]
    fn test_submit_reports_oversized_license_count() {
        let mut form = filled_form();
        form.set_field(FieldPath::NoOfLicenses, "4294967296");

        let errors = form.submit().unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(errors.get(FieldPath::NoOfLicenses), Some(MSG_TOO_MANY_LICENSES));
        assert_eq!(form.error(FieldPath::NoOfLicenses), Some(MSG_TOO_MANY_LICENSES));
        assert_eq!(form.total(), None);
    }

    #[test]
    fn test_submit_rejects_bad_email() {
        let mut form = filled_form();
        form.set_field(FieldPath::AdminEmail, "admin-at-acme");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get(FieldPath::AdminEmail), Some(MSG_INVALID_EMAIL));
    }
}
