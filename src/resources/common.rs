//! Payload building blocks shared by invoices and bills.

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, Validator};

/// A line item submitted when creating an invoice or a bill.
///
/// # Example
///
/// ```rust
/// use wafeq_api::resources::LineItem;
///
/// let item = LineItem {
///     tax_rate: Some("tax-rate-id".to_string()),
///     ..LineItem::new("account-id", "Consulting", 2.0, 150.0)
/// };
/// assert_eq!(item.quantity, 2.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LineItem {
    /// The account this line is booked against.
    pub account: String,

    /// The cost center for this line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,

    /// Description of the goods or service.
    pub description: String,

    /// Discount as a percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,

    /// The catalogue item, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    /// Quantity; must be positive.
    pub quantity: f64,

    /// The tax rate applied to this line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<String>,

    /// Price per unit; must not be negative.
    pub unit_amount: f64,
}

impl LineItem {
    /// Creates a line item with the required fields set.
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit_amount: f64,
    ) -> Self {
        Self {
            account: account.into(),
            description: description.into(),
            quantity,
            unit_amount,
            ..Self::default()
        }
    }
}

impl Validate for LineItem {
    fn check(&self, v: &mut Validator) {
        v.required("account", &self.account);
        v.required("description", &self.description);
        v.optional_non_negative("discount", self.discount);
        v.positive("quantity", self.quantity);
        v.non_negative("unit_amount", self.unit_amount);
    }
}

/// Customer details attached to an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Contact {
    /// Display name; required.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Tax registration number of the customer.
    #[serde(
        rename = "taxIdentificationNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_identification_number: Option<String>,
}

impl Validate for Contact {
    fn check(&self, v: &mut Validator) {
        v.required("name", &self.name);
        v.optional_email("email", self.email.as_deref());
    }
}

/// A credit note applied to an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreditNote {
    /// Amount applied; must not be negative.
    pub amount: f64,

    /// Identifier of the credit note.
    pub credit_note: String,
}

impl Validate for CreditNote {
    fn check(&self, v: &mut Validator) {
        v.non_negative("amount", self.amount);
        v.required("credit_note", &self.credit_note);
    }
}

/// A debit note applied to a bill.
///
/// Unlike credit notes, debit note amounts may be negative.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DebitNote {
    pub amount: f64,

    /// Identifier of the debit note.
    pub debit_note: String,
}

impl Validate for DebitNote {
    fn check(&self, v: &mut Validator) {
        v.finite("amount", self.amount);
        v.required("debit_note", &self.debit_note);
    }
}

/// A line item as stored by the server, with computed amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordedLineItem {
    pub id: String,
    pub account: String,
    pub description: String,
    pub quantity: f64,
    pub unit_amount: f64,

    /// `quantity * unit_amount - discount`, computed server-side.
    pub line_amount: f64,

    pub tax_amount: f64,
    pub created_ts: String,
    pub modified_ts: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<String>,
}
