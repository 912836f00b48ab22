//! Invoice payloads.
//!
//! [`InvoiceCreateParams`] is what callers submit to `POST /invoices/`;
//! [`Invoice`] is what the server returns from create and get.

use serde::{Deserialize, Serialize};

use crate::resources::common::{Contact, CreditNote, LineItem, RecordedLineItem};
use crate::resources::enums::{
    Currency, InvoiceStatus, Language, PlaceOfSupply, TaxAmountType,
};
use crate::validation::{Validate, Validator};

/// Parameters for creating an invoice.
///
/// Required fields are taken by [`InvoiceCreateParams::new`]; optional
/// fields are public and can be set afterwards.
///
/// # Example
///
/// ```rust
/// use wafeq_api::resources::{Currency, InvoiceCreateParams, Language, LineItem};
/// use wafeq_api::validation::Validate;
///
/// let mut params = InvoiceCreateParams::new(
///     "INV-001",
///     "2024-04-15",
///     "contact-id",
///     Currency::Sar,
///     vec![LineItem::new("account-id", "Consulting", 1.0, 500.0)],
/// );
/// params.language = Some(Language::En);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceCreateParams {
    /// Unique number of the invoice.
    pub invoice_number: String,

    /// Issue date, `YYYY-MM-DD`.
    pub invoice_date: String,

    /// Payment due date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_due_date: Option<String>,

    /// Identifier of the customer contact.
    pub contact: String,

    /// Inline customer details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Contact>,

    pub currency: Currency,

    /// At least one line item is required.
    pub line_items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_notes: Option<Vec<CreditNote>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_supply: Option<PlaceOfSupply>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount_type: Option<TaxAmountType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,

    /// Account the invoice-level discount is booked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_account: Option<String>,

    /// Invoice-level discount; must not be negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_cost_center: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_tax_rate: Option<String>,
}

impl InvoiceCreateParams {
    /// Creates invoice parameters with the required fields set.
    #[must_use]
    pub fn new(
        invoice_number: impl Into<String>,
        invoice_date: impl Into<String>,
        contact: impl Into<String>,
        currency: Currency,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            invoice_date: invoice_date.into(),
            invoice_due_date: None,
            contact: contact.into(),
            customer: None,
            currency,
            line_items,
            notes: None,
            language: None,
            attachments: None,
            branch: None,
            credit_notes: None,
            place_of_supply: None,
            project: None,
            reference: None,
            status: None,
            tax_amount_type: None,
            warehouse: None,
            discount_account: None,
            discount_amount: None,
            discount_cost_center: None,
            discount_tax_rate: None,
        }
    }
}

impl Validate for InvoiceCreateParams {
    fn check(&self, v: &mut Validator) {
        v.required("invoice_number", &self.invoice_number);
        v.date("invoice_date", &self.invoice_date);
        v.optional_date("invoice_due_date", self.invoice_due_date.as_deref());
        v.required("contact", &self.contact);
        v.optional_nested("customer", self.customer.as_ref());
        v.length("line_items", self.line_items.len(), 1, None);
        v.each("line_items", &self.line_items);
        if let Some(notes) = &self.credit_notes {
            v.each("credit_notes", notes);
        }
        v.optional_non_negative("discount_amount", self.discount_amount);
    }
}

/// An invoice as returned by the server.
///
/// `status`, `place_of_supply` and `tax_amount_type` are kept as the raw
/// strings the server sends; the server uses more values than an invoice
/// can be created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub invoice_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_due_date: Option<String>,

    pub contact: String,
    pub currency: String,

    /// Total including taxes.
    pub amount: f64,

    /// Amount still outstanding.
    pub balance: f64,

    pub tax_amount: f64,
    pub created_ts: String,
    pub modified_ts: String,
    pub language: Language,
    pub line_items: Vec<RecordedLineItem>,

    /// Server-side lifecycle state, e.g. `DRAFT`, `SENT` or `PAID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_notes: Option<Vec<CreditNote>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_cost_center: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_tax_rate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_supply: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}
