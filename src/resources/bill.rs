//! Bill payloads.

use serde::{Deserialize, Serialize};

use crate::resources::common::{DebitNote, LineItem, RecordedLineItem};
use crate::resources::enums::{BillStatus, Currency, Language, TaxAmountType};
use crate::validation::{Validate, Validator};

/// Parameters for creating a bill.
///
/// Both `bill_date` and `bill_due_date` are required and must have the
/// `YYYY-MM-DD` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillCreateParams {
    pub bill_number: String,
    pub bill_date: String,
    pub bill_due_date: String,
    pub currency: Currency,

    /// At least one line item is required.
    pub line_items: Vec<LineItem>,

    /// The supplier contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit_notes: Option<Vec<DebitNote>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Defaults to `DRAFT` server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount_type: Option<TaxAmountType>,
}

impl BillCreateParams {
    /// Creates bill parameters with the required fields set.
    #[must_use]
    pub fn new(
        bill_number: impl Into<String>,
        bill_date: impl Into<String>,
        bill_due_date: impl Into<String>,
        currency: Currency,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            bill_number: bill_number.into(),
            bill_date: bill_date.into(),
            bill_due_date: bill_due_date.into(),
            currency,
            line_items,
            contact: None,
            notes: None,
            language: None,
            attachments: None,
            branch: None,
            debit_notes: None,
            order_number: None,
            project: None,
            reference: None,
            status: None,
            tax_amount_type: None,
        }
    }
}

impl Validate for BillCreateParams {
    fn check(&self, v: &mut Validator) {
        v.required("bill_number", &self.bill_number);
        v.date("bill_date", &self.bill_date);
        v.date("bill_due_date", &self.bill_due_date);
        v.length("line_items", self.line_items.len(), 1, None);
        v.each("line_items", &self.line_items);
        if let Some(notes) = &self.debit_notes {
            v.each("debit_notes", notes);
        }
    }
}

/// A bill as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: String,
    pub bill_number: String,
    pub bill_date: String,
    pub bill_due_date: String,
    pub currency: String,
    pub amount: f64,
    pub balance: f64,
    pub tax_amount: f64,
    pub created_ts: String,
    pub modified_ts: String,
    pub line_items: Vec<RecordedLineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit_notes: Option<Vec<DebitNote>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount_type: Option<TaxAmountType>,
}
