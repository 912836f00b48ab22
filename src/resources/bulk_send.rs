//! Bulk invoice sending.
//!
//! A bulk send creates an invoice from inline contact and line item details
//! and delivers it through one or more channels in a single call.

use serde::{Deserialize, Serialize};

use crate::resources::enums::{Currency, DiscountType, Language, Medium, TaxAmountType};
use crate::validation::{Validate, Validator};

/// Maximum number of addresses in each recipient bucket.
pub const MAX_RECIPIENTS: usize = 6;

/// Maximum number of line items in one bulk send.
pub const MAX_BULK_LINE_ITEMS: usize = 100;

/// Parameters for `POST /api-invoices/bulk_send/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkSendInvoiceParams {
    /// Delivery channels; at least one is required.
    pub channels: Vec<Channel>,
    pub contact: BulkSendContact,
    pub currency: Currency,
    pub invoice_date: String,
    pub invoice_number: String,
    pub language: Language,

    /// Between 1 and [`MAX_BULK_LINE_ITEMS`] entries.
    pub line_items: Vec<BulkSendLineItem>,

    pub tax_amount_type: TaxAmountType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_through_account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Validate for BulkSendInvoiceParams {
    fn check(&self, v: &mut Validator) {
        v.length("channels", self.channels.len(), 1, None);
        v.each("channels", &self.channels);
        v.nested("contact", &self.contact);
        v.date("invoice_date", &self.invoice_date);
        v.required("invoice_number", &self.invoice_number);
        v.length(
            "line_items",
            self.line_items.len(),
            1,
            Some(MAX_BULK_LINE_ITEMS),
        );
        v.each("line_items", &self.line_items);
    }
}

/// A delivery channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub data: ChannelData,
    pub medium: Medium,
}

impl Channel {
    /// Creates an email channel.
    #[must_use]
    pub fn email(
        subject: impl Into<String>,
        message: impl Into<String>,
        recipients: Recipients,
    ) -> Self {
        Self {
            data: ChannelData {
                message: message.into(),
                recipients,
                subject: subject.into(),
            },
            medium: Medium::Email,
        }
    }
}

impl Validate for Channel {
    fn check(&self, v: &mut Validator) {
        v.nested("data", &self.data);
    }
}

/// The message delivered through a channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelData {
    pub message: String,
    pub recipients: Recipients,
    pub subject: String,
}

impl Validate for ChannelData {
    fn check(&self, v: &mut Validator) {
        v.nested("recipients", &self.recipients);
    }
}

/// Recipient buckets of a channel, each capped at [`MAX_RECIPIENTS`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Recipients {
    /// Primary recipients; at least one is required.
    pub to: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
}

impl Recipients {
    /// Creates recipients with only a `to` bucket.
    #[must_use]
    pub fn to<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: addresses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

fn check_bucket(v: &mut Validator, field: &str, addresses: &[String], min: usize) {
    v.length(field, addresses.len(), min, Some(MAX_RECIPIENTS));
    for (i, address) in addresses.iter().enumerate() {
        v.email(&format!("{field}[{i}]"), address);
    }
}

impl Validate for Recipients {
    fn check(&self, v: &mut Validator) {
        check_bucket(v, "to", &self.to, 1);
        if let Some(cc) = &self.cc {
            check_bucket(v, "cc", cc, 0);
        }
        if let Some(bcc) = &self.bcc {
            check_bucket(v, "bcc", bcc, 0);
        }
    }
}

/// Inline contact details for a bulk send.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BulkSendContact {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_registration_number: Option<String>,
}

impl Validate for BulkSendContact {
    fn check(&self, v: &mut Validator) {
        v.required("name", &self.name);
        v.optional_email("email", self.email.as_deref());
    }
}

/// A line item described inline rather than by account references.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BulkSendLineItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<LineDiscount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<TaxRate>,
}

impl Validate for BulkSendLineItem {
    fn check(&self, v: &mut Validator) {
        v.required("name", &self.name);
        v.finite("price", self.price);
        v.finite("quantity", self.quantity);
        v.optional_nested("discount", self.discount.as_ref());
        v.optional_nested("tax_rate", self.tax_rate.as_ref());
    }
}

/// Discount on a bulk-send line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineDiscount {
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub value: f64,
}

impl Validate for LineDiscount {
    fn check(&self, v: &mut Validator) {
        v.non_negative("value", self.value);
    }
}

/// Tax applied to a bulk-send line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRate {
    pub name: String,
    pub rate: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suid: Option<String>,
}

impl Validate for TaxRate {
    fn check(&self, v: &mut Validator) {
        v.finite("rate", self.rate);
    }
}
