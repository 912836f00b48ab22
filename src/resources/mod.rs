//! Typed request and response payloads for the Wafeq API.
//!
//! Request types implement [`Validate`](crate::validation::Validate);
//! response types are decoded from the server's JSON and fail loudly when
//! required fields are missing.

mod bill;
mod bulk_send;
mod common;
mod enums;
mod invoice;

pub use bill::{Bill, BillCreateParams};
pub use bulk_send::{
    BulkSendContact, BulkSendInvoiceParams, BulkSendLineItem, Channel, ChannelData,
    LineDiscount, Recipients, TaxRate, MAX_BULK_LINE_ITEMS, MAX_RECIPIENTS,
};
pub use common::{Contact, CreditNote, DebitNote, LineItem, RecordedLineItem};
pub use enums::{
    BillStatus, Currency, DiscountType, InvoiceStatus, Language, Medium, PlaceOfSupply,
    TaxAmountType, UnknownVariant,
};
pub use invoice::{Invoice, InvoiceCreateParams};
