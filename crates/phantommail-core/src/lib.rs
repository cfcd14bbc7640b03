//! Core contracts and helpers for PhantomMail.
//!
//! This crate defines the domain entities of generated emails (transport
//! orders, customs declarations, customer records), the language tables,
//! validation helpers and redaction utilities shared by the other crates.

pub mod customs;
pub mod email;
pub mod error;
pub mod language;
pub mod redaction;
pub mod types;
pub mod validation;

pub use customs::{
    Currency, CustomsDeclaration, DeclarationType, ItemDetail, NET_MASS_RATIO, Party, TAX_RATES,
    TaxLine, TaxType, TransportInfo, round2,
};
pub use email::{Email, EmailKind, OutgoingEmail};
pub use error::{Error, Result};
pub use language::{Language, Localized};
pub use redaction::{RedactedSecret, redact_email, redact_recipients, redact_secret};
pub use types::{Address, Client, CustomerRecord, Goods, TransportOrder};
pub use validation::{
    ensure_placeholders_resolved, unresolved_placeholders, validate_declaration, validate_goods,
    validate_transport_order,
};
