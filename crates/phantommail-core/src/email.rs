use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kinds of email the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Order,
    Declaration,
    Question,
    Complaint,
    PriceRequest,
    UpdateOrder,
    WaitingCosts,
    Promotional,
}

impl EmailKind {
    pub const ALL: [EmailKind; 8] = [
        EmailKind::Order,
        EmailKind::Declaration,
        EmailKind::Question,
        EmailKind::Complaint,
        EmailKind::PriceRequest,
        EmailKind::UpdateOrder,
        EmailKind::WaitingCosts,
        EmailKind::Promotional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Declaration => "declaration",
            Self::Question => "question",
            Self::Complaint => "complaint",
            Self::PriceRequest => "price_request",
            Self::UpdateOrder => "update_order",
            Self::WaitingCosts => "waiting_costs",
            Self::Promotional => "promotional",
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        EmailKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::Parse(format!("unknown email kind '{value}'")))
    }
}

/// Assembled email content, as returned by a document assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Email {
    pub subject: String,
    pub body_html: String,
    #[serde(default)]
    pub attachment_html: Option<String>,
}

/// An email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub sender: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    /// Base64-encoded PDF attachments.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl OutgoingEmail {
    pub fn new(sender: impl Into<String>, to: Vec<String>, email: &Email) -> Self {
        Self {
            sender: sender.into(),
            to,
            subject: email.subject.clone(),
            body_html: email.body_html.clone(),
            cc: None,
            bcc: None,
            attachments: Vec::new(),
        }
    }
}
