//! Ticket bodies sent to ConnectWise

use serde::{Deserialize, Serialize};

/// `{ "id": n }` reference to another ConnectWise record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
}

impl From<u64> for Reference {
    fn from(id: u64) -> Self {
        Self { id }
    }
}

/// Body of a ticket creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDraft {
    pub summary: String,
    pub board: Reference,
    pub company: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Reference>,
}

/// Partial ticket for updates; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Reference>,
}
