//! Typed parameters of each ConnectWise function.
//!
//! Each type's JSON schema is what discovery advertises for the function.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    client::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, SearchQuery},
    function::input::{optional_positive_integer, positive_integer},
    ticket::{Reference, TicketDraft, TicketPatch},
};

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTicketsInput {
    /// Conditions to filter tickets (using ConnectWise query format)
    #[serde(default)]
    pub conditions: Option<String>,

    /// Number of tickets to return per page
    #[serde(default = "default_page_size", deserialize_with = "positive_integer")]
    pub page_size: u32,

    /// Page number to return
    #[serde(default = "default_page", deserialize_with = "positive_integer")]
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCompaniesInput {
    /// Conditions to filter companies (using ConnectWise query format)
    #[serde(default)]
    pub conditions: Option<String>,

    /// Number of companies to return per page
    #[serde(default = "default_page_size", deserialize_with = "positive_integer")]
    pub page_size: u32,

    /// Page number to return
    #[serde(default = "default_page", deserialize_with = "positive_integer")]
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchContactsInput {
    /// Conditions to filter contacts (using ConnectWise query format)
    #[serde(default)]
    pub conditions: Option<String>,

    /// Number of contacts to return per page
    #[serde(default = "default_page_size", deserialize_with = "positive_integer")]
    pub page_size: u32,

    /// Page number to return
    #[serde(default = "default_page", deserialize_with = "positive_integer")]
    pub page: u32,
}

macro_rules! search_query_from {
    ($($input:ty),+) => {
        $(
            impl From<$input> for SearchQuery {
                fn from(input: $input) -> Self {
                    Self {
                        conditions: input.conditions,
                        page_size: input.page_size,
                        page: input.page,
                    }
                }
            }
        )+
    };
}

search_query_from!(SearchTicketsInput, SearchCompaniesInput, SearchContactsInput);

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketInput {
    /// The ID of the ticket to retrieve
    #[serde(deserialize_with = "positive_integer")]
    pub ticket_id: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket summary
    pub summary: String,

    /// ID of the service board
    #[serde(deserialize_with = "positive_integer")]
    pub board_id: u64,

    /// ID of the company the ticket is for
    #[serde(deserialize_with = "positive_integer")]
    pub company_id: u64,

    /// Detailed description of the issue
    #[serde(default)]
    pub description: Option<String>,

    /// ID of the contact reporting the issue
    #[serde(default, deserialize_with = "optional_positive_integer")]
    pub contact_id: Option<u64>,
}

impl From<CreateTicketInput> for TicketDraft {
    fn from(input: CreateTicketInput) -> Self {
        Self {
            summary: input.summary,
            board: input.board_id.into(),
            company: input.company_id.into(),
            description: input.description,
            contact: input.contact_id.map(Reference::from),
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// The ID of the ticket to update
    #[serde(deserialize_with = "positive_integer")]
    pub ticket_id: u64,

    /// New summary
    #[serde(default)]
    pub summary: Option<String>,

    /// New description
    #[serde(default)]
    pub description: Option<String>,

    /// Move the ticket to this board
    #[serde(default, deserialize_with = "optional_positive_integer")]
    pub board_id: Option<u64>,

    /// New contact ID
    #[serde(default, deserialize_with = "optional_positive_integer")]
    pub contact_id: Option<u64>,

    /// New status ID
    #[serde(default, deserialize_with = "optional_positive_integer")]
    pub status_id: Option<u64>,

    /// New priority ID
    #[serde(default, deserialize_with = "optional_positive_integer")]
    pub priority_id: Option<u64>,
}

impl UpdateTicketInput {
    /// Ticket id and the fields to change
    pub fn into_patch(self) -> (u64, TicketPatch) {
        let patch = TicketPatch {
            summary: self.summary,
            description: self.description,
            board: self.board_id.map(Reference::from),
            contact: self.contact_id.map(Reference::from),
            status: self.status_id.map(Reference::from),
            priority: self.priority_id.map(Reference::from),
        };
        (self.ticket_id, patch)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCompanyInput {
    /// The ID of the company to retrieve
    #[serde(deserialize_with = "positive_integer")]
    pub company_id: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetContactInput {
    /// The ID of the contact to retrieve
    #[serde(deserialize_with = "positive_integer")]
    pub contact_id: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBoardsInput {
    /// Conditions to filter boards (ConnectWise query format)
    #[serde(default)]
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMembersInput {
    /// Conditions to filter members (ConnectWise query format)
    #[serde(default)]
    pub conditions: Option<String>,
}
