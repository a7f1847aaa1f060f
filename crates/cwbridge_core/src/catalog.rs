//! The ConnectWise functions exposed to callers.
//!
//! `ConnectWiseOperation::ALL` is the only list of functions: descriptors and
//! handlers are both derived from it, so discovery and dispatch cannot drift.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    ConnectWiseClient, Result,
    function::{Function, FunctionDescriptor, FunctionRegistry, input::parse_input},
};

mod inputs;

pub use inputs::{
    CreateTicketInput, GetBoardsInput, GetCompanyInput, GetContactInput, GetMembersInput,
    GetTicketInput, SearchCompaniesInput, SearchContactsInput, SearchTicketsInput,
    UpdateTicketInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectWiseOperation {
    SearchTickets,
    GetTicket,
    CreateTicket,
    UpdateTicket,
    SearchCompanies,
    GetCompany,
    SearchContacts,
    GetContact,
    GetBoards,
    GetMembers,
}

impl ConnectWiseOperation {
    /// Discovery order
    pub const ALL: [Self; 10] = [
        Self::SearchTickets,
        Self::GetTicket,
        Self::CreateTicket,
        Self::UpdateTicket,
        Self::SearchCompanies,
        Self::GetCompany,
        Self::SearchContacts,
        Self::GetContact,
        Self::GetBoards,
        Self::GetMembers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SearchTickets => "cw_search_tickets",
            Self::GetTicket => "cw_get_ticket",
            Self::CreateTicket => "cw_create_ticket",
            Self::UpdateTicket => "cw_update_ticket",
            Self::SearchCompanies => "cw_search_companies",
            Self::GetCompany => "cw_get_company",
            Self::SearchContacts => "cw_search_contacts",
            Self::GetContact => "cw_get_contact",
            Self::GetBoards => "cw_get_boards",
            Self::GetMembers => "cw_get_members",
        }
    }

    /// Key the result is wrapped in, e.g. `{ "tickets": [...] }`
    pub fn result_key(self) -> &'static str {
        match self {
            Self::SearchTickets => "tickets",
            Self::GetTicket | Self::CreateTicket | Self::UpdateTicket => "ticket",
            Self::SearchCompanies => "companies",
            Self::GetCompany => "company",
            Self::SearchContacts => "contacts",
            Self::GetContact => "contact",
            Self::GetBoards => "boards",
            Self::GetMembers => "members",
        }
    }

    pub fn descriptor(self) -> FunctionDescriptor {
        let name = self.name();
        match self {
            Self::SearchTickets => FunctionDescriptor::for_input::<SearchTicketsInput>(
                name,
                "Search for service tickets in ConnectWise Manage",
            ),
            Self::GetTicket => {
                FunctionDescriptor::for_input::<GetTicketInput>(name, "Get a service ticket by ID")
            }
            Self::CreateTicket => FunctionDescriptor::for_input::<CreateTicketInput>(
                name,
                "Create a new service ticket in ConnectWise Manage",
            ),
            Self::UpdateTicket => FunctionDescriptor::for_input::<UpdateTicketInput>(
                name,
                "Update fields of an existing service ticket",
            ),
            Self::SearchCompanies => FunctionDescriptor::for_input::<SearchCompaniesInput>(
                name,
                "Search for companies in ConnectWise Manage",
            ),
            Self::GetCompany => {
                FunctionDescriptor::for_input::<GetCompanyInput>(name, "Get a company by ID")
            }
            Self::SearchContacts => FunctionDescriptor::for_input::<SearchContactsInput>(
                name,
                "Search for contacts in ConnectWise Manage",
            ),
            Self::GetContact => {
                FunctionDescriptor::for_input::<GetContactInput>(name, "Get a contact by ID")
            }
            Self::GetBoards => FunctionDescriptor::for_input::<GetBoardsInput>(
                name,
                "List service boards in ConnectWise Manage",
            ),
            Self::GetMembers => FunctionDescriptor::for_input::<GetMembersInput>(
                name,
                "List members (technicians) in ConnectWise Manage",
            ),
        }
    }
}

/// One catalog entry bound to a client
#[derive(Debug)]
pub struct ConnectWiseFunction {
    operation: ConnectWiseOperation,
    descriptor: FunctionDescriptor,
    client: Arc<ConnectWiseClient>,
}

impl ConnectWiseFunction {
    pub fn new(operation: ConnectWiseOperation, client: Arc<ConnectWiseClient>) -> Self {
        Self {
            operation,
            descriptor: operation.descriptor(),
            client,
        }
    }
}

#[async_trait]
impl Function for ConnectWiseFunction {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, params: Map<String, Value>) -> Result<Value> {
        let name = self.operation.name();
        let client = &self.client;
        let payload = match self.operation {
            ConnectWiseOperation::SearchTickets => {
                let input: SearchTicketsInput = parse_input(name, params)?;
                Value::Array(client.search_tickets(&input.into()).await)
            }
            ConnectWiseOperation::GetTicket => {
                let input: GetTicketInput = parse_input(name, params)?;
                client.get_ticket(input.ticket_id).await?
            }
            ConnectWiseOperation::CreateTicket => {
                let input: CreateTicketInput = parse_input(name, params)?;
                client.create_ticket(&input.into()).await?
            }
            ConnectWiseOperation::UpdateTicket => {
                let input: UpdateTicketInput = parse_input(name, params)?;
                let (ticket_id, patch) = input.into_patch();
                client.update_ticket(ticket_id, &patch).await?
            }
            ConnectWiseOperation::SearchCompanies => {
                let input: SearchCompaniesInput = parse_input(name, params)?;
                Value::Array(client.search_companies(&input.into()).await)
            }
            ConnectWiseOperation::GetCompany => {
                let input: GetCompanyInput = parse_input(name, params)?;
                client.get_company(input.company_id).await?
            }
            ConnectWiseOperation::SearchContacts => {
                let input: SearchContactsInput = parse_input(name, params)?;
                Value::Array(client.search_contacts(&input.into()).await)
            }
            ConnectWiseOperation::GetContact => {
                let input: GetContactInput = parse_input(name, params)?;
                client.get_contact(input.contact_id).await?
            }
            ConnectWiseOperation::GetBoards => {
                let input: GetBoardsInput = parse_input(name, params)?;
                Value::Array(client.get_boards(input.conditions.as_deref()).await)
            }
            ConnectWiseOperation::GetMembers => {
                let input: GetMembersInput = parse_input(name, params)?;
                Value::Array(client.get_members(input.conditions.as_deref()).await)
            }
        };

        let mut result = Map::new();
        result.insert(self.operation.result_key().to_string(), payload);
        Ok(Value::Object(result))
    }
}

/// Registry holding every catalog operation, bound to `client`
pub fn connectwise_registry(client: Arc<ConnectWiseClient>) -> Result<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();
    for operation in ConnectWiseOperation::ALL {
        registry.register(Arc::new(ConnectWiseFunction::new(
            operation,
            Arc::clone(&client),
        )))?;
    }
    Ok(registry)
}
