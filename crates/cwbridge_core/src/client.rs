//! ConnectWise Manage operations.
//!
//! Search-style calls log failures and return an empty list, so their callers
//! cannot tell "no results" from "upstream failed". Get, create and update
//! calls log and then return the error.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::{
    HttpTransport, UpstreamCredentials, UpstreamError, UpstreamTransport,
    ticket::{TicketDraft, TicketPatch},
};

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_PAGE: u32 = 1;

/// Paging and filtering for list endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// ConnectWise query-language filter, e.g. `status/name="New"`
    pub conditions: Option<String>,
    pub page_size: u32,
    pub page: u32,
}

impl SearchQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("pageSize".to_string(), self.page_size.to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        query.extend(conditions_query(self.conditions.as_deref()));
        query
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            conditions: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
        }
    }
}

fn conditions_query(conditions: Option<&str>) -> Vec<(String, String)> {
    match conditions {
        Some(c) if !c.is_empty() => vec![("conditions".to_string(), c.to_string())],
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone)]
pub struct ConnectWiseClient {
    transport: Arc<dyn UpstreamTransport>,
}

impl ConnectWiseClient {
    pub fn new(transport: Arc<dyn UpstreamTransport>) -> Self {
        Self { transport }
    }

    /// Build a client over HTTP. Incomplete credentials only produce a warning.
    pub fn from_credentials(
        credentials: &UpstreamCredentials,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            warn!(
                "ConnectWise credentials not fully provided ({} empty); API calls may fail",
                missing.join(", ")
            );
        }

        let transport = HttpTransport::new(credentials, timeout)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub async fn search_tickets(&self, query: &SearchQuery) -> Vec<Value> {
        self.search("/service/tickets", query.to_query(), "tickets").await
    }

    pub async fn get_ticket(&self, ticket_id: u64) -> Result<Value, UpstreamError> {
        self.fetch(
            &format!("/service/tickets/{ticket_id}"),
            &format!("Error getting ticket {ticket_id}"),
        )
        .await
    }

    pub async fn create_ticket(&self, draft: &TicketDraft) -> Result<Value, UpstreamError> {
        let body = serde_json::to_value(draft).map_err(UpstreamError::Encode)?;
        self.transport
            .post("/service/tickets", body)
            .await
            .inspect_err(|e| report_failure(e, "Error creating ticket"))
    }

    pub async fn update_ticket(
        &self,
        ticket_id: u64,
        patch: &TicketPatch,
    ) -> Result<Value, UpstreamError> {
        let body = serde_json::to_value(patch).map_err(UpstreamError::Encode)?;
        self.transport
            .patch(&format!("/service/tickets/{ticket_id}"), body)
            .await
            .inspect_err(|e| report_failure(e, &format!("Error updating ticket {ticket_id}")))
    }

    pub async fn search_companies(&self, query: &SearchQuery) -> Vec<Value> {
        self.search("/company/companies", query.to_query(), "companies").await
    }

    pub async fn get_company(&self, company_id: u64) -> Result<Value, UpstreamError> {
        self.fetch(
            &format!("/company/companies/{company_id}"),
            &format!("Error getting company {company_id}"),
        )
        .await
    }

    pub async fn search_contacts(&self, query: &SearchQuery) -> Vec<Value> {
        self.search("/company/contacts", query.to_query(), "contacts").await
    }

    pub async fn get_contact(&self, contact_id: u64) -> Result<Value, UpstreamError> {
        self.fetch(
            &format!("/company/contacts/{contact_id}"),
            &format!("Error getting contact {contact_id}"),
        )
        .await
    }

    pub async fn get_boards(&self, conditions: Option<&str>) -> Vec<Value> {
        self.search("/service/boards", conditions_query(conditions), "service boards")
            .await
    }

    pub async fn get_members(&self, conditions: Option<&str>) -> Vec<Value> {
        self.search("/system/members", conditions_query(conditions), "members")
            .await
    }

    async fn search(&self, path: &str, query: Vec<(String, String)>, what: &str) -> Vec<Value> {
        let outcome = self
            .transport
            .get(path, query)
            .await
            .and_then(|body| match body {
                Value::Array(items) => Ok(items),
                _ => Err(UpstreamError::UnexpectedShape {
                    path: path.to_string(),
                    expected: "a JSON array".to_string(),
                }),
            });

        match outcome {
            Ok(items) => {
                debug!("Found {} {}", items.len(), what);
                items
            }
            Err(e) => {
                report_failure(&e, &format!("Error searching {what}"));
                Vec::new()
            }
        }
    }

    async fn fetch(&self, path: &str, context: &str) -> Result<Value, UpstreamError> {
        self.transport
            .get(path, Vec::new())
            .await
            .inspect_err(|e| report_failure(e, context))
    }
}

fn report_failure(err: &UpstreamError, context: &str) {
    match err {
        UpstreamError::Status { status, body, .. } => {
            error!(status = *status, body = %body, "{}: {}", context, err);
        }
        _ => error!("{}: {}", context, err),
    }

    if err.is_unauthorized() {
        error!("Authentication error: check your ConnectWise credentials");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockUpstreamTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn unauthorized() -> UpstreamError {
        UpstreamError::Status {
            url: "https://example.invalid".to_string(),
            status: 401,
            body: "{}".to_string(),
        }
    }

    fn client(mock: MockUpstreamTransport) -> ConnectWiseClient {
        ConnectWiseClient::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn search_tickets_forwards_paging_and_conditions() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get()
            .withf(|path, query| {
                path == "/service/tickets"
                    && query
                        == &vec![
                            ("pageSize".to_string(), "10".to_string()),
                            ("page".to_string(), "2".to_string()),
                            ("conditions".to_string(), "id > 5".to_string()),
                        ]
            })
            .times(1)
            .returning(|_, _| Ok(json!([{ "id": 6 }, { "id": 7 }])));

        let query = SearchQuery {
            conditions: Some("id > 5".to_string()),
            page_size: 10,
            page: 2,
        };
        let tickets = client(mock).search_tickets(&query).await;

        assert_eq!(tickets, vec![json!({ "id": 6 }), json!({ "id": 7 })]);
    }

    #[tokio::test]
    async fn empty_conditions_are_not_sent() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get()
            .withf(|path, query| path == "/service/boards" && query.is_empty())
            .times(1)
            .returning(|_, _| Ok(json!([])));

        let boards = client(mock).get_boards(Some("")).await;
        assert!(boards.is_empty());
    }

    #[tokio::test]
    async fn search_failures_become_empty_results() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get().returning(|_, _| Err(unauthorized()));

        let client = client(mock);
        assert!(client.search_tickets(&SearchQuery::default()).await.is_empty());
        assert!(client.search_companies(&SearchQuery::default()).await.is_empty());
        assert!(client.search_contacts(&SearchQuery::default()).await.is_empty());
        assert!(client.get_members(None).await.is_empty());
    }

    #[tokio::test]
    async fn search_with_non_array_body_is_swallowed() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get()
            .returning(|_, _| Ok(json!({ "message": "odd" })));

        assert!(client(mock).get_members(Some("inactiveFlag=false")).await.is_empty());
    }

    #[tokio::test]
    async fn get_failures_propagate() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get()
            .withf(|path, _| path == "/service/tickets/42")
            .returning(|_, _| Err(unauthorized()));

        let err = client(mock).get_ticket(42).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn get_company_and_contact_hit_their_paths() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_get()
            .withf(|path, _| path == "/company/companies/3")
            .returning(|_, _| Ok(json!({ "id": 3 })));
        mock.expect_get()
            .withf(|path, _| path == "/company/contacts/4")
            .returning(|_, _| Ok(json!({ "id": 4 })));

        let client = client(mock);
        assert_eq!(client.get_company(3).await.unwrap(), json!({ "id": 3 }));
        assert_eq!(client.get_contact(4).await.unwrap(), json!({ "id": 4 }));
    }

    #[tokio::test]
    async fn create_ticket_posts_draft() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_post()
            .withf(|path, body| {
                path == "/service/tickets"
                    && body
                        == &json!({
                            "summary": "VPN down",
                            "board": { "id": 1 },
                            "company": { "id": 2 },
                            "description": "since 9am"
                        })
            })
            .times(1)
            .returning(|_, body| Ok(json!({ "id": 99, "summary": body["summary"] })));

        let draft = TicketDraft {
            summary: "VPN down".to_string(),
            board: 1.into(),
            company: 2.into(),
            description: Some("since 9am".to_string()),
            contact: None,
        };
        let created = client(mock).create_ticket(&draft).await.unwrap();
        assert_eq!(created["id"], 99);
    }

    #[tokio::test]
    async fn update_ticket_failure_propagates() {
        let mut mock = MockUpstreamTransport::new();
        mock.expect_patch()
            .withf(|path, body| {
                path == "/service/tickets/5" && body == &json!({ "status": { "id": 3 } })
            })
            .returning(|_, _| Err(unauthorized()));

        let patch = TicketPatch {
            status: Some(3.into()),
            ..TicketPatch::default()
        };
        assert!(client(mock).update_ticket(5, &patch).await.is_err());
    }
}
