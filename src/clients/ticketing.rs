use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::{endpoint, ClientError};
use crate::config::TicketingConfig;
use crate::validation::{is_domain_in_email, is_valid_email};

const SERVICE: &str = "ticketing API";

/// Participant of a ticket as returned by `?include=users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TicketWithUsers {
    #[serde(default)]
    users: Vec<TicketUser>,
}

/// Ticket participant emails split by side, in ticket order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEmails {
    pub agents: Vec<String>,
    pub customers: Vec<String>,
}

#[derive(Clone)]
pub struct TicketingClient {
    http: reqwest::Client,
    config: TicketingConfig,
}

impl TicketingClient {
    pub fn new(config: TicketingConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// `Basic base64("{email}/token:{api_token}")`
    pub fn auth_header(&self) -> Result<String, ClientError> {
        let email = self
            .config
            .email
            .as_deref()
            .ok_or(ClientError::ConfigMissing("ZENDESK_EMAIL_TOKEN"))?;
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(ClientError::ConfigMissing("ZENDESK_API_TOKEN"))?;

        let credentials = format!("{}/token:{}", email, token);
        Ok(format!("Basic {}", STANDARD.encode(credentials)))
    }

    pub async fn ticket_users(&self, ticket: &str) -> Result<Vec<TicketUser>, ClientError> {
        let mut url = endpoint(&self.config.base_url, &format!("/api/v2/tickets/{}", ticket))?;
        url.query_pairs_mut().append_pair("include", "users");

        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let ticket_body: TicketWithUsers = response.json().await?;
        tracing::info!(
            "Fetched {} users for ticket {} in {} ms",
            ticket_body.users.len(),
            ticket,
            started.elapsed().as_millis()
        );
        Ok(ticket_body.users)
    }

    pub async fn ticket_emails(&self, ticket: &str) -> Result<TicketEmails, ClientError> {
        let users = self.ticket_users(ticket).await?;
        Ok(self.classify_emails(&users))
    }

    /// Split valid emails into agents (configured support domains) and customers
    pub fn classify_emails(&self, users: &[TicketUser]) -> TicketEmails {
        let mut emails = TicketEmails::default();

        for email in users.iter().filter_map(|u| u.email.as_deref()) {
            if !is_valid_email(email) {
                tracing::warn!("Skipping invalid ticket participant email: {}", email);
                continue;
            }

            let is_agent = self
                .config
                .agent_domains
                .iter()
                .any(|domain| is_domain_in_email(email, domain));

            if is_agent {
                emails.agents.push(email.to_string());
            } else {
                emails.customers.push(email.to_string());
            }
        }

        emails
    }
}
