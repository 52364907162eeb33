//! Clients
//!
//! A client is a denormalized aggregate: its projects, meetings, documents
//! and invoices are copies, not references, and nothing checks that they
//! agree with the top-level collections.

use crate::date::{flexible_timestamp, lenient_date};
use crate::document::Document;
use crate::error::{ModelError, ModelResult};
use crate::ids::ClientId;
use crate::invoice::{Invoice, Money};
use crate::meeting::Meeting;
use crate::project::Project;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relationship status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ClientStatus {
    Active,
    Inactive,
    Prospect,
}

impl FromStr for ClientStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ClientStatus::Active),
            "Inactive" => Ok(ClientStatus::Inactive),
            "Prospect" => Ok(ClientStatus::Prospect),
            other => Err(ModelError::unknown_status("client", other)),
        }
    }
}

impl TryFrom<String> for ClientStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How to reach the client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Internal note about the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub author: String,
    #[serde(default, with = "lenient_date")]
    pub timestamp: Option<NaiveDate>,
    pub content: String,
}

/// Activity log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

/// Billing block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub direct_debit_active: bool,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// Client aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub status: ClientStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub account_manager: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub billing: Billing,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub activity_log: Vec<ActivityEntry>,
    #[serde(default)]
    pub crm_notes: Option<String>,
}

impl Client {
    /// Create an active client with no nested records
    #[must_use]
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initials: None,
            logo_url: None,
            contact: ContactInfo::default(),
            status: ClientStatus::Active,
            tags: Vec::new(),
            account_manager: None,
            projects: Vec::new(),
            meetings: Vec::new(),
            documents: Vec::new(),
            billing: Billing::default(),
            notes: Vec::new(),
            activity_log: Vec::new(),
            crm_notes: None,
        }
    }

    /// Invoices on file
    #[inline]
    #[must_use]
    pub fn invoices(&self) -> &[Invoice] {
        &self.billing.invoices
    }

    /// Sum of every invoice
    #[must_use]
    pub fn total_invoiced(&self) -> Money {
        self.invoices()
            .iter()
            .fold(Money::default(), |acc, inv| acc.saturating_add(inv.amount))
    }

    /// Sum of sent and overdue invoices
    #[must_use]
    pub fn outstanding_balance(&self) -> Money {
        self.invoices()
            .iter()
            .filter(|inv| inv.status.is_outstanding())
            .fold(Money::default(), |acc, inv| acc.saturating_add(inv.amount))
    }

    /// Projects still being worked on
    #[must_use]
    pub fn active_project_count(&self) -> usize {
        self.projects.iter().filter(|p| p.status.is_active()).count()
    }

    /// Check ingestion invariants, including nested records
    ///
    /// # Errors
    /// The first nested record that fails its own validation.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("client.name"));
        }
        self.projects.iter().try_for_each(Project::validate)?;
        self.meetings.iter().try_for_each(Meeting::validate)?;
        self.documents.iter().try_for_each(Document::validate)?;
        self.invoices().iter().try_for_each(Invoice::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceStatus;

    fn invoice(id: &str, dollars: u64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: id.into(),
            number: id.to_uppercase(),
            client: "Example Corp".into(),
            amount: Money::from_dollars(dollars),
            status,
            sent_on: NaiveDate::from_ymd_opt(2025, 4, 15),
            paid_on: None,
        }
    }

    #[test]
    fn balances() {
        let mut client = Client::new("client-1", "Example Corp");
        client.billing.invoices = vec![
            invoice("inv-015", 2_500, InvoiceStatus::Sent),
            invoice("inv-014", 5_000, InvoiceStatus::Paid),
            invoice("inv-013", 1_800, InvoiceStatus::Overdue),
        ];
        assert_eq!(client.total_invoiced(), Money::from_dollars(9_300));
        assert_eq!(client.outstanding_balance(), Money::from_dollars(4_300));
    }

    #[test]
    fn deserializes_flattened_contact() {
        let json = r#"{
            "id": "client-ec", "name": "Example Corp", "email": "contact@example.com",
            "phone": "+1-555-123-4567", "companyName": "Example Corporation Ltd.",
            "status": "Active", "tags": ["VIP"],
            "notes": [{"id": "note-001", "author": "Bob", "timestamp": "2025-04-10", "content": "Follow up."}],
            "activityLog": [{"id": "act-001", "timestamp": "2025-04-20 10:30 AM", "description": "Client logged in."}]
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.contact.email.as_deref(), Some("contact@example.com"));
        assert_eq!(client.activity_log.len(), 1);
        assert!(client.validate().is_ok());
    }
}
