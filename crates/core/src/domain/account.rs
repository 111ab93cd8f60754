// Account Domain Model

use crate::domain::entity::{require_identifier, Entity};
use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Account ID (UUID v4 in production)
pub type AccountId = String;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Open,
    Closed,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Open => write!(f, "OPEN"),
            AccountStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "OPEN" => Ok(AccountStatus::Open),
            "CLOSED" => Ok(AccountStatus::Closed),
            other => Err(DomainError::Validation {
                field: "status",
                message: format!("unknown status '{}'", other),
            }),
        }
    }
}

/// Account Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub customer_id: String,
    pub product_code: String,
    pub status: AccountStatus,
    pub opened_at: i64, // epoch ms
    pub closed_at: Option<i64>,
}

impl Account {
    /// Open a new account with injected ID and timestamp
    pub fn open(
        id: impl Into<String>,
        opened_at: i64,
        customer_id: impl Into<String>,
        product_code: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require_identifier("id", id)?,
            customer_id: require_identifier("customer_id", customer_id)?,
            product_code: require_identifier("product_code", product_code)?,
            status: AccountStatus::Open,
            opened_at,
            closed_at: None,
        })
    }

    /// Produce the closed version of this account
    ///
    /// The receiver is left untouched.
    pub fn close(&self, closed_at: i64) -> Result<Self> {
        if self.status != AccountStatus::Open {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: AccountStatus::Closed.to_string(),
            });
        }
        Ok(Self {
            status: AccountStatus::Closed,
            closed_at: Some(closed_at),
            ..self.clone()
        })
    }
}

impl Entity for Account {
    const KIND: &'static str = "account";

    fn id(&self) -> &str {
        &self.id
    }
}
