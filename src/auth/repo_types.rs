use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::password::Credentials;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "agent" => Some(Role::Agent),
            _ => None,
        }
    }
}

/// Contact details for regular users and agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
}

/// Investment preferences captured at signup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    pub amount: Option<f64>,
    pub risk_appetite: Option<String>,
}

/// Stored as a tagged JSONB document in `users.profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UserProfile {
    Account(AccountProfile),
    Investor(InvestorProfile),
}

/// User record in the database.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: UserProfile,
    pub credentials: Credentials, // salt + HMAC digest, never plaintext
    pub created_at: OffsetDateTime,
}

/// A user about to be inserted. Holds only the hashed credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: UserProfile,
    pub credentials: Credentials,
}

impl NewUser {
    pub fn new(name: String, email: String, plain_password: &str, role: Role, profile: UserProfile) -> Self {
        Self {
            name,
            email,
            role,
            profile,
            credentials: Credentials::from_plaintext(plain_password),
        }
    }
}
