use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Role, UserProfile, UserRecord};

/// Request body for login. Fields are optional so absence maps to a 400.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for signup (`POST /signin`). A `role` in the body is ignored;
/// self-registered accounts are always `user`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub risk_appetite: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub message: &'static str,
    pub role: Role,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: CreatedUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_appetite: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&UserRecord> for PublicUser {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

impl From<&UserRecord> for CreatedUser {
    fn from(u: &UserRecord) -> Self {
        let mut out = Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            address: None,
            city: None,
            pincode: None,
            phone_number: None,
            amount: None,
            risk_appetite: None,
            created_at: u.created_at,
        };
        match &u.profile {
            UserProfile::Account(p) => {
                out.address = p.address.clone();
                out.city = p.city.clone();
                out.pincode = p.pincode.clone();
                out.phone_number = p.phone_number.clone();
            }
            UserProfile::Investor(p) => {
                out.amount = p.amount;
                out.risk_appetite = p.risk_appetite.clone();
            }
        }
        out
    }
}
