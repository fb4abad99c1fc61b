use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        claims::TokenSubject,
        dto::{LoginRequest, SignupRequest},
        jwt::JwtKeys,
        repo::{StoreError, UserStore},
        repo_types::{AccountProfile, InvestorProfile, NewUser, Role, UserProfile, UserRecord},
    },
    error::{AppError, AuthError},
};

pub(crate) const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";
pub(crate) const SIGNUP_FIELDS_REQUIRED: &str = "Name, email and password are required";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed value, or `None` when absent or blank.
fn present(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub struct LoginOutcome {
    pub token: String,
    pub user: UserRecord,
}

pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<LoginOutcome, AppError> {
    // password is not trimmed; whitespace is part of the secret
    let (Some(email), Some(password)) = (
        present(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation(LOGIN_FIELDS_REQUIRED.into()));
    };
    let email = normalize_email(&email);

    let user = match store.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(store_failure(e)),
    };

    if !user.credentials.matches(&password) {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = keys.issue(&TokenSubject {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(LoginOutcome { token, user })
}

pub async fn signup(store: &dyn UserStore, req: SignupRequest) -> Result<UserRecord, AppError> {
    let (Some(name), Some(email), Some(password)) = (
        present(req.name),
        present(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation(SIGNUP_FIELDS_REQUIRED.into()));
    };
    let email = normalize_email(&email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    let risk_appetite = present(req.risk_appetite);
    let profile = if req.amount.is_some() || risk_appetite.is_some() {
        UserProfile::Investor(InvestorProfile {
            amount: parse_amount(req.amount)?,
            risk_appetite,
        })
    } else {
        UserProfile::Account(AccountProfile {
            phone_number: present(req.phone_number),
            address: present(req.address),
            company_name: present(req.company_name),
            pincode: present(req.pincode),
            city: present(req.city),
        })
    };

    match store.find_by_email(&email).await {
        Ok(Some(_)) => {
            warn!(email = %email, "email already registered");
            return Err(duplicate());
        }
        Ok(None) => {}
        Err(e) => return Err(store_failure(e)),
    }

    let user = store
        .insert(NewUser::new(name, email, &password, Role::User, profile))
        .await
        .map_err(|e| match e {
            StoreError::Duplicate => {
                warn!("email registered concurrently");
                duplicate()
            }
            other => store_failure(other),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Accepts a JSON number or a numeric string.
fn parse_amount(v: Option<serde_json::Value>) -> Result<Option<f64>, AppError> {
    let invalid = || AppError::Validation("Invalid amount".into());
    match v {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => {
            s.trim().parse::<f64>().map(Some).map_err(|_| invalid())
        }
        Some(_) => Err(invalid()),
    }
}

fn duplicate() -> AppError {
    AppError::Conflict("User already exists with this email".into())
}

fn store_failure(e: StoreError) -> AppError {
    match e {
        StoreError::Duplicate => duplicate(),
        StoreError::Other(e) => AppError::Internal(e),
    }
}
