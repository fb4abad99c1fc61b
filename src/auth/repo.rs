use axum::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{
    password::Credentials,
    repo_types::{NewUser, Role, UserProfile, UserRecord},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    Duplicate,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    profile: Json<UserProfile>,
    salt: String,
    password: String,
    created_at: OffsetDateTime,
}

impl From<UserRow> for UserRecord {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            role: Role::parse(&r.role).unwrap_or_default(),
            profile: r.profile.0,
            credentials: Credentials {
                salt: r.salt,
                digest: r.password,
            },
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, profile, salt, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(anyhow::Error::from)?;
        Ok(row.map(UserRecord::from))
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, role, profile, salt, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, role, profile, salt, password, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(Json(&user.profile))
        .bind(&user.credentials.salt)
        .bind(&user.credentials.digest)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate;
                }
            }
            StoreError::Other(e.into())
        })?;
        Ok(row.into())
    }
}

#[cfg(test)]
pub use memory::MemoryUserStore;

#[cfg(test)]
mod memory {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    /// Keyed by email; the map itself is the uniqueness constraint.
    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<HashMap<String, UserRecord>>,
    }

    impl MemoryUserStore {
        pub fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.email) {
                return Err(StoreError::Duplicate);
            }
            let record = UserRecord {
                id: Uuid::new_v4(),
                name: user.name,
                email: user.email,
                role: user.role,
                profile: user.profile,
                credentials: user.credentials,
                created_at: OffsetDateTime::now_utc(),
            };
            users.insert(record.email.clone(), record.clone());
            Ok(record)
        }
    }

    mod tests {
        use super::*;
        use crate::auth::repo_types::AccountProfile;

        fn new_user(email: &str) -> NewUser {
            NewUser::new(
                "Meera".into(),
                email.into(),
                "pw-123456",
                Role::User,
                UserProfile::Account(AccountProfile::default()),
            )
        }

        #[tokio::test]
        async fn insert_then_find() {
            let store = MemoryUserStore::default();
            let created = store.insert(new_user("meera@example.com")).await.unwrap();
            let found = store
                .find_by_email("meera@example.com")
                .await
                .unwrap()
                .expect("user present");
            assert_eq!(found.id, created.id);
            assert!(found.credentials.matches("pw-123456"));
        }

        #[tokio::test]
        async fn duplicate_email_is_rejected() {
            let store = MemoryUserStore::default();
            store.insert(new_user("dup@example.com")).await.unwrap();
            let err = store.insert(new_user("dup@example.com")).await.unwrap_err();
            assert!(matches!(err, StoreError::Duplicate));
            assert_eq!(store.count(), 1);
        }
    }
}
