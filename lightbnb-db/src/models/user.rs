//! User records and registration input

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Loose `local@domain` shape; deliverability is not our concern.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored hash, as supplied at registration. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Validated input for `UserRepo::add`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNewUser")]
pub struct NewUser {
    name: String,
    email: String,
    password: String,
}

impl NewUser {
    /// Build a registration record.
    ///
    /// `password` must already be hashed; this layer stores it verbatim.
    /// The email is lower-cased so it matches what `get_with_email` binds.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::NewUser;
    ///
    /// let user = NewUser::new("Ada", "Ada@Example.com", "$2a$10$hash").unwrap();
    /// assert_eq!(user.email(), "ada@example.com");
    /// assert!(NewUser::new("Ada", "not-an-email", "$2a$10$hash").is_err());
    /// ```
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like local@domain",
            });
        }

        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }

        Ok(Self {
            name: name.to_owned(),
            email: normalize_email(email),
            password: password.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Deserialize)]
struct RawNewUser {
    name: String,
    email: String,
    password: String,
}

impl TryFrom<RawNewUser> for NewUser {
    type Error = ValidationError;

    fn try_from(raw: RawNewUser) -> Result<Self, Self::Error> {
        Self::new(&raw.name, &raw.email, &raw.password)
    }
}

/// Trim and lower-case an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
