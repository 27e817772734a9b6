//! Data-driven tables of invalid sign-up and login payloads

use conduit_client::models::{LoginUser, NewUser};
use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};

const INVALID_SIGNUP_YAML: &str = include_str!("../testdata/invalid_signup.yaml");
const INVALID_LOGIN_YAML: &str = include_str!("../testdata/invalid_login.yaml");

/// One rejected sign-up payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidSignup {
    pub id: u32,
    pub test_case: String,
    pub data: NewUser,
    pub expected_code: u16,
}

/// One rejected set of login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLogin {
    pub id: u32,
    pub test_case: String,
    pub credentials: LoginUser,
    pub expected_code: u16,
}

pub fn invalid_signups() -> E2eResult<Vec<InvalidSignup>> {
    parse_table("invalid_signup.yaml", INVALID_SIGNUP_YAML)
}

pub fn invalid_logins() -> E2eResult<Vec<InvalidLogin>> {
    parse_table("invalid_login.yaml", INVALID_LOGIN_YAML)
}

/// Parse a table, rejecting empty tables and repeated row ids
pub fn parse_table<T>(name: &str, yaml: &str) -> E2eResult<Vec<T>>
where
    T: for<'de> Deserialize<'de> + TableRow,
{
    let rows: Vec<T> = serde_yaml::from_str(yaml)
        .map_err(|e| E2eError::TableParse(format!("{}: {}", name, e)))?;

    if rows.is_empty() {
        return Err(E2eError::TableParse(format!("{}: table is empty", name)));
    }

    let mut seen = Vec::with_capacity(rows.len());
    for row in &rows {
        if seen.contains(&row.id()) {
            return Err(E2eError::TableParse(format!(
                "{}: duplicate row id {}",
                name,
                row.id()
            )));
        }
        seen.push(row.id());
    }

    Ok(rows)
}

pub trait TableRow {
    fn id(&self) -> u32;
}

impl TableRow for InvalidSignup {
    fn id(&self) -> u32 {
        self.id
    }
}

impl TableRow for InvalidLogin {
    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_signup_table() {
        let rows = invalid_signups().unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.expected_code == 422));
        assert_eq!(rows[0].test_case, "Empty username");
        assert_eq!(rows[0].data.username, "");
        assert_eq!(rows[3].data.password, "123");
        assert_eq!(rows[5].data.username, "test@user!");
    }

    #[test]
    fn test_embedded_login_table() {
        let rows = invalid_logins().unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.expected_code == 422));
        assert_eq!(rows[4].credentials.email, "invalid-email");
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
- id: 1
  test_case: a
  credentials: { email: a@b.c, password: x }
  expected_code: 422
- id: 1
  test_case: b
  credentials: { email: a@b.c, password: y }
  expected_code: 422
"#;
        let err = parse_table::<InvalidLogin>("dup.yaml", yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate row id 1"));
    }

    #[test]
    fn test_malformed_table_rejected() {
        assert!(matches!(
            parse_table::<InvalidSignup>("bad.yaml", "- id: one"),
            Err(E2eError::TableParse(_))
        ));
        assert!(matches!(
            parse_table::<InvalidSignup>("empty.yaml", "[]"),
            Err(E2eError::TableParse(_))
        ));
    }
}
