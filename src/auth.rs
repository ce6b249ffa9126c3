use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::config::UserEntry;

/// Decides whether an identifier/secret pair may open the dashboard.
pub trait IdentityVerifier {
    fn verify(&self, id: &str, secret: &str) -> bool;
}

/// Hex-encoded SHA-256 of a secret, the form stored in the config file.
pub fn secret_digest(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

/// Verifier backed by the `[[auth.users]]` entries of the config file.
#[derive(Debug, Default, Clone)]
pub struct CredentialTable {
    /// id → lowercase hex digest
    users: HashMap<String, String>,
}

impl CredentialTable {
    pub fn from_entries(entries: &[UserEntry]) -> Self {
        let users = entries
            .iter()
            .map(|e| (e.id.clone(), e.secret_sha256.trim().to_ascii_lowercase()))
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl IdentityVerifier for CredentialTable {
    fn verify(&self, id: &str, secret: &str) -> bool {
        self.users
            .get(id)
            .is_some_and(|digest| *digest == secret_digest(secret))
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Login state of the one user of this window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Check the credentials and open the session on success.
    pub fn login(&mut self, verifier: &dyn IdentityVerifier, id: &str, secret: &str) -> bool {
        let id = id.trim();
        if verifier.verify(id, secret) {
            log::info!("User {id} logged in");
            self.user = Some(id.to_string());
            true
        } else {
            log::warn!("Rejected login for {id:?}");
            false
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("User {user} logged out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CredentialTable {
        CredentialTable::from_entries(&[UserEntry {
            id: "analyst@example.com".into(),
            secret_sha256: " 5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8 ".into(),
        }])
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            secret_digest("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn verifies_only_matching_pairs() {
        let creds = table();
        assert_eq!(creds.len(), 1);
        assert!(creds.verify("analyst@example.com", "password"));
        assert!(!creds.verify("analyst@example.com", "Password"));
        assert!(!creds.verify("Analyst@example.com", "password"));
        assert!(!creds.verify("someone@example.com", "password"));
    }

    #[test]
    fn empty_table_rejects_everyone() {
        let creds = CredentialTable::default();
        assert!(creds.is_empty());
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn session_login_and_logout() {
        let creds = table();
        let mut session = Session::default();
        assert!(!session.is_logged_in());

        assert!(!session.login(&creds, "analyst@example.com", "wrong"));
        assert!(!session.is_logged_in());

        assert!(session.login(&creds, " analyst@example.com ", "password"));
        assert_eq!(session.user(), Some("analyst@example.com"));

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
    }
}
