use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};

const MASK: &str = "********";

/// Shields an identity field from log macros: both Debug and Display
/// render a fixed mask. Serde still sees the real value, since snapshots
/// of the data a store would persist need it.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn inner(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Identity supplied by the excluded authentication collaborator; the
/// engine consumes it only for greeting text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: Masked<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> UserProfile;
    async fn register(&self, name: &str, email: &str, password: &str) -> UserProfile;
}

/// Credential stub standing in for a real backend: any credentials are
/// accepted after a fixed simulated latency, and the display name for a
/// login is derived from the email local part.
pub struct StubIdentity {
    latency: Duration,
}

impl StubIdentity {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for StubIdentity {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn authenticate(&self, email: &str, _password: &str) -> UserProfile {
        tokio::time::sleep(self.latency).await;
        let name = email.split('@').next().unwrap_or(email);
        tracing::info!("Authenticated stub identity for {}", name);
        UserProfile {
            id: "1".to_string(),
            name: name.to_string(),
            email: Masked(email.to_string()),
        }
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> UserProfile {
        tokio::time::sleep(self.latency).await;
        tracing::info!("Registered stub identity for {}", name);
        UserProfile {
            id: "1".to_string(),
            name: name.to_string(),
            email: Masked(email.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_derives_name_from_local_part() {
        let stub = StubIdentity::new(Duration::ZERO);
        let profile = stub.authenticate("ada@example.com", "hunter2").await;
        assert_eq!(profile.name, "ada");
        assert_eq!(profile.email.inner(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_keeps_given_name() {
        let stub = StubIdentity::new(Duration::ZERO);
        let profile = stub.register("Ada Lovelace", "ada@example.com", "hunter2").await;
        assert_eq!(profile.name, "Ada Lovelace");
    }

    #[test]
    fn test_masked_debug_hides_value() {
        let email = Masked("ada@example.com".to_string());
        assert_eq!(format!("{:?}", email), "********");
        assert_eq!(format!("{}", email), "********");
    }

    #[test]
    fn test_masked_serializes_the_real_value() {
        let email = Masked("ada@example.com".to_string());
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"ada@example.com\"");
    }
}
