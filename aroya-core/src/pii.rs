use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for passenger email addresses that redacts the local part in
/// Debug/Display output. API responses still carry the real value; the
/// wrapper exists to stop `tracing::info!("{:?}", reservation)` from leaking
/// addresses into logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct MaskedEmail(pub String);

impl MaskedEmail {
    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let head = local.chars().next().map(String::from).unwrap_or_default();
                format!("{}***@{}", head, domain)
            }
            None => "***".to_string(),
        }
    }
}

impl fmt::Debug for MaskedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl fmt::Display for MaskedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl Serialize for MaskedEmail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl From<String> for MaskedEmail {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_local_part() {
        let email = MaskedEmail("jordan@example.com".to_string());
        assert_eq!(format!("{:?}", email), "j***@example.com");
        assert_eq!(email.to_string(), "j***@example.com");
    }

    #[test]
    fn test_serialization_keeps_real_value() {
        let email = MaskedEmail("jordan@example.com".to_string());
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, r#""jordan@example.com""#);
    }

    #[test]
    fn test_malformed_address_fully_masked() {
        let email = MaskedEmail("not-an-email".to_string());
        assert_eq!(format!("{:?}", email), "***");
    }
}
