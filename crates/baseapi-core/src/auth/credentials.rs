use serde::{Deserialize, Serialize};

/// The credential fields a session cache reads and writes.
///
/// The cache never owns the holder; it borrows it for one `save` or `load`
/// call. An empty string counts as unset, the same as `None`.
pub trait CredentialHolder {
    /// Bearer token
    fn jwt(&self) -> Option<&str>;

    /// Secondary opaque credential
    fn auth(&self) -> Option<&str>;

    fn set_jwt(&mut self, jwt: Option<String>);

    fn set_auth(&mut self, auth: Option<String>);

    /// Check if either credential is present
    fn is_authenticated(&self) -> bool {
        present(self.jwt()).is_some() || present(self.auth()).is_some()
    }
}

/// The value if it is set and non-empty
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Plain credential pair.
///
/// Also the on-disk shape of the session file: absent fields are skipped
/// when writing, and missing or `null` keys read back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// True when neither field holds a non-empty value
    pub fn is_empty(&self) -> bool {
        present(self.jwt.as_deref()).is_none() && present(self.auth.as_deref()).is_none()
    }
}

impl CredentialHolder for Credentials {
    fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }

    fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    fn set_jwt(&mut self, jwt: Option<String>) {
        self.jwt = jwt;
    }

    fn set_auth(&mut self, auth: Option<String>) {
        self.auth = auth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authenticated() {
        assert!(!Credentials::new().is_authenticated());
        assert!(Credentials::new().with_jwt("abc").is_authenticated());
        assert!(Credentials::new().with_auth("xyz").is_authenticated());
    }

    #[test]
    fn test_empty_string_is_not_authenticated() {
        let creds = Credentials::new().with_jwt("").with_auth("");
        assert!(!creds.is_authenticated());
        assert!(creds.is_empty());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let creds = Credentials::new().with_jwt("abc");
        assert_eq!(serde_json::to_string(&creds).unwrap(), r#"{"jwt":"abc"}"#);
        assert_eq!(serde_json::to_string(&Credentials::new()).unwrap(), "{}");
    }

    #[test]
    fn test_deserialize_null_and_unknown_keys() {
        let creds: Credentials =
            serde_json::from_str(r#"{"jwt":null,"auth":"xyz","expires":3600}"#).unwrap();
        assert_eq!(creds, Credentials::new().with_auth("xyz"));
    }

    #[test]
    fn test_setters_replace_fields() {
        let mut creds = Credentials::new().with_jwt("old");
        creds.set_jwt(None);
        creds.set_auth(Some("new".to_string()));
        assert_eq!(creds.jwt(), None);
        assert_eq!(creds.auth(), Some("new"));
    }
}
