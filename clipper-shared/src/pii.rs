use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps a secret (such as a submitted password) so it never shows up in Debug or Display output.
///
/// Serialization still yields the real value; the wrapper only guards against
/// accidental leakage through `tracing::info!("{:?}", form)` and friends.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
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

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Login {
        username: String,
        password: Masked<String>,
    }

    #[test]
    fn test_debug_hides_secret() {
        let login: Login = serde_json::from_str(r#"{"username":"admin","password":"hunter2"}"#).unwrap();
        let printed = format!("{:?}", login);

        assert_eq!(login.username, "admin");
        assert!(!printed.contains("hunter2"));
        assert_eq!(login.password.expose(), "hunter2");
    }
}
