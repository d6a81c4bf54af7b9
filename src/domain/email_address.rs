use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

/// Permissive `local@domain.tld` shape: no whitespace, a single `@`, and a
/// `.` inside the domain.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email shape pattern"));

#[derive(Debug, Clone, Validate, PartialEq, Eq)]
pub struct EmailAddress {
    #[validate(regex(path = *EMAIL_SHAPE))]
    email: String,
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.email)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let email = Self { email: value };
        match email.validate() {
            Ok(_) => Ok(email),
            Err(_) => Err(format!("'{}' is not a valid email address", email.email)),
        }
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EmailAddress::try_from(raw).map_err(serde::de::Error::custom)
    }
}
