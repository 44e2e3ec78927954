//! Tri-state request field.

use serde::{Deserialize, Deserializer};

/// One field of a JSON request body.
///
/// Use with `#[serde(default)]` so a missing key becomes `Absent` while an
/// explicit `null` becomes `Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodyField<T> {
    /// Key not present in the body.
    #[default]
    Absent,
    /// Key present with a JSON `null` value.
    Null,
    /// Key present with a value.
    Present(T),
}

impl<T> BodyField<T> {
    /// Returns true for an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true when the key is missing or `null`.
    pub fn is_missing(&self) -> bool {
        !matches!(self, Self::Present(_))
    }

    /// Returns the value when present.
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Consumes the field, keeping the value when present.
    pub fn into_present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for BodyField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::BodyField;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: BodyField<String>,
    }

    #[test]
    fn missing_key_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, BodyField::Absent);
        assert!(body.name.is_missing());
        assert!(!body.name.is_null());
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert!(body.name.is_null());
    }

    #[test]
    fn value_is_present() {
        let body: Body = serde_json::from_str(r#"{"name":"Inbox"}"#).unwrap();
        assert_eq!(body.name.as_present().map(String::as_str), Some("Inbox"));
    }
}
