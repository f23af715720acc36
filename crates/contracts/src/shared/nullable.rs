//! Serde helper for patch fields that distinguish "absent" from `null`.
//!
//! `Option<Option<T>>` with this deserializer:
//! - field missing -> `None` (keep the current value)
//! - field `null` -> `Some(None)` (clear the value)
//! - field set -> `Some(Some(v))`

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        value: Option<Option<u32>>,
    }

    #[test]
    fn test_absent_null_and_set() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.value, None);
        let null: Patch = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(null.value, Some(None));
        let set: Patch = serde_json::from_str(r#"{"value":7}"#).unwrap();
        assert_eq!(set.value, Some(Some(7)));
    }
}
