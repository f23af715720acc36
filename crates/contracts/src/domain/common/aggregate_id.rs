use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
///
/// Идентификаторы имеют вид `<prefix>-<unix millis>` (например,
/// `task-1718000000000`) и хранятся как строки.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Префикс идентификатора ("task", "project", ...)
    const PREFIX: &'static str;

    /// Обернуть готовую строку без проверки
    fn from_raw(value: String) -> Self;

    /// Строковое представление
    fn as_str(&self) -> &str;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(format!("Empty {} id", Self::PREFIX));
        }
        Ok(Self::from_raw(trimmed.to_string()))
    }

    /// Сформировать ID по метке времени
    fn from_millis(millis: i64) -> Self {
        Self::from_raw(format!("{}-{}", Self::PREFIX, millis))
    }

    fn as_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_task::aggregate::TaskId;

    #[test]
    fn test_from_millis_uses_prefix() {
        let id = TaskId::from_millis(1_700_000_000_000);
        assert_eq!(id.as_str(), "task-1700000000000");
    }

    #[test]
    fn test_from_string_rejects_blank() {
        assert!(TaskId::from_string("  ").is_err());
        assert_eq!(TaskId::from_string(" task-1 ").unwrap().as_str(), "task-1");
    }
}
