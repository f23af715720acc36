use chrono::Utc;
use contracts::domain::common::AggregateId;

/// Новый идентификатор вида `<prefix>-<millis>`.
///
/// Если id с текущей меткой уже занят (две записи в одну миллисекунду),
/// метка сдвигается вперёд до свободной.
pub fn next_id<I, F>(exists: F) -> I
where
    I: AggregateId,
    F: Fn(&I) -> bool,
{
    next_id_from(Utc::now().timestamp_millis(), exists)
}

pub fn next_id_from<I, F>(mut millis: i64, exists: F) -> I
where
    I: AggregateId,
    F: Fn(&I) -> bool,
{
    loop {
        let candidate = I::from_millis(millis);
        if !exists(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Идентификатор записи журнала: `activity-<millis>-<8 hex>`
pub fn activity_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("activity-{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}
