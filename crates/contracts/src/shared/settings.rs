use serde::{Deserialize, Serialize};

/// Настройки приложения (ключ `app-settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Тема интерфейса: "light" | "dark" | "system"
    pub theme: String,
    pub language: String,
    pub currency: String,
    pub date_format: String,
    pub notifications: NotificationSettings,
    /// Порог (в процентах от бюджета), после которого проект попадает в уведомления
    pub budget_warning_threshold: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            language: "ko".to_string(),
            currency: "KRW".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            notifications: NotificationSettings::default(),
            budget_warning_threshold: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    /// За сколько дней до срока задача считается "скоро срок"
    pub due_soon_days: i64,
}

/// Верхняя граница `due_soon_days`
pub const MAX_DUE_SOON_DAYS: i64 = 365;

impl NotificationSettings {
    /// `due_soon_days`, ограниченное диапазоном `0..=MAX_DUE_SOON_DAYS`
    pub fn due_soon_window(&self) -> u64 {
        self.due_soon_days.clamp(0, MAX_DUE_SOON_DAYS) as u64
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            due_soon_days: 3,
        }
    }
}

/// Частичное обновление настроек
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsPatch {
    pub theme: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub date_format: Option<String>,
    pub notifications: Option<NotificationSettings>,
    pub budget_warning_threshold: Option<f64>,
}

impl AppSettings {
    pub fn apply_patch(&mut self, patch: &AppSettingsPatch) {
        if let Some(theme) = &patch.theme {
            self.theme = theme.clone();
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(currency) = &patch.currency {
            self.currency = currency.clone();
        }
        if let Some(date_format) = &patch.date_format {
            self.date_format = date_format.clone();
        }
        if let Some(notifications) = &patch.notifications {
            self.notifications = notifications.clone();
            self.notifications.due_soon_days =
                notifications.due_soon_days.clamp(0, MAX_DUE_SOON_DAYS);
        }
        if let Some(threshold) = patch.budget_warning_threshold {
            self.budget_warning_threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.currency, "KRW");
        assert_eq!(settings.notifications.due_soon_days, 3);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut settings = AppSettings::default();
        settings.apply_patch(&AppSettingsPatch {
            language: Some("en".into()),
            ..Default::default()
        });
        assert_eq!(settings.language, "en");
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_patch_clamps_due_soon_days() {
        let mut settings = AppSettings::default();
        let patch: AppSettingsPatch =
            serde_json::from_str(r#"{"notifications":{"dueSoonDays":9223372036854775807}}"#)
                .unwrap();
        settings.apply_patch(&patch);
        assert_eq!(settings.notifications.due_soon_days, MAX_DUE_SOON_DAYS);

        let patch: AppSettingsPatch =
            serde_json::from_str(r#"{"notifications":{"dueSoonDays":-5}}"#).unwrap();
        settings.apply_patch(&patch);
        assert_eq!(settings.notifications.due_soon_days, 0);
    }

    #[test]
    fn test_due_soon_window_ignores_stored_out_of_range_value() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"notifications":{"dueSoonDays":100000000}}"#).unwrap();
        assert_eq!(settings.notifications.due_soon_window(), 365);
    }
}
