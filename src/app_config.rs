use linkboard_core::DEFAULT_STORAGE_KEY;

const DEFAULT_CONFIRM_CLEAR_MESSAGE: &str = "Are you sure you want to delete all images?";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppConfig {
    pub(crate) storage_key: String,
    pub(crate) confirm_clear_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            confirm_clear_message: DEFAULT_CONFIRM_CLEAR_MESSAGE.to_string(),
        }
    }
}

/// Values are baked in at build time (see build.rs for `.env` support).
pub(crate) fn load() -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        storage_key: pick(
            option_env!("LINKBOARD_STORAGE_KEY")
                .or(option_env!("TRUNK_PUBLIC_LINKBOARD_STORAGE_KEY")),
        )
        .unwrap_or(defaults.storage_key),
        confirm_clear_message: pick(option_env!("LINKBOARD_CONFIRM_CLEAR_MESSAGE"))
            .unwrap_or(defaults.confirm_clear_message),
    }
}

fn pick(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
