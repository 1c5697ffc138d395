use crate::locale::{Locale, PREFERENCE_KEY};

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_data_dir() -> String {
    "~/.campus".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

pub(super) fn default_timeout_secs() -> u64 {
    10
}

pub(super) fn default_query_param() -> String {
    "lang".to_string()
}

pub(super) fn default_locale() -> Locale {
    Locale::Ru
}

pub(super) fn default_preference_key() -> String {
    PREFERENCE_KEY.to_string()
}

pub(super) fn default_db_path() -> String {
    "~/.campus/data/campus.db".to_string()
}
