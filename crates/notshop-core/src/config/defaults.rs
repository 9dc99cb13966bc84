pub(super) fn default_name() -> String {
    "notshop".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_log_dir() -> String {
    "logs".to_string()
}

pub(super) fn default_log_file() -> String {
    "notshop.log".to_string()
}

pub(super) fn default_locale_dir() -> String {
    "locales".to_string()
}

pub(super) fn default_base_locale() -> String {
    "ru".to_string()
}

pub(super) fn default_items_per_page() -> usize {
    6
}

pub(super) fn default_row_width() -> usize {
    2
}
