//! Default value functions for serde.

pub(super) fn default_name() -> String {
    "UniFlow".to_string()
}
pub(super) fn default_data_dir() -> String {
    "~/.uniflow".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_language() -> String {
    "English".to_string()
}
pub(super) fn default_true() -> bool {
    true
}
pub(super) fn default_db_path() -> String {
    "~/.uniflow/uniflow.db".to_string()
}
pub(super) fn default_session_ttl() -> u64 {
    30
}
pub(super) fn default_sweep_interval() -> u64 {
    60
}
pub(super) fn default_context_color() -> String {
    "#3B82F6".to_string()
}
