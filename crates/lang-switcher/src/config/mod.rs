mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod server_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, logging_config::LoggingConfig,
    server_config::ServerConfig,
};

pub(crate) const DEFAULT_PORT: u16 = 7879;
pub(crate) const DEFAULT_OPEN_SETTINGS_ON_START: bool = true;
pub(crate) const DEFAULT_CLIPBOARD_SETTLE_MS: u64 = 50;
pub(crate) const DEFAULT_LOG_FILTER: &str = "lang_switcher=info,lang_switcher_core=info";

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_open_settings_on_start() -> bool {
    DEFAULT_OPEN_SETTINGS_ON_START
}

pub(crate) fn default_clipboard_settle_ms() -> u64 {
    DEFAULT_CLIPBOARD_SETTLE_MS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
