use std::sync::{Arc, OnceLock};

use super::StaticConfig;

/// 启动时加载一次，运行期间不重载
static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::default()))
        .clone()
}

/// Initialize the global configuration from "config.toml"
///
/// If the file doesn't exist, uses in-memory defaults.
///
/// # Examples
/// ```no_run
/// use linkhub::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(StaticConfig::DEFAULT_PATH);
}

/// Initialize the global configuration from an explicit TOML path
///
/// Later calls are ignored once the configuration is set.
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load_from(path)));
}
