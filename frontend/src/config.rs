//! 编译期配置
//!
//! 通过 `option_env!` 在构建时写入，后端地址不接受用户输入。
//! 未设置的变量使用下面的默认值。

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_STORAGE_KEY: &str = "omnichat:auth-storage";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端地址，不带末尾斜杠
    pub api_base_url: String,
    /// 保存会话的 localStorage 键
    pub storage_key: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("OMNICHAT_API_URL"),
            option_env!("OMNICHAT_STORAGE_KEY"),
            option_env!("OMNICHAT_LOG"),
        )
    }

    fn from_values(api_url: Option<&str>, storage_key: Option<&str>, log: Option<&str>) -> Self {
        let api_base_url = api_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();

        let storage_key = storage_key
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_STORAGE_KEY)
            .to_string();

        let log_level = log
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            storage_key,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}
