//! 运行配置：存储文件位置、存储键名与日志级别

use std::path::PathBuf;

/// 运行配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    /// 键值槽文件路径
    pub data_path: PathBuf,
    /// 成绩库键名
    pub db_key: String,
    /// 主题偏好键名
    pub theme_key: String,
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("rskeycat_store.json"),
            db_key: "rskeycat_db".to_string(),
            theme_key: "dark_mode".to_string(),
            verbose: false,
        }
    }
}

impl GlobalConfig {
    /// 从默认值开始构建
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: GlobalConfig::default(),
        }
    }

    /// 未设置 RUST_LOG 时使用的日志级别
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// 配置构建器，未设置的项保持默认值
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: GlobalConfig,
}

impl ConfigBuilder {
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    pub fn db_key(mut self, key: impl Into<String>) -> Self {
        self.config.db_key = key.into();
        self
    }

    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.config.theme_key = key.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = GlobalConfig::builder()
            .data_path("/tmp/store.json")
            .db_key("db")
            .verbose(true)
            .build();

        assert_eq!(config.data_path, PathBuf::from("/tmp/store.json"));
        assert_eq!(config.db_key, "db");
        assert_eq!(config.theme_key, "dark_mode");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(GlobalConfig::default().log_level(), "info");
    }
}
