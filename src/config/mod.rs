// ==========================================
// 灾害救援物资调度系统 - 配置层
// ==========================================
// 职责: 系统配置管理,缺省值兜底
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod engine_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use engine_config_trait::EngineConfigReader;
