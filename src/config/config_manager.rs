// ==========================================
// 灾害救援物资调度系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 配置文件 (key-value, global scope)
// ==========================================

use crate::config::engine_config_trait::EngineConfigReader;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "RELIEF_ALLOC_CONFIG";

/// 默认配置文件路径
///
/// 优先级: 环境变量 RELIEF_ALLOC_CONFIG -> <config_dir>/relief-alloc/config.json
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    dirs::config_dir().map(|d| d.join("relief-alloc").join("config.json"))
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 配置文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径，内容为 JSON 对象 {"key": value}
    ///
    /// # 说明
    /// 非字符串值按 JSON 文本存储（例如 0.001 -> "0.001"）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path.as_ref())?;
        let parsed: HashMap<String, JsonValue> = serde_json::from_str(&raw)?;

        let values = parsed
            .into_iter()
            .map(|(k, v)| {
                let text = match v {
                    JsonValue::String(s) => s,
                    other => other.to_string(),
                };
                (k, text)
            })
            .collect();

        tracing::info!(path = %path.as_ref().display(), "配置文件加载完成");
        Ok(Self::from_map(values))
    }

    /// 从默认路径加载；文件不存在时使用默认配置
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
                Ok(Self::new())
            }
            None => Ok(Self::new()),
        }
    }

    /// 从已有键值表创建
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let values = self.values.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        Ok(values.get(key).cloned())
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取数值配置；格式错误时记录告警并回退默认值
    fn get_f64_or_default(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %value,
                    "数值配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 写入配置值（仅内存，不回写文件）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let mut values = self.values.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let values = self.values.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let sorted: std::collections::BTreeMap<_, _> = values.iter().collect();
        Ok(serde_json::to_string(&json!(sorted))?)
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
impl EngineConfigReader for ConfigManager {
    // ===== 目标函数配置 =====

    fn get_distance_penalty_weight(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::DISTANCE_PENALTY_WEIGHT, 0.001)
    }

    fn get_assignment_threshold(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::ASSIGNMENT_THRESHOLD, 0.5)
    }

    // ===== 速度配置 =====

    fn get_truck_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::TRUCK_SPEED_KMPH, 35.0)
    }

    fn get_boat_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::BOAT_SPEED_KMPH, 20.0)
    }

    fn get_default_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(config_keys::DEFAULT_SPEED_KMPH, 25.0)
    }

    // ===== 数据一致性策略 =====

    fn get_unresolved_depot_policy(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::UNRESOLVED_DEPOT_POLICY, "exclude")
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 目标函数
    pub const DISTANCE_PENALTY_WEIGHT: &str = "distance_penalty_weight";
    pub const ASSIGNMENT_THRESHOLD: &str = "assignment_threshold";

    // 速度 (km/h)
    pub const TRUCK_SPEED_KMPH: &str = "truck_speed_kmph";
    pub const BOAT_SPEED_KMPH: &str = "boat_speed_kmph";
    pub const DEFAULT_SPEED_KMPH: &str = "default_speed_kmph";

    // 归属仓库无法解析时的策略 (exclude / assign_unconstrained)
    pub const UNRESOLVED_DEPOT_POLICY: &str = "unresolved_depot_policy";
}
