// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use relief_alloc::config::EngineConfigReader;
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub distance_penalty_weight: f64,
    pub assignment_threshold: f64,
    pub truck_speed_kmph: f64,
    pub boat_speed_kmph: f64,
    pub default_speed_kmph: f64,
    pub unresolved_depot_policy: String,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            distance_penalty_weight: 0.001,
            assignment_threshold: 0.5,
            truck_speed_kmph: 35.0,
            boat_speed_kmph: 20.0,
            default_speed_kmph: 25.0,
            unresolved_depot_policy: "exclude".to_string(),
        }
    }

    /// 归属仓库无法解析时仍允许分配
    pub fn assign_unconstrained() -> Self {
        let mut config = Self::default();
        config.unresolved_depot_policy = "assign_unconstrained".to_string();
        config
    }

    /// 自定义速度
    pub fn with_speeds(truck: f64, boat: f64) -> Self {
        let mut config = Self::default();
        config.truck_speed_kmph = truck;
        config.boat_speed_kmph = boat;
        config
    }
}

impl EngineConfigReader for MockConfig {
    fn get_distance_penalty_weight(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.distance_penalty_weight)
    }

    fn get_assignment_threshold(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.assignment_threshold)
    }

    fn get_truck_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.truck_speed_kmph)
    }

    fn get_boat_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.boat_speed_kmph)
    }

    fn get_default_speed_kmph(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.default_speed_kmph)
    }

    fn get_unresolved_depot_policy(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.unresolved_depot_policy.clone())
    }
}
