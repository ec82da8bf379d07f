// ==========================================
// 灾害救援物资调度系统 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义优化引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 用途: 优化器参数解析
// 实现者: ConfigManager（从 JSON 配置文件读取）
pub trait EngineConfigReader: Send + Sync {
    // ===== 目标函数配置 =====

    /// 获取距离惩罚权重
    ///
    /// # 默认值
    /// - 0.001（每公里）
    fn get_distance_penalty_weight(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取分配判定阈值（0/1 变量取整阈值）
    ///
    /// # 默认值
    /// - 0.5
    fn get_assignment_threshold(&self) -> Result<f64, Box<dyn Error>>;

    // ===== 速度配置 =====

    /// 获取卡车速度 (km/h)
    ///
    /// # 默认值
    /// - 35
    fn get_truck_speed_kmph(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取船只速度 (km/h)
    ///
    /// # 默认值
    /// - 20
    fn get_boat_speed_kmph(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取其他类型资产速度 (km/h)
    ///
    /// # 默认值
    /// - 25
    fn get_default_speed_kmph(&self) -> Result<f64, Box<dyn Error>>;

    // ===== 数据一致性策略 =====

    /// 获取归属仓库无法解析时的处理策略
    ///
    /// # 返回
    /// - "exclude": 资产不参与分配
    /// - "assign_unconstrained": 资产可分配,但不受仓库库存约束
    ///
    /// # 默认值
    /// - exclude
    fn get_unresolved_depot_policy(&self) -> Result<String, Box<dyn Error>>;
}
