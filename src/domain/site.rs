// ==========================================
// 灾害救援物资调度系统 - 站点领域模型
// ==========================================
// 职责: 需求区 (Zone) 与物资仓库 (Depot)
// 红线: Depot 库存在优化过程中只读,方案不扣减库存
// ==========================================

use crate::domain::types::{AccessMode, Supplies};
use serde::{Deserialize, Serialize};

// ==========================================
// Zone - 需求区
// ==========================================
// 可变字段: access / demand (仅由事件处理器修改)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub zone_id: String,    // 需求区ID
    pub name: String,       // 显示名称
    pub lat: f64,           // 纬度
    pub lon: f64,           // 经度
    pub population: u64,    // 人口
    pub access: AccessMode, // 通行方式
    pub severity: f64,      // 严重程度 [0,1]
    pub demand: Supplies,   // 需求量
}

// ==========================================
// Depot - 物资仓库
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub depot_id: String, // 仓库ID
    pub name: String,     // 显示名称
    pub lat: f64,         // 纬度
    pub lon: f64,         // 经度
    pub stock: Supplies,  // 库存量
}
