// ==========================================
// 灾害救援物资调度系统 - 外部事件领域模型
// ==========================================
// 职责: 定义触发重新优化的外部事件
// 说明: 每种事件一个变体,负载字段强类型
// ==========================================

use crate::domain::types::{AccessMode, Supplies};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 需求覆写 (sos_spike 事件负载)
///
/// 提供的字段覆盖需求区当前需求量,未提供的字段保持不变
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandOverride {
    #[serde(default)]
    pub food_demand: Option<u32>,
    #[serde(default)]
    pub water_demand: Option<u32>,
    #[serde(default)]
    pub medical_demand: Option<u32>,
}

impl DemandOverride {
    /// 应用到当前需求量,返回新需求量
    pub fn apply_to(&self, current: &Supplies) -> Supplies {
        Supplies {
            food: self.food_demand.unwrap_or(current.food),
            water: self.water_demand.unwrap_or(current.water),
            medical: self.medical_demand.unwrap_or(current.medical),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.food_demand.is_none() && self.water_demand.is_none() && self.medical_demand.is_none()
    }
}

// ==========================================
// ReliefEvent - 救援事件
// ==========================================
// 序列化格式: {"type": "road_block", "target_zone": "Z1", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReliefEvent {
    /// 道路阻断 (默认改为 boat_only)
    RoadBlock {
        target_zone: String,
        #[serde(default)]
        new_access: Option<AccessMode>,
    },
    /// 道路恢复 (默认改为 road_open)
    RoadClear {
        target_zone: String,
        #[serde(default)]
        new_access: Option<AccessMode>,
    },
    /// 求救激增 (按字段覆写需求量)
    SosSpike {
        target_zone: String,
        #[serde(flatten)]
        demand: DemandOverride,
    },
}

impl ReliefEvent {
    /// 目标需求区引用 (ID 或名称)
    pub fn target_zone(&self) -> &str {
        match self {
            ReliefEvent::RoadBlock { target_zone, .. }
            | ReliefEvent::RoadClear { target_zone, .. }
            | ReliefEvent::SosSpike { target_zone, .. } => target_zone,
        }
    }

    /// 事件类型标识
    pub fn kind(&self) -> &'static str {
        match self {
            ReliefEvent::RoadBlock { .. } => "road_block",
            ReliefEvent::RoadClear { .. } => "road_clear",
            ReliefEvent::SosSpike { .. } => "sos_spike",
        }
    }
}

impl fmt::Display for ReliefEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.target_zone())
    }
}
