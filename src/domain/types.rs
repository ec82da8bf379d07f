// ==========================================
// 灾害救援物资调度系统 - 领域类型定义
// ==========================================
// 职责: 通行方式、资产类型、物资品类、物资数量向量
// 红线: 通行方式决定资产类型准入,不允许绕过
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 通行方式 (Access Mode)
// ==========================================
// 序列化格式: snake_case (与数据文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    RoadOpen, // 道路畅通
    BoatOnly, // 仅船只可达
    Both,     // 陆路水路均可
}

impl AccessMode {
    /// 判断该通行方式是否允许指定类型的资产进入
    ///
    /// - 卡车: road_open / both
    /// - 船只: boat_only / both
    /// - 其他类型: 一律不允许
    pub fn allows(&self, asset_type: AssetType) -> bool {
        match asset_type {
            AssetType::Truck => matches!(self, AccessMode::RoadOpen | AccessMode::Both),
            AssetType::Boat => matches!(self, AccessMode::BoatOnly | AccessMode::Both),
            AssetType::Other => false,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::RoadOpen => write!(f, "road_open"),
            AccessMode::BoatOnly => write!(f, "boat_only"),
            AccessMode::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "road_open" => Ok(AccessMode::RoadOpen),
            "boat_only" => Ok(AccessMode::BoatOnly),
            "both" => Ok(AccessMode::Both),
            other => Err(format!("未知通行方式: {}", other)),
        }
    }
}

// ==========================================
// 资产类型 (Asset Type)
// ==========================================
// 未知类型反序列化为 Other,不可分配但保留速度默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Truck, // 卡车
    Boat,  // 船只
    #[serde(other)]
    Other, // 其他
}

impl AssetType {
    /// 平均行驶速度 (km/h) 默认值
    pub fn default_speed_kmph(&self) -> f64 {
        match self {
            AssetType::Truck => 35.0,
            AssetType::Boat => 20.0,
            AssetType::Other => 25.0,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Truck => write!(f, "truck"),
            AssetType::Boat => write!(f, "boat"),
            AssetType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truck" => Ok(AssetType::Truck),
            "boat" => Ok(AssetType::Boat),
            _ => Ok(AssetType::Other),
        }
    }
}

// ==========================================
// 物资品类 (Commodity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Food,    // 食品
    Water,   // 饮用水
    Medical, // 医疗物资
}

impl Commodity {
    /// 全部品类 (固定顺序)
    pub const ALL: [Commodity; 3] = [Commodity::Food, Commodity::Water, Commodity::Medical];
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commodity::Food => write!(f, "food"),
            Commodity::Water => write!(f, "water"),
            Commodity::Medical => write!(f, "medical"),
        }
    }
}

// ==========================================
// 物资数量向量 (Supplies)
// ==========================================
// 用途: 需求量 / 库存量 / 运力 / 配送量 统一表达
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supplies {
    #[serde(default)]
    pub food: u32,
    #[serde(default)]
    pub water: u32,
    #[serde(default)]
    pub medical: u32,
}

impl Supplies {
    pub fn new(food: u32, water: u32, medical: u32) -> Self {
        Self {
            food,
            water,
            medical,
        }
    }

    pub fn get(&self, commodity: Commodity) -> u32 {
        match commodity {
            Commodity::Food => self.food,
            Commodity::Water => self.water,
            Commodity::Medical => self.medical,
        }
    }

    pub fn set(&mut self, commodity: Commodity, value: u32) {
        match commodity {
            Commodity::Food => self.food = value,
            Commodity::Water => self.water = value,
            Commodity::Medical => self.medical = value,
        }
    }

    /// 三个品类合计 (u64 防溢出)
    pub fn total(&self) -> u64 {
        self.food as u64 + self.water as u64 + self.medical as u64
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }

    /// 逐品类相加
    pub fn saturating_add(&self, other: &Supplies) -> Supplies {
        Supplies {
            food: self.food.saturating_add(other.food),
            water: self.water.saturating_add(other.water),
            medical: self.medical.saturating_add(other.medical),
        }
    }

    /// 逐品类相减,下限为 0
    pub fn saturating_sub(&self, other: &Supplies) -> Supplies {
        Supplies {
            food: self.food.saturating_sub(other.food),
            water: self.water.saturating_sub(other.water),
            medical: self.medical.saturating_sub(other.medical),
        }
    }
}

impl fmt::Display for Supplies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "food={}, water={}, medical={}",
            self.food, self.water, self.medical
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_mode_gates_asset_types() {
        assert!(AccessMode::RoadOpen.allows(AssetType::Truck));
        assert!(!AccessMode::RoadOpen.allows(AssetType::Boat));
        assert!(AccessMode::BoatOnly.allows(AssetType::Boat));
        assert!(!AccessMode::BoatOnly.allows(AssetType::Truck));
        assert!(AccessMode::Both.allows(AssetType::Truck));
        assert!(AccessMode::Both.allows(AssetType::Boat));
        assert!(!AccessMode::Both.allows(AssetType::Other));
    }

    #[test]
    fn test_unknown_asset_type_deserializes_as_other() {
        let t: AssetType = serde_json::from_str("\"helicopter\"").unwrap();
        assert_eq!(t, AssetType::Other);
        assert_eq!(t.default_speed_kmph(), 25.0);
    }

    #[test]
    fn test_supplies_arithmetic() {
        let a = Supplies::new(10, 5, 0);
        let b = Supplies::new(3, 8, 1);
        assert_eq!(a.saturating_sub(&b), Supplies::new(7, 0, 0));
        assert_eq!(a.saturating_add(&b).total(), 27);
        assert_eq!(a.get(Commodity::Water), 5);
    }
}
