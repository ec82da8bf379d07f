// ==========================================
// 灾害救援物资调度系统 - 距离模型
// ==========================================
// 职责: 球面大圆距离 + 仓库×需求区距离表
// 说明: 不做坐标校验 (校验在导入层),无副作用
// ==========================================

use crate::domain::site::{Depot, Zone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 地球半径 (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 计算两点间大圆距离 (haversine 公式)
///
/// # 参数
/// - lat1/lon1, lat2/lon2: 十进制度
///
/// # 返回
/// 距离 (km)
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// 仓库到需求区的直线距离
pub fn depot_to_zone_km(depot: &Depot, zone: &Zone) -> f64 {
    haversine_km(depot.lat, depot.lon, zone.lat, zone.lon)
}

// ==========================================
// DistanceTable - 距离表
// ==========================================
// 结构: depot_id -> zone_id -> km
// 每次优化都重建,不跨事件缓存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceTable {
    table: HashMap<String, HashMap<String, f64>>,
}

impl DistanceTable {
    /// 构建完整距离表 (每个仓库 × 每个需求区)
    pub fn build(depots: &[Depot], zones: &[Zone]) -> Self {
        let table = depots
            .iter()
            .map(|depot| {
                let row = zones
                    .iter()
                    .map(|zone| (zone.zone_id.clone(), depot_to_zone_km(depot, zone)))
                    .collect();
                (depot.depot_id.clone(), row)
            })
            .collect();

        Self { table }
    }

    /// 查询距离,缺失返回 None
    pub fn get(&self, depot_id: &str, zone_id: &str) -> Option<f64> {
        self.table.get(depot_id).and_then(|row| row.get(zone_id)).copied()
    }

    /// 直接写入一条距离 (外部提供的距离表)
    pub fn insert(&mut self, depot_id: &str, zone_id: &str, km: f64) {
        self.table
            .entry(depot_id.to_string())
            .or_default()
            .insert(zone_id.to_string(), km);
    }

    /// 距离条目总数
    pub fn len(&self) -> usize {
        self.table.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AccessMode, Supplies};

    fn depot(id: &str, lat: f64, lon: f64) -> Depot {
        Depot {
            depot_id: id.to_string(),
            name: format!("Depot {}", id),
            lat,
            lon,
            stock: Supplies::default(),
        }
    }

    fn zone(id: &str, lat: f64, lon: f64) -> Zone {
        Zone {
            zone_id: id.to_string(),
            name: format!("Zone {}", id),
            lat,
            lon,
            population: 0,
            access: AccessMode::Both,
            severity: 0.5,
            demand: Supplies::default(),
        }
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_km(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        // 1° 纬度 ≈ 111.19 km
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "d={}", d);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = haversine_km(13.08, 80.27, 12.97, 77.59);
        let b = haversine_km(12.97, 77.59, 13.08, 80.27);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_table_is_complete() {
        let depots = vec![depot("D1", 0.0, 0.0), depot("D2", 1.0, 1.0)];
        let zones = vec![zone("Z1", 0.0, 0.1), zone("Z2", 0.5, 0.5), zone("Z3", 2.0, 2.0)];

        let table = DistanceTable::build(&depots, &zones);
        assert_eq!(table.len(), 6);
        for d in &depots {
            for z in &zones {
                let km = table.get(&d.depot_id, &z.zone_id).unwrap();
                assert!((km - depot_to_zone_km(d, z)).abs() < 1e-9);
            }
        }
        assert_eq!(table.get("D9", "Z1"), None);
    }
}
