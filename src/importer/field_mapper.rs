// ==========================================
// 灾害救援物资调度系统 - 字段映射器
// ==========================================
// 职责: 扁平数据记录 → 领域对象 + 数据质量校验
// 说明: JSON 与 CSV 共用同一套扁平记录格式
//   zone : zone_id,name,lat,lon,population,access,severity,demand_food,demand_water,demand_med
//   depot: depot_id,name,lat,lon,stock_food,stock_water,stock_med
//   asset: asset_id,type,start_depot,cap_food,cap_water,cap_med
// ==========================================

use crate::domain::asset::Asset;
use crate::domain::site::{Depot, Zone};
use crate::domain::types::{AccessMode, AssetType, Supplies};
use crate::importer::error::{ImportError, ImportResult};
use serde::Deserialize;

// ==========================================
// 扁平记录定义
// ==========================================

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecord {
    pub zone_id: String,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub population: u64,
    pub access: String,
    #[serde(default)]
    pub severity: f64,
    #[serde(default)]
    pub demand_food: u32,
    #[serde(default)]
    pub demand_water: u32,
    #[serde(default, alias = "demand_medical")]
    pub demand_med: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepotRecord {
    pub depot_id: String,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub stock_food: u32,
    #[serde(default)]
    pub stock_water: u32,
    #[serde(default, alias = "stock_medical")]
    pub stock_med: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    pub asset_id: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(alias = "home_depot")]
    pub start_depot: String,
    #[serde(default)]
    pub cap_food: u32,
    #[serde(default)]
    pub cap_water: u32,
    #[serde(default, alias = "cap_medical")]
    pub cap_med: u32,
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 映射需求区记录
    ///
    /// # 校验
    /// - zone_id 非空
    /// - 坐标有限且在经纬度范围内
    /// - severity ∈ [0, 1]
    /// - access 为 road_open / boat_only / both
    pub fn map_zone(&self, record: ZoneRecord, row: usize) -> ImportResult<Zone> {
        let zone_id = require_key(&record.zone_id, "zone_id", row)?;
        check_coordinates(record.lat, record.lon, row)?;
        check_range("severity", record.severity, 0.0, 1.0, row)?;

        let access: AccessMode = record.access.parse().map_err(|_| ImportError::InvalidValue {
            row,
            field: "access".to_string(),
            value: record.access.clone(),
        })?;

        // 名称缺省时沿用 ID
        let name = fallback_name(record.name, &zone_id);

        Ok(Zone {
            zone_id,
            name,
            lat: record.lat,
            lon: record.lon,
            population: record.population,
            access,
            severity: record.severity,
            demand: Supplies::new(record.demand_food, record.demand_water, record.demand_med),
        })
    }

    /// 映射仓库记录
    pub fn map_depot(&self, record: DepotRecord, row: usize) -> ImportResult<Depot> {
        let depot_id = require_key(&record.depot_id, "depot_id", row)?;
        check_coordinates(record.lat, record.lon, row)?;
        let name = fallback_name(record.name, &depot_id);

        Ok(Depot {
            depot_id,
            name,
            lat: record.lat,
            lon: record.lon,
            stock: Supplies::new(record.stock_food, record.stock_water, record.stock_med),
        })
    }

    /// 映射资产记录
    ///
    /// 未知资产类型映射为 other (保留,不可分配); start_depot 原样保留,由优化器解析
    pub fn map_asset(&self, record: AssetRecord, row: usize) -> ImportResult<Asset> {
        let asset_id = require_key(&record.asset_id, "asset_id", row)?;
        let asset_type: AssetType = record
            .asset_type
            .parse()
            .unwrap_or(AssetType::Other);
        if asset_type == AssetType::Other {
            tracing::warn!(
                row = row,
                asset_id = %asset_id,
                raw_type = %record.asset_type,
                "未知资产类型，按 other 处理"
            );
        }

        Ok(Asset {
            asset_id,
            asset_type,
            home_depot: record.start_depot,
            capacity: Supplies::new(record.cap_food, record.cap_water, record.cap_med),
        })
    }
}

// ==========================================
// 校验辅助函数
// ==========================================

fn require_key(value: &str, field: &str, row: usize) -> ImportResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ImportError::PrimaryKeyMissing {
            row,
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn fallback_name(name: String, id: &str) -> String {
    if name.trim().is_empty() {
        id.to_string()
    } else {
        name
    }
}

fn check_coordinates(lat: f64, lon: f64, row: usize) -> ImportResult<()> {
    check_range("lat", lat, -90.0, 90.0, row)?;
    check_range("lon", lon, -180.0, 180.0, row)
}

fn check_range(field: &str, value: f64, min: f64, max: f64, row: usize) -> ImportResult<()> {
    // NaN 比较恒为 false,需单独判断
    if !value.is_finite() || value < min || value > max {
        return Err(ImportError::ValueRangeError {
            row,
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
