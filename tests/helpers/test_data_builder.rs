// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use relief_alloc::domain::{AccessMode, Asset, AssetType, Depot, Supplies, Zone};
use relief_alloc::engine::EARTH_RADIUS_KM;

/// 沿经线向北 `km` 公里对应的纬度差 (度)
pub fn km_north(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

// ==========================================
// Zone 构建器
// ==========================================

pub struct ZoneBuilder {
    zone_id: String,
    name: Option<String>,
    lat: f64,
    lon: f64,
    population: u64,
    access: AccessMode,
    severity: f64,
    demand: Supplies,
}

impl ZoneBuilder {
    pub fn new(zone_id: &str) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            name: None,
            lat: 0.0,
            lon: 0.0,
            population: 1000,
            access: AccessMode::RoadOpen,
            severity: 0.5,
            demand: Supplies::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    pub fn access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    pub fn severity(mut self, severity: f64) -> Self {
        self.severity = severity;
        self
    }

    pub fn demand(mut self, food: u32, water: u32, medical: u32) -> Self {
        self.demand = Supplies::new(food, water, medical);
        self
    }

    pub fn build(self) -> Zone {
        Zone {
            name: self.name.unwrap_or_else(|| self.zone_id.clone()),
            zone_id: self.zone_id,
            lat: self.lat,
            lon: self.lon,
            population: self.population,
            access: self.access,
            severity: self.severity,
            demand: self.demand,
        }
    }
}

// ==========================================
// Depot 构建器
// ==========================================

pub struct DepotBuilder {
    depot_id: String,
    name: Option<String>,
    lat: f64,
    lon: f64,
    stock: Supplies,
}

impl DepotBuilder {
    pub fn new(depot_id: &str) -> Self {
        Self {
            depot_id: depot_id.to_string(),
            name: None,
            lat: 0.0,
            lon: 0.0,
            stock: Supplies::new(1000, 1000, 1000),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    pub fn stock(mut self, food: u32, water: u32, medical: u32) -> Self {
        self.stock = Supplies::new(food, water, medical);
        self
    }

    pub fn build(self) -> Depot {
        Depot {
            name: self.name.unwrap_or_else(|| self.depot_id.clone()),
            depot_id: self.depot_id,
            lat: self.lat,
            lon: self.lon,
            stock: self.stock,
        }
    }
}

// ==========================================
// Asset 构建器
// ==========================================

pub struct AssetBuilder {
    asset_id: String,
    asset_type: AssetType,
    home_depot: String,
    capacity: Supplies,
}

impl AssetBuilder {
    pub fn truck(asset_id: &str, home_depot: &str) -> Self {
        Self::new(asset_id, AssetType::Truck, home_depot)
    }

    pub fn boat(asset_id: &str, home_depot: &str) -> Self {
        Self::new(asset_id, AssetType::Boat, home_depot)
    }

    pub fn new(asset_id: &str, asset_type: AssetType, home_depot: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            asset_type,
            home_depot: home_depot.to_string(),
            capacity: Supplies::new(10, 10, 10),
        }
    }

    pub fn capacity(mut self, food: u32, water: u32, medical: u32) -> Self {
        self.capacity = Supplies::new(food, water, medical);
        self
    }

    pub fn build(self) -> Asset {
        Asset {
            asset_id: self.asset_id,
            asset_type: self.asset_type,
            home_depot: self.home_depot,
            capacity: self.capacity,
        }
    }
}

// ==========================================
// 预置场景
// ==========================================

/// 混合场景: 2 个仓库, 4 个需求区 (含 boat_only / both), 卡车与船只各若干
///
/// 需求总量大于运力总量,保证约束起作用
pub fn mixed_scenario() -> (Vec<Zone>, Vec<Depot>, Vec<Asset>) {
    let zones = vec![
        ZoneBuilder::new("Z1").name("Old Town").at(km_north(8.0), 0.0).demand(30, 20, 5).build(),
        ZoneBuilder::new("Z2")
            .name("Riverside")
            .at(km_north(12.0), 0.05)
            .access(AccessMode::BoatOnly)
            .severity(0.9)
            .demand(25, 30, 10)
            .build(),
        ZoneBuilder::new("Z3")
            .name("Harbor")
            .at(km_north(-5.0), 0.1)
            .access(AccessMode::Both)
            .demand(15, 15, 15)
            .build(),
        ZoneBuilder::new("Z4").name("Hillside").at(km_north(20.0), -0.1).demand(40, 10, 0).build(),
    ];

    let depots = vec![
        DepotBuilder::new("D1").name("Central Warehouse").stock(40, 30, 10).build(),
        DepotBuilder::new("D2").name("Port Store").at(km_north(-3.0), 0.1).stock(20, 25, 20).build(),
    ];

    let assets = vec![
        AssetBuilder::truck("T1", "D1").capacity(20, 10, 5).build(),
        AssetBuilder::truck("T2", "central warehouse").capacity(15, 15, 0).build(),
        AssetBuilder::truck("T3", "D2").capacity(10, 10, 10).build(),
        AssetBuilder::boat("B1", "D2").capacity(12, 12, 6).build(),
        AssetBuilder::boat("B2", " D1 ").capacity(8, 8, 8).build(),
    ];

    (zones, depots, assets)
}
