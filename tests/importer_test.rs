// ==========================================
// 导入层集成测试
// ==========================================
// 测试目标: 验证 JSON / CSV 数据文件加载与数据质量校验
// 覆盖范围: 快照加载、格式优先级、错误分类
// ==========================================


use relief_alloc::domain::{AccessMode, AssetType, Supplies};
use relief_alloc::importer::{load_assets, load_depots, load_snapshot, load_zones, ImportError};
use tempfile::TempDir;
use test_helpers::{create_csv_data_dir, create_json_data_dir, write_file};

// ==========================================
// 快照加载
// ==========================================

#[test]
fn test_load_snapshot_from_json_dir() {
    test_helpers::init_test_logging();
    let dir = create_json_data_dir().unwrap();
    let snapshot = load_snapshot(dir.path()).unwrap();

    assert_eq!(snapshot.zones.len(), 2);
    assert_eq!(snapshot.depots.len(), 1);
    assert_eq!(snapshot.assets.len(), 2);
    assert_eq!(snapshot.revision, 0);

    let z2 = &snapshot.zones[1];
    assert_eq!(z2.zone_id, "Z2");
    assert_eq!(z2.access, AccessMode::BoatOnly);
    assert_eq!(z2.demand, Supplies::new(10, 10, 2));

    assert_eq!(snapshot.depots[0].stock, Supplies::new(100, 100, 20));

    let b1 = &snapshot.assets[1];
    assert_eq!(b1.asset_type, AssetType::Boat);
    assert_eq!(b1.home_depot, "central warehouse");
    assert_eq!(b1.capacity, Supplies::new(8, 8, 2));
}

#[test]
fn test_csv_and_json_produce_same_snapshot() {
    let json_dir = create_json_data_dir().unwrap();
    let csv_dir = create_csv_data_dir().unwrap();

    let from_json = load_snapshot(json_dir.path()).unwrap();
    let from_csv = load_snapshot(csv_dir.path()).unwrap();

    assert_eq!(from_json.zones, from_csv.zones);
    assert_eq!(from_json.depots, from_csv.depots);
    assert_eq!(from_json.assets, from_csv.assets);
}

#[test]
fn test_json_preferred_over_csv() {
    let dir = create_csv_data_dir().unwrap();
    write_file(
        dir.path(),
        "zones.json",
        r#"{"zones": [{"zone_id": "J1", "name": "Json Zone", "lat": 1.0, "lon": 1.0,
            "population": 10, "access": "both", "severity": 0.1}]}"#,
    )
    .unwrap();

    let snapshot = load_snapshot(dir.path()).unwrap();
    assert_eq!(snapshot.zones.len(), 1);
    assert_eq!(snapshot.zones[0].zone_id, "J1");
    assert_eq!(snapshot.zones[0].demand, Supplies::default());
}

#[test]
fn test_missing_data_file_reported() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "zones.json", test_helpers::ZONES_JSON).unwrap();

    let err = load_snapshot(dir.path()).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(ref p) if p.contains("depots")));
}

// ==========================================
// 单文件加载
// ==========================================

#[test]
fn test_top_level_array_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "depots.json",
        r#"[{"depot_id": "D9", "name": "", "lat": 0.0, "lon": 0.0, "stock_food": 1}]"#,
    )
    .unwrap();

    let depots = load_depots(&path).unwrap();
    assert_eq!(depots[0].name, "D9");
    assert_eq!(depots[0].stock, Supplies::new(1, 0, 0));
}

#[test]
fn test_home_depot_alias_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "assets.csv",
        "asset_id,type,home_depot,cap_food,cap_water,cap_med\nT1,Truck,D1,1,2,3\n",
    )
    .unwrap();

    let assets = load_assets(&path).unwrap();
    assert_eq!(assets[0].asset_type, AssetType::Truck);
    assert_eq!(assets[0].home_depot, "D1");
    assert_eq!(assets[0].capacity, Supplies::new(1, 2, 3));
}

// ==========================================
// 错误分类
// ==========================================

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "zones.xlsx", "binary").unwrap();
    assert!(matches!(load_zones(&path), Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "zones.json", "{ not json").unwrap();
    assert!(matches!(load_zones(&path), Err(ImportError::JsonParseError(_))));
}

#[test]
fn test_missing_section() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "zones.json", r#"{"depots": []}"#).unwrap();
    assert!(matches!(load_zones(&path), Err(ImportError::MissingSection(ref s)) if s == "zones"));
}

#[test]
fn test_severity_out_of_range_in_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "zones.csv",
        "zone_id,name,lat,lon,population,access,severity\nZ1,A,0,0,1,road_open,0.5\nZ2,B,0,0,1,road_open,2.0\n",
    )
    .unwrap();

    match load_zones(&path) {
        Err(ImportError::ValueRangeError { row, field, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "severity");
        }
        other => panic!("期望 ValueRangeError, 实际 {:?}", other.map(|z| z.len())),
    }
}

#[test]
fn test_bad_number_in_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "depots.csv",
        "depot_id,name,lat,lon,stock_food\nD1,A,0,0,lots\n",
    )
    .unwrap();
    assert!(matches!(load_depots(&path), Err(ImportError::CsvParseError(_))));
}

#[test]
fn test_duplicate_zone_id() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "zones.csv",
        "zone_id,name,lat,lon,access\nZ1,A,0,0,both\nZ1,B,0,0,both\n",
    )
    .unwrap();
    assert!(matches!(load_zones(&path), Err(ImportError::DuplicateKey { row: 2, .. })));
}
