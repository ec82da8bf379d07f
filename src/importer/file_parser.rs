// ==========================================
// 灾害救援物资调度系统 - 文件解析器实现
// ==========================================
// 职责: 按扩展名读取 JSON / CSV 数据文件,映射为领域对象
// 支持: JSON (.json, 顶层 {"zones": [...]} 或数组) / CSV (.csv, 带表头)
// ==========================================

use crate::domain::asset::Asset;
use crate::domain::site::{Depot, Zone};
use crate::domain::snapshot::Snapshot;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{AssetRecord, DepotRecord, FieldMapper, ZoneRecord};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 数据文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// 根据扩展名识别格式 (忽略大小写)
    pub fn detect(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(FileFormat::Json),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

// ==========================================
// 通用记录读取
// ==========================================

/// 读取扁平记录
///
/// # 参数
/// - `path`: 文件路径
/// - `section`: JSON 顶层字段名 ("zones" / "depots" / "assets")
fn read_records<T: DeserializeOwned>(path: &Path, section: &str) -> ImportResult<Vec<T>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    match FileFormat::detect(path)? {
        FileFormat::Json => read_json_records(path, section),
        FileFormat::Csv => read_csv_records(path),
    }
}

fn read_json_records<T: DeserializeOwned>(path: &Path, section: &str) -> ImportResult<Vec<T>> {
    let text = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&text)?;

    let items = match root {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove(section)
            .ok_or_else(|| ImportError::MissingSection(section.to_string()))?,
        _ => return Err(ImportError::MissingSection(section.to_string())),
    };

    Ok(serde_json::from_value(items)?)
}

fn read_csv_records<T: DeserializeOwned>(path: &Path) -> ImportResult<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// 同批次内主键不得重复
fn ensure_unique<'a, I>(keys: I) -> ImportResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for (idx, key) in keys.into_iter().enumerate() {
        if !seen.insert(key) {
            return Err(ImportError::DuplicateKey {
                row: idx + 1,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

// ==========================================
// 公共加载入口
// ==========================================

/// 加载需求区
pub fn load_zones<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Zone>> {
    let path = path.as_ref();
    let records: Vec<ZoneRecord> = read_records(path, "zones")?;
    let zones = records
        .into_iter()
        .enumerate()
        .map(|(idx, r)| FieldMapper.map_zone(r, idx + 1))
        .collect::<ImportResult<Vec<_>>>()?;
    ensure_unique(zones.iter().map(|z| z.zone_id.as_str()))?;

    tracing::info!(path = %path.display(), zones_count = zones.len(), "需求区加载完成");
    Ok(zones)
}

/// 加载仓库
pub fn load_depots<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Depot>> {
    let path = path.as_ref();
    let records: Vec<DepotRecord> = read_records(path, "depots")?;
    let depots = records
        .into_iter()
        .enumerate()
        .map(|(idx, r)| FieldMapper.map_depot(r, idx + 1))
        .collect::<ImportResult<Vec<_>>>()?;
    ensure_unique(depots.iter().map(|d| d.depot_id.as_str()))?;

    tracing::info!(path = %path.display(), depots_count = depots.len(), "仓库加载完成");
    Ok(depots)
}

/// 加载运输资产
pub fn load_assets<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Asset>> {
    let path = path.as_ref();
    let records: Vec<AssetRecord> = read_records(path, "assets")?;
    let assets = records
        .into_iter()
        .enumerate()
        .map(|(idx, r)| FieldMapper.map_asset(r, idx + 1))
        .collect::<ImportResult<Vec<_>>>()?;
    ensure_unique(assets.iter().map(|a| a.asset_id.as_str()))?;

    tracing::info!(path = %path.display(), assets_count = assets.len(), "运输资产加载完成");
    Ok(assets)
}

/// 在目录中定位数据文件 (JSON 优先于 CSV)
fn locate(dir: &Path, stem: &str) -> ImportResult<PathBuf> {
    ["json", "csv"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|p| p.exists())
        .ok_or_else(|| ImportError::FileNotFound(dir.join(format!("{}.json", stem)).display().to_string()))
}

/// 从目录加载完整快照
///
/// 目录需包含 zones / depots / assets 三个数据文件
pub fn load_snapshot<P: AsRef<Path>>(dir: P) -> ImportResult<Snapshot> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ImportError::FileNotFound(dir.display().to_string()));
    }

    let zones = load_zones(locate(dir, "zones")?)?;
    let depots = load_depots(locate(dir, "depots")?)?;
    let assets = load_assets(locate(dir, "assets")?)?;

    Ok(Snapshot::new(zones, depots, assets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(FileFormat::detect(Path::new("a/zones.JSON")).unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::detect(Path::new("zones.csv")).unwrap(), FileFormat::Csv);
        assert!(matches!(
            FileFormat::detect(Path::new("zones.xlsx")),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_ensure_unique_reports_row() {
        let err = ensure_unique(["Z1", "Z2", "Z1"]).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateKey { row: 3, .. }));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_zones("/definitely/not/here/zones.json"),
            Err(ImportError::FileNotFound(_))
        ));
    }
}
