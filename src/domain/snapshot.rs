// ==========================================
// 灾害救援物资调度系统 - 世界状态快照
// ==========================================
// 职责: 聚合 zones / depots / assets,记录修订号
// 说明: 由应用层持有,事件处理器在互斥范围内原地修改
// ==========================================

use crate::domain::asset::Asset;
use crate::domain::site::{Depot, Zone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub zones: Vec<Zone>,
    pub depots: Vec<Depot>,
    pub assets: Vec<Asset>,
    pub revision: u64,             // 修订号 (每应用一个事件 +1)
    pub updated_at: DateTime<Utc>, // 最后修改时间
}

impl Snapshot {
    pub fn new(zones: Vec<Zone>, depots: Vec<Depot>, assets: Vec<Asset>) -> Self {
        Self {
            zones,
            depots,
            assets,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    /// 标记一次修改
    pub fn touch(&mut self) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = Utc::now();
    }

    /// 按 ID 或名称查找需求区
    pub fn find_zone(&self, target: &str) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|z| z.zone_id == target)
            .or_else(|| self.zones.iter().find(|z| z.name == target))
    }
}
