// ==========================================
// 灾害救援物资调度系统 - 运输资产领域模型
// ==========================================
// 职责: 卡车/船只等运输资产
// 说明: home_depot 可以是仓库ID,也可以是仓库名称 (由 DepotResolver 解析)
// ==========================================

use crate::domain::types::{AssetType, Supplies};
use serde::{Deserialize, Serialize};

// ==========================================
// Asset - 运输资产
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: String,      // 资产ID
    #[serde(rename = "type")]
    pub asset_type: AssetType, // 资产类型
    pub home_depot: String,    // 归属仓库引用 (ID 或名称)
    pub capacity: Supplies,    // 单次运力
}
