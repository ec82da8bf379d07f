// ==========================================
// 灾害救援物资调度系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod asset;
pub mod event;
pub mod plan;
pub mod site;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use asset::Asset;
pub use event::{DemandOverride, ReliefEvent};
pub use plan::{Assignment, Kpis, Plan, PlanStatus};
pub use site::{Depot, Zone};
pub use snapshot::Snapshot;
pub use types::{AccessMode, AssetType, Commodity, Supplies};
