// ==========================================
// 灾害救援物资调度系统 - 引擎层
// ==========================================
// 职责: 距离模型、归属仓库解析、MIP 分配优化、KPI 计算、事件处理
// 红线: 引擎不做 IO, 输入输出均为领域对象
// ==========================================

pub mod depot_resolver;
pub mod distance;
pub mod error;
pub mod event_processor;
pub mod kpi;
pub mod optimizer;
pub mod rationale;
pub mod solver;

// 重导出核心引擎
pub use depot_resolver::{DepotResolver, ResolutionRule, ResolvedDepot};
pub use distance::{depot_to_zone_km, haversine_km, DistanceTable, EARTH_RADIUS_KM};
pub use error::EngineError;
pub use event_processor::{mutate_zone, EventProcessor, ZoneChange};
pub use kpi::KpiEngine;
pub use optimizer::{eta_minutes, AllocationOptimizer, OptimizerConfig, UnresolvedDepotPolicy};
pub use rationale::{
    NoOpRationaleAnnotator, OptionalAnnotator, RationaleAnnotator, TemplateRationaleAnnotator,
};
pub use solver::{ColumnId, HighsSolver, MipModel, MipSolution, MipSolver, SolveError};
