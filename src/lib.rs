// ==========================================
// 灾害救援物资调度系统 - 核心库
// ==========================================
// 技术栈: Rust + HiGHS (MIP)
// 系统定位: 决策支持系统 (方案供调度人员确认后执行)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 距离/优化/KPI/事件
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AccessMode, Asset, AssetType, Assignment, Commodity, DemandOverride, Depot, Kpis, Plan,
    PlanStatus, ReliefEvent, Snapshot, Supplies, Zone,
};

// 引擎
pub use engine::{
    AllocationOptimizer, DepotResolver, DistanceTable, EngineError, EventProcessor, KpiEngine,
    OptimizerConfig, UnresolvedDepotPolicy,
};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "灾害救援物资调度系统";
