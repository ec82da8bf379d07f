// ==========================================
// 灾害救援物资调度系统 - 导入层
// ==========================================
// 职责: 外部数据文件导入,生成领域对象
// 支持: JSON, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{AssetRecord, DepotRecord, FieldMapper, ZoneRecord};
pub use file_parser::{load_assets, load_depots, load_snapshot, load_zones, FileFormat};
