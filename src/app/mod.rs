// ==========================================
// 灾害救援物资调度系统 - 应用层
// ==========================================
// 职责: 串联快照、优化器与事件处理器,供 CLI 或服务层调用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_data_dir, AppState, DATA_DIR_ENV};
