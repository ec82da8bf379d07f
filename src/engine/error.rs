// ==========================================
// 灾害救援物资调度系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 求解失败不在此列 (降级为空方案,不向调用方报错)
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 事件目标需求区既不匹配 ID 也不匹配名称
    #[error("需求区未找到: {target}")]
    ZoneNotFound { target: String },

    /// 快照互斥锁中毒
    #[error("快照锁获取失败: {0}")]
    LockPoisoned(String),
}

impl EngineError {
    /// 判断是否为需求区未找到
    pub fn is_zone_not_found(&self) -> bool {
        matches!(self, EngineError::ZoneNotFound { .. })
    }
}
