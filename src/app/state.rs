// ==========================================
// 灾害救援物资调度系统 - 应用状态
// ==========================================
// 职责: 持有共享快照与引擎实例,串行化优化与事件处理
// 红线: 每次"读取-修改-重算-求解"必须在同一次加锁内完成
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ConfigManager, EngineConfigReader};
use crate::domain::event::ReliefEvent;
use crate::domain::plan::Plan;
use crate::domain::snapshot::Snapshot;
use crate::engine::{
    AllocationOptimizer, DistanceTable, EngineError, EventProcessor, OptimizerConfig,
    OptionalAnnotator, TemplateRationaleAnnotator,
};

/// 数据目录环境变量
pub const DATA_DIR_ENV: &str = "RELIEF_ALLOC_DATA_DIR";

/// 应用状态
///
/// 可跨线程共享 (`Arc<AppState>`), 所有操作在快照锁内串行执行
pub struct AppState {
    /// 世界状态快照
    snapshot: Arc<Mutex<Snapshot>>,

    /// 分配优化器
    optimizer: Arc<AllocationOptimizer>,

    /// 事件处理器 (与 optimizer 共享同一实例)
    processor: EventProcessor,

    /// 方案说明标注器
    annotator: OptionalAnnotator,
}

impl AppState {
    /// 使用 HiGHS 后端创建
    pub fn new(snapshot: Snapshot, config: OptimizerConfig) -> Self {
        Self::with_optimizer(snapshot, AllocationOptimizer::with_highs(config))
    }

    /// 使用指定优化器创建 (测试可注入替身求解器)
    pub fn with_optimizer(snapshot: Snapshot, optimizer: AllocationOptimizer) -> Self {
        let optimizer = Arc::new(optimizer);
        tracing::info!(
            zones_count = snapshot.zones.len(),
            depots_count = snapshot.depots.len(),
            assets_count = snapshot.assets.len(),
            "初始化AppState"
        );
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            processor: EventProcessor::new(Arc::clone(&optimizer)),
            optimizer,
            annotator: OptionalAnnotator::with_annotator(Arc::new(TemplateRationaleAnnotator)),
        }
    }

    /// 从配置管理器创建
    ///
    /// # 返回
    /// - Ok(AppState)
    /// - Err(String): 配置解析失败
    pub fn from_config(snapshot: Snapshot, config: &ConfigManager) -> Result<Self, String> {
        let reader: &dyn EngineConfigReader = config;
        let optimizer_config =
            OptimizerConfig::from_reader(reader).map_err(|e| format!("配置解析失败: {}", e))?;
        Ok(Self::new(snapshot, optimizer_config))
    }

    /// 替换方案说明标注器
    pub fn set_annotator(&mut self, annotator: OptionalAnnotator) {
        self.annotator = annotator;
    }

    pub fn optimizer_config(&self) -> &OptimizerConfig {
        self.optimizer.config()
    }

    /// 对当前快照求解
    pub fn run_optimization(&self) -> Result<Plan, EngineError> {
        let guard = self.lock()?;
        let distances = DistanceTable::build(&guard.depots, &guard.zones);
        let mut plan = self
            .optimizer
            .optimize(&guard.zones, &guard.depots, &guard.assets, &distances);
        drop(guard);

        self.annotator.decorate(&mut plan);
        Ok(plan)
    }

    /// 应用事件并返回新方案
    ///
    /// 需求区未找到时快照保持不变
    pub fn apply_event(&self, event: &ReliefEvent) -> Result<Plan, EngineError> {
        let mut guard = self.lock()?;
        let mut plan = self.processor.apply_to_snapshot(&mut guard, event)?;
        tracing::info!(
            revision = guard.revision,
            status = %plan.status,
            assignments_count = plan.assignments.len(),
            "事件处理完成"
        );
        drop(guard);

        self.annotator.decorate(&mut plan);
        Ok(plan)
    }

    /// 当前快照副本
    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>, EngineError> {
        self.snapshot
            .lock()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))
    }
}

/// 获取默认数据目录
///
/// 优先级: 环境变量 RELIEF_ALLOC_DATA_DIR -> <用户数据目录>/relief-alloc -> ./data
pub fn get_default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("relief-alloc"),
        None => PathBuf::from("./data"),
    }
}
