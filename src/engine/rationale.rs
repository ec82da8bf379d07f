// ==========================================
// 灾害救援物资调度系统 - 方案说明标注器
// ==========================================
// 职责: 定义方案说明生成 trait（外部协作方，可接入自然语言生成服务）
// 说明: 优化器不依赖标注结果；标注失败只记录日志，不影响方案
// ==========================================

use crate::domain::plan::Plan;
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 标注器 Trait
// ==========================================

/// 方案说明标注器 Trait
///
/// 输入已计算的方案，返回说明文本（概念上每个分配一条）
pub trait RationaleAnnotator: Send + Sync {
    fn annotate(&self, plan: &Plan) -> Result<Vec<String>, Box<dyn Error + Send + Sync>>;
}

/// 空操作标注器
///
/// 用于不需要说明文本的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpRationaleAnnotator;

impl RationaleAnnotator for NoOpRationaleAnnotator {
    fn annotate(&self, plan: &Plan) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            assignments_count = plan.assignments.len(),
            "NoOpRationaleAnnotator: 跳过说明生成"
        );
        Ok(Vec::new())
    }
}

/// 模板标注器
///
/// 每个分配生成一条固定格式说明
#[derive(Debug, Clone, Default)]
pub struct TemplateRationaleAnnotator;

impl RationaleAnnotator for TemplateRationaleAnnotator {
    fn annotate(&self, plan: &Plan) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        Ok(plan
            .assignments
            .iter()
            .map(|a| {
                format!(
                    "Assignment of asset {} to zone {} based on proximity and demand ({}; ETA {} min)",
                    a.asset_id, a.zone_id, a.load, a.eta_minutes
                )
            })
            .collect())
    }
}

/// 可选的标注器包装
///
/// 简化 Option<Arc<dyn RationaleAnnotator>> 的使用
#[derive(Clone, Default)]
pub struct OptionalAnnotator {
    inner: Option<Arc<dyn RationaleAnnotator>>,
}

impl OptionalAnnotator {
    pub fn with_annotator(annotator: Arc<dyn RationaleAnnotator>) -> Self {
        Self {
            inner: Some(annotator),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 为方案填充说明文本
    ///
    /// 标注器缺失或失败时保持 rationales 为空
    pub fn decorate(&self, plan: &mut Plan) {
        let Some(annotator) = &self.inner else {
            return;
        };

        match annotator.annotate(plan) {
            Ok(rationales) => plan.rationales = rationales,
            Err(e) => {
                tracing::warn!(error = %e, "方案说明生成失败，忽略");
                plan.rationales.clear();
            }
        }
    }
}
