// ==========================================
// 灾害救援物资调度系统 - 调度方案领域模型
// ==========================================
// 职责: 分配明细 (Assignment)、指标 (Kpis)、调度方案 (Plan)
// 红线: 每个资产在一个方案中最多出现一次
// ==========================================

use crate::domain::types::Supplies;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Assignment - 分配明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub asset_id: String, // 资产ID
    pub zone_id: String,  // 目标需求区ID
    pub load: Supplies,   // 配送量 (整数)
    pub eta_minutes: u32, // 预计到达时间 (分钟)
}

// ==========================================
// Kpis - 方案指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub coverage_percent: f64,   // 覆盖率 [0,100]
    pub fairness_percent: f64,   // 公平度 [0,100]
    pub median_eta_minutes: u32, // ETA 中位数 (分钟)
}

impl Kpis {
    /// 全零指标 (求解失败时使用)
    pub fn zero() -> Self {
        Self {
            coverage_percent: 0.0,
            fairness_percent: 0.0,
            median_eta_minutes: 0,
        }
    }
}

// ==========================================
// 方案状态 (Plan Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Solved,   // 求解成功
    Idle,     // 无资产或无需求区,未调用求解器
    Degraded, // 求解器不可用或无可行解,降级为空方案
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Solved => write!(f, "solved"),
            PlanStatus::Idle => write!(f, "idle"),
            PlanStatus::Degraded => write!(f, "degraded"),
        }
    }
}

// ==========================================
// Plan - 调度方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub status: PlanStatus,              // 方案状态
    pub assignments: Vec<Assignment>,    // 分配明细
    pub kpis: Kpis,                      // 指标
    #[serde(default)]
    pub rationales: Vec<String>,         // 说明文本 (由外部标注器填充)
    #[serde(default)]
    pub unresolved_assets: Vec<String>,  // 归属仓库无法解析的资产
}

impl Plan {
    /// 空输入方案: 覆盖率 0,公平度 100,ETA 0
    pub fn idle(unresolved_assets: Vec<String>) -> Self {
        Self {
            status: PlanStatus::Idle,
            assignments: Vec::new(),
            kpis: Kpis {
                coverage_percent: 0.0,
                fairness_percent: 100.0,
                median_eta_minutes: 0,
            },
            rationales: Vec::new(),
            unresolved_assets,
        }
    }

    /// 降级空方案: 全部指标为 0
    pub fn degraded(unresolved_assets: Vec<String>) -> Self {
        Self {
            status: PlanStatus::Degraded,
            assignments: Vec::new(),
            kpis: Kpis::zero(),
            rationales: Vec::new(),
            unresolved_assets,
        }
    }

    /// 判断是否为空方案
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// 全部分配的配送量合计
    pub fn total_delivered(&self) -> Supplies {
        self.assignments
            .iter()
            .fold(Supplies::default(), |acc, a| acc.saturating_add(&a.load))
    }
}
