// ==========================================
// 灾害救援物资调度系统 - 方案指标引擎
// ==========================================
// 职责: 覆盖率、公平度、ETA 中位数
// 输入: 需求区 (求解时刻的需求量) + 已取整的分配明细
// 输出: Kpis (百分比保留两位小数, ETA 中位数按四舍六入五成双取整)
// ==========================================

use crate::domain::plan::{Assignment, Kpis};
use crate::domain::site::Zone;
use crate::domain::types::{Commodity, Supplies};
use std::collections::HashMap;

// ==========================================
// KpiEngine - 指标引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct KpiEngine {
    // 无状态引擎
}

impl KpiEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算全部指标
    pub fn compute(&self, zones: &[Zone], assignments: &[Assignment]) -> Kpis {
        let etas: Vec<u32> = assignments.iter().map(|a| a.eta_minutes).collect();

        Kpis {
            coverage_percent: round2(self.coverage_percent(zones, assignments)),
            fairness_percent: round2(self.fairness_percent(zones, assignments)),
            median_eta_minutes: median(&etas).round_ties_even() as u32,
        }
    }

    /// 覆盖率 = 100 × 配送总量 / 需求总量 (需求为 0 时返回 0)
    pub fn coverage_percent(&self, zones: &[Zone], assignments: &[Assignment]) -> f64 {
        let total_demand: u64 = zones.iter().map(|z| z.demand.total()).sum();
        if total_demand == 0 {
            return 0.0;
        }

        let total_delivered: u64 = assignments.iter().map(|a| a.load.total()).sum();
        (100.0 * total_delivered as f64 / total_demand as f64).clamp(0.0, 100.0)
    }

    /// 公平度 = 100 - min(100, 100 × 未满足量变异系数), 下限 0
    ///
    /// 未满足总量为 0 时定义为 100
    pub fn fairness_percent(&self, zones: &[Zone], assignments: &[Assignment]) -> f64 {
        let unmet = self.unmet_per_zone(zones, assignments);
        let total_unmet: f64 = unmet.iter().sum();
        if unmet.is_empty() || total_unmet <= 0.0 {
            return 100.0;
        }

        let n = unmet.len() as f64;
        let mean = total_unmet / n;
        let variance = unmet.iter().map(|u| (u - mean).powi(2)).sum::<f64>() / n;
        let cv = variance.sqrt() / mean;

        (100.0 - (cv * 100.0).min(100.0)).max(0.0)
    }

    /// 每个需求区的未满足量 (三品类合计,按需求区顺序)
    pub fn unmet_per_zone(&self, zones: &[Zone], assignments: &[Assignment]) -> Vec<f64> {
        let mut delivered: HashMap<&str, Supplies> = HashMap::new();
        for a in assignments {
            let entry = delivered.entry(a.zone_id.as_str()).or_default();
            *entry = entry.saturating_add(&a.load);
        }

        zones
            .iter()
            .map(|z| {
                let got = delivered.get(z.zone_id.as_str()).copied().unwrap_or_default();
                Commodity::ALL
                    .iter()
                    .map(|&c| z.demand.get(c).saturating_sub(got.get(c)) as f64)
                    .sum()
            })
            .collect()
    }
}

/// 中位数 (偶数个取中间两数平均; 空集返回 0)
pub fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
