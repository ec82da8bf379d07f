// ==========================================
// 灾害救援物资调度系统 - 资产分配优化引擎
// ==========================================
// 职责: 构建并求解资产→需求区分配 MIP,生成调度方案
// 红线: 通行方式/运力/需求量/仓库库存 四类约束必须全部编码
// ==========================================
// 模型:
// - y[a,z] ∈ {0,1}: 资产 a 是否派往需求区 z (通行不兼容时固定为 0)
// - l[a,z,c] ≥ 0  : 资产 a 向 z 配送品类 c 的量 (连续松弛)
// - Σ_z y[a,z] ≤ 1
// - l[a,z,c] ≤ cap[a,c] · y[a,z]
// - Σ_a l[a,z,c] ≤ demand[z,c]
// - Σ_{a∈depot} Σ_z l[a,z,c] ≤ stock[depot,c]
// 目标: max Σ l - w · Σ dist[a,z] · y[a,z]
// ==========================================

use crate::config::EngineConfigReader;
use crate::domain::asset::Asset;
use crate::domain::plan::{Assignment, Plan, PlanStatus};
use crate::domain::site::{Depot, Zone};
use crate::domain::types::{AssetType, Commodity, Supplies};
use crate::engine::depot_resolver::{DepotResolver, ResolvedDepot};
use crate::engine::distance::{depot_to_zone_km, DistanceTable};
use crate::engine::kpi::KpiEngine;
use crate::engine::solver::{ColumnId, HighsSolver, MipModel, MipSolution, MipSolver};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// 归属仓库无法解析时的处理策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedDepotPolicy {
    /// 资产不参与分配
    #[default]
    Exclude,
    /// 资产可分配,不计入任何仓库库存约束,距离按 0 处理
    AssignUnconstrained,
}

impl fmt::Display for UnresolvedDepotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedDepotPolicy::Exclude => write!(f, "exclude"),
            UnresolvedDepotPolicy::AssignUnconstrained => write!(f, "assign_unconstrained"),
        }
    }
}

impl std::str::FromStr for UnresolvedDepotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclude" => Ok(UnresolvedDepotPolicy::Exclude),
            "assign_unconstrained" => Ok(UnresolvedDepotPolicy::AssignUnconstrained),
            other => Err(format!("未知的归属仓库策略: {}", other)),
        }
    }
}

// ==========================================
// OptimizerConfig - 优化器配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    pub distance_penalty_weight: f64, // 距离惩罚权重 (每公里): 0.001
    pub assignment_threshold: f64,    // y 取整阈值: 0.5
    pub truck_speed_kmph: f64,        // 卡车速度: 35
    pub boat_speed_kmph: f64,         // 船只速度: 20
    pub default_speed_kmph: f64,      // 其他资产速度: 25
    pub unresolved_depot_policy: UnresolvedDepotPolicy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            distance_penalty_weight: 0.001,
            assignment_threshold: 0.5,
            truck_speed_kmph: AssetType::Truck.default_speed_kmph(),
            boat_speed_kmph: AssetType::Boat.default_speed_kmph(),
            default_speed_kmph: AssetType::Other.default_speed_kmph(),
            unresolved_depot_policy: UnresolvedDepotPolicy::default(),
        }
    }
}

impl OptimizerConfig {
    /// 从配置读取器解析
    pub fn from_reader(reader: &dyn EngineConfigReader) -> Result<Self, Box<dyn Error>> {
        let policy_raw = reader.get_unresolved_depot_policy()?;
        let unresolved_depot_policy = policy_raw.parse().unwrap_or_else(|e: String| {
            warn!(raw_value = %policy_raw, error = %e, "归属仓库策略配置无效，使用 exclude");
            UnresolvedDepotPolicy::Exclude
        });

        let defaults = Self::default();

        let weight_raw = reader.get_distance_penalty_weight()?;
        let distance_penalty_weight = if weight_raw.is_finite() && weight_raw >= 0.0 {
            weight_raw
        } else {
            warn!(raw_value = weight_raw, "距离惩罚权重配置无效，使用默认值");
            defaults.distance_penalty_weight
        };

        let threshold_raw = reader.get_assignment_threshold()?;
        let assignment_threshold = if threshold_raw > 0.0 && threshold_raw <= 1.0 {
            threshold_raw
        } else {
            warn!(raw_value = threshold_raw, "分配阈值配置无效 (应在 (0, 1] 内)，使用默认值");
            defaults.assignment_threshold
        };

        Ok(Self {
            distance_penalty_weight,
            assignment_threshold,
            truck_speed_kmph: reader.get_truck_speed_kmph()?,
            boat_speed_kmph: reader.get_boat_speed_kmph()?,
            default_speed_kmph: reader.get_default_speed_kmph()?,
            unresolved_depot_policy,
        })
    }

    /// 资产速度 (km/h); 配置值非正时回退到类型默认值
    pub fn speed_kmph(&self, asset_type: AssetType) -> f64 {
        let configured = match asset_type {
            AssetType::Truck => self.truck_speed_kmph,
            AssetType::Boat => self.boat_speed_kmph,
            AssetType::Other => self.default_speed_kmph,
        };
        if configured > 0.0 {
            configured
        } else {
            asset_type.default_speed_kmph()
        }
    }
}

/// 根据距离与速度计算 ETA (分钟)
///
/// 距离大于 0 时至少 1 分钟
pub fn eta_minutes(distance_km: f64, speed_kmph: f64) -> u32 {
    if distance_km <= 0.0 || speed_kmph <= 0.0 {
        return 0;
    }
    let minutes = (distance_km / speed_kmph * 60.0).round() as u32;
    minutes.max(1)
}

/// 目标函数实际使用的距离惩罚权重
///
/// 单个配送单位的收益为 1, 权重 × 最远距离必须小于 1,
/// 否则远距离需求区宁可不配送
fn effective_penalty_weight(configured: f64, max_dist_km: f64) -> f64 {
    if max_dist_km <= 0.0 {
        return configured;
    }
    configured.min(1.0 / (max_dist_km + 1.0))
}

/// 单个 (资产, 需求区) 组合的决策变量
#[derive(Debug, Clone, Copy)]
struct PairColumns {
    assign: ColumnId,
    loads: [ColumnId; 3],
}

/// 取整后、校正前的分配草稿
#[derive(Debug, Clone)]
struct DraftAssignment {
    asset_idx: usize,
    zone_idx: usize,
    depot_idx: Option<usize>,
    load: Supplies,
    eta_minutes: u32,
}

// ==========================================
// AllocationOptimizer - 分配优化器
// ==========================================
pub struct AllocationOptimizer {
    solver: Option<Arc<dyn MipSolver>>,
    config: OptimizerConfig,
    kpi: KpiEngine,
}

impl AllocationOptimizer {
    /// 使用指定求解后端创建
    pub fn new(solver: Arc<dyn MipSolver>, config: OptimizerConfig) -> Self {
        Self {
            solver: Some(solver),
            config,
            kpi: KpiEngine::new(),
        }
    }

    /// 使用 HiGHS 后端创建
    pub fn with_highs(config: OptimizerConfig) -> Self {
        Self::new(Arc::new(HighsSolver::new()), config)
    }

    /// 无求解后端 (所有求解降级为空方案)
    pub fn without_solver(config: OptimizerConfig) -> Self {
        Self {
            solver: None,
            config,
            kpi: KpiEngine::new(),
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解单期分配问题
    ///
    /// # 参数
    /// - `zones`: 需求区 (读取 access / demand)
    /// - `depots`: 仓库
    /// - `assets`: 运输资产
    /// - `distances`: 仓库×需求区距离表
    ///
    /// # 返回
    /// 调度方案; 求解器不可用或无可行解时返回降级空方案,不返回错误
    #[instrument(skip_all, fields(
        zones_count = zones.len(),
        depots_count = depots.len(),
        assets_count = assets.len()
    ))]
    pub fn optimize(
        &self,
        zones: &[Zone],
        depots: &[Depot],
        assets: &[Asset],
        distances: &DistanceTable,
    ) -> Plan {
        // 1. 解析归属仓库
        let resolver = DepotResolver::new(depots);
        let homes: Vec<Option<ResolvedDepot<'_>>> = assets
            .iter()
            .map(|a| resolver.resolve_with_rule(&a.home_depot))
            .collect();

        let mut unresolved_assets = Vec::new();
        for (asset, home) in assets.iter().zip(homes.iter()) {
            match home {
                Some(resolved) => debug!(
                    asset_id = %asset.asset_id,
                    depot_id = %resolved.depot.depot_id,
                    rule = %resolved.rule,
                    "归属仓库解析成功"
                ),
                None => {
                    warn!(
                        asset_id = %asset.asset_id,
                        home_depot = %asset.home_depot,
                        policy = %self.config.unresolved_depot_policy,
                        "归属仓库无法解析，资产不计入仓库库存约束"
                    );
                    unresolved_assets.push(asset.asset_id.clone());
                }
            }
        }

        // 2. 空输入直接返回
        if assets.is_empty() || zones.is_empty() {
            info!("无资产或无需求区，返回空方案");
            return Plan::idle(unresolved_assets);
        }

        let solver = match &self.solver {
            Some(s) => s,
            None => {
                warn!("求解器不可用，降级为空方案");
                return Plan::degraded(unresolved_assets);
            }
        };

        // 3. 建模
        let (model, pairs) = self.build_model(zones, depots, assets, &homes, distances);
        debug!(
            columns = model.num_columns(),
            rows = model.num_rows(),
            backend = solver.name(),
            "MIP 模型构建完成"
        );

        // 4. 求解
        let solution = match solver.maximize(&model) {
            Ok(sol) => sol,
            Err(e) => {
                warn!(error = %e, backend = solver.name(), "求解失败，降级为空方案");
                return Plan::degraded(unresolved_assets);
            }
        };

        // 5. 提取分配并取整
        let mut drafts = self.extract_drafts(zones, assets, &homes, &pairs, &solution);

        // 6. 取整校正 (需求量 / 库存)
        let trimmed = reconcile_limits(&mut drafts, zones, depots);
        if trimmed > 0 {
            warn!(trimmed_units = trimmed, "取整后超出需求或库存，已回退多余配送量");
        }

        let assignments: Vec<Assignment> = drafts
            .into_iter()
            .filter(|d| !d.load.is_zero())
            .map(|d| Assignment {
                asset_id: assets[d.asset_idx].asset_id.clone(),
                zone_id: zones[d.zone_idx].zone_id.clone(),
                load: d.load,
                eta_minutes: d.eta_minutes,
            })
            .collect();

        // 7. 指标
        let kpis = self.kpi.compute(zones, &assignments);

        info!(
            assignments_count = assignments.len(),
            objective = solution.objective,
            coverage_percent = kpis.coverage_percent,
            fairness_percent = kpis.fairness_percent,
            median_eta_minutes = kpis.median_eta_minutes,
            "分配优化完成"
        );

        Plan {
            status: PlanStatus::Solved,
            assignments,
            kpis,
            rationales: Vec::new(),
            unresolved_assets,
        }
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 资产是否允许派往该需求区
    fn is_assignable(&self, asset: &Asset, zone: &Zone, home: Option<&ResolvedDepot<'_>>) -> bool {
        if !zone.access.allows(asset.asset_type) {
            return false;
        }
        home.is_some() || self.config.unresolved_depot_policy == UnresolvedDepotPolicy::AssignUnconstrained
    }

    /// 目标函数中的距离 (km)
    ///
    /// 优先查距离表; 查不到或为 0 且仓库已知时直接计算
    fn penalty_distance_km(
        &self,
        home: Option<&ResolvedDepot<'_>>,
        zone: &Zone,
        distances: &DistanceTable,
    ) -> f64 {
        let Some(home) = home else {
            return 0.0;
        };
        match distances.get(&home.depot.depot_id, &zone.zone_id) {
            Some(km) if km > 0.0 => km,
            _ => depot_to_zone_km(home.depot, zone),
        }
    }

    fn build_model(
        &self,
        zones: &[Zone],
        depots: &[Depot],
        assets: &[Asset],
        homes: &[Option<ResolvedDepot<'_>>],
        distances: &DistanceTable,
    ) -> (MipModel, Vec<PairColumns>) {
        let mut model = MipModel::new();
        let mut pairs = Vec::with_capacity(assets.len() * zones.len());

        let pair_distances: Vec<f64> = homes
            .iter()
            .flat_map(|home| {
                zones
                    .iter()
                    .map(move |zone| self.penalty_distance_km(home.as_ref(), zone, distances))
            })
            .collect();
        let max_dist_km = pair_distances.iter().copied().fold(0.0, f64::max);
        let weight = effective_penalty_weight(self.config.distance_penalty_weight, max_dist_km);
        if weight < self.config.distance_penalty_weight {
            warn!(
                configured = self.config.distance_penalty_weight,
                effective = weight,
                max_dist_km,
                "距离惩罚权重过大，已按最远距离收紧"
            );
        }

        // 变量 + 运力联动约束
        for (a, asset) in assets.iter().enumerate() {
            let home = &homes[a];
            for (z, zone) in zones.iter().enumerate() {
                let allowed = self.is_assignable(asset, zone, home.as_ref());
                let dist_km = pair_distances[a * zones.len() + z];

                let assign = model.add_binary(-weight * dist_km, !allowed);

                let loads = Commodity::ALL.map(|c| {
                    let ub = if allowed { asset.capacity.get(c) as f64 } else { 0.0 };
                    model.add_continuous(1.0, 0.0, ub)
                });

                if allowed {
                    for (c, &load) in Commodity::ALL.iter().zip(loads.iter()) {
                        // l - cap·y ≤ 0
                        model.add_row_le(0.0, vec![(load, 1.0), (assign, -(asset.capacity.get(*c) as f64))]);
                    }
                }

                pairs.push(PairColumns { assign, loads });
            }
        }

        let nz = zones.len();

        // 每个资产至多服务一个需求区
        for a in 0..assets.len() {
            let terms = (0..nz).map(|z| (pairs[a * nz + z].assign, 1.0)).collect();
            model.add_row_le(1.0, terms);
        }

        // 需求区需求上限
        for (z, zone) in zones.iter().enumerate() {
            for (ci, &c) in Commodity::ALL.iter().enumerate() {
                let terms = (0..assets.len())
                    .map(|a| (pairs[a * nz + z].loads[ci], 1.0))
                    .collect();
                model.add_row_le(zone.demand.get(c) as f64, terms);
            }
        }

        // 仓库库存上限 (仅统计归属解析成功的资产)
        for (d, depot) in depots.iter().enumerate() {
            let members: Vec<usize> = homes
                .iter()
                .enumerate()
                .filter(|(_, h)| h.map(|r| r.index) == Some(d))
                .map(|(a, _)| a)
                .collect();
            if members.is_empty() {
                continue;
            }
            for (ci, &c) in Commodity::ALL.iter().enumerate() {
                let terms = members
                    .iter()
                    .flat_map(|&a| (0..nz).map(move |z| (a, z)))
                    .map(|(a, z)| (pairs[a * nz + z].loads[ci], 1.0))
                    .collect();
                model.add_row_le(depot.stock.get(c) as f64, terms);
            }
        }

        (model, pairs)
    }

    fn extract_drafts(
        &self,
        zones: &[Zone],
        assets: &[Asset],
        homes: &[Option<ResolvedDepot<'_>>],
        pairs: &[PairColumns],
        solution: &MipSolution,
    ) -> Vec<DraftAssignment> {
        let nz = zones.len();
        let mut drafts = Vec::new();

        for (a, (asset, home)) in assets.iter().zip(homes.iter()).enumerate() {
            for (z, zone) in zones.iter().enumerate() {
                let cols = &pairs[a * nz + z];
                if solution.value(cols.assign) < self.config.assignment_threshold {
                    continue;
                }

                let mut load = Supplies::default();
                for (ci, &c) in Commodity::ALL.iter().enumerate() {
                    let raw = solution.value(cols.loads[ci]).max(0.0).round() as u32;
                    load.set(c, raw.min(asset.capacity.get(c)));
                }

                // ETA 只看直线距离,与目标函数的距离惩罚无关
                let dist_km = home.map(|h| depot_to_zone_km(h.depot, zone)).unwrap_or(0.0);
                let speed = self.config.speed_kmph(asset.asset_type);
                let eta = eta_minutes(dist_km, speed);

                debug!(
                    asset_id = %asset.asset_id,
                    zone_id = %zone.zone_id,
                    dist_km = dist_km,
                    speed_kmph = speed,
                    eta_minutes = eta,
                    "分配明细"
                );

                drafts.push(DraftAssignment {
                    asset_idx: a,
                    zone_idx: z,
                    depot_idx: home.map(|h| h.index),
                    load,
                    eta_minutes: eta,
                });
            }
        }

        drafts
    }
}

/// 取整校正: 逐需求区、逐仓库检查各品类合计,超出部分从靠后的分配中扣回
///
/// # 返回
/// 扣回的总单位数
fn reconcile_limits(drafts: &mut [DraftAssignment], zones: &[Zone], depots: &[Depot]) -> u64 {
    let mut trimmed = 0u64;

    for (z, zone) in zones.iter().enumerate() {
        let members: Vec<usize> = (0..drafts.len()).filter(|&i| drafts[i].zone_idx == z).collect();
        for c in Commodity::ALL {
            trimmed += trim_to_limit(drafts, &members, c, zone.demand.get(c));
        }
    }

    for (d, depot) in depots.iter().enumerate() {
        let members: Vec<usize> = (0..drafts.len())
            .filter(|&i| drafts[i].depot_idx == Some(d))
            .collect();
        for c in Commodity::ALL {
            trimmed += trim_to_limit(drafts, &members, c, depot.stock.get(c));
        }
    }

    trimmed
}

fn trim_to_limit(drafts: &mut [DraftAssignment], members: &[usize], commodity: Commodity, limit: u32) -> u64 {
    let total: u64 = members.iter().map(|&i| drafts[i].load.get(commodity) as u64).sum();
    let mut excess = total.saturating_sub(limit as u64);
    let trimmed = excess;

    for &i in members.iter().rev() {
        if excess == 0 {
            break;
        }
        let current = drafts[i].load.get(commodity);
        let cut = (current as u64).min(excess) as u32;
        drafts[i].load.set(commodity, current - cut);
        excess -= cut as u64;
    }

    trimmed
}
