// ==========================================
// 灾害救援物资调度系统 - 事件处理器
// ==========================================
// 职责: 应用外部事件修改需求区状态,并全量重新优化
// 红线: 不做增量修补,每次事件后从头求解
// ==========================================
// 状态转换:
// - road_block: access = new_access 或 boat_only
// - road_clear: access = new_access 或 road_open
// - sos_spike : 提供的需求字段覆写当前值,未提供的保持不变
// ==========================================

use crate::domain::asset::Asset;
use crate::domain::event::ReliefEvent;
use crate::domain::plan::Plan;
use crate::domain::site::{Depot, Zone};
use crate::domain::snapshot::Snapshot;
use crate::domain::types::{AccessMode, Supplies};
use crate::engine::distance::DistanceTable;
use crate::engine::error::EngineError;
use crate::engine::optimizer::AllocationOptimizer;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 单次事件造成的需求区变更 (用于日志与调用方展示)
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneChange {
    pub zone_id: String,
    pub access_before: AccessMode,
    pub access_after: AccessMode,
    pub demand_before: Supplies,
    pub demand_after: Supplies,
}

impl ZoneChange {
    pub fn is_noop(&self) -> bool {
        self.access_before == self.access_after && self.demand_before == self.demand_after
    }
}

/// 将事件应用到需求区列表 (仅修改状态,不求解)
///
/// 先按 ID 匹配,再按显示名称匹配
///
/// # 返回
/// - Ok(ZoneChange): 变更记录
/// - Err(EngineError::ZoneNotFound): 目标需求区不存在
pub fn mutate_zone(zones: &mut [Zone], event: &ReliefEvent) -> Result<ZoneChange, EngineError> {
    let target = event.target_zone();
    let idx = zones
        .iter()
        .position(|z| z.zone_id == target)
        .or_else(|| zones.iter().position(|z| z.name == target))
        .ok_or_else(|| EngineError::ZoneNotFound {
            target: target.to_string(),
        })?;

    let zone = &mut zones[idx];
    let access_before = zone.access;
    let demand_before = zone.demand;

    match event {
        ReliefEvent::RoadBlock { new_access, .. } => {
            zone.access = new_access.unwrap_or(AccessMode::BoatOnly);
        }
        ReliefEvent::RoadClear { new_access, .. } => {
            zone.access = new_access.unwrap_or(AccessMode::RoadOpen);
        }
        ReliefEvent::SosSpike { demand, .. } => {
            if demand.is_empty() {
                warn!(zone_id = %zone.zone_id, "sos_spike 未携带任何需求字段，需求保持不变");
            }
            zone.demand = demand.apply_to(&zone.demand);
        }
    }

    Ok(ZoneChange {
        zone_id: zone.zone_id.clone(),
        access_before,
        access_after: zone.access,
        demand_before,
        demand_after: zone.demand,
    })
}

// ==========================================
// EventProcessor - 事件处理器
// ==========================================
pub struct EventProcessor {
    optimizer: Arc<AllocationOptimizer>,
}

impl EventProcessor {
    pub fn new(optimizer: Arc<AllocationOptimizer>) -> Self {
        Self { optimizer }
    }

    /// 应用事件并重新优化
    ///
    /// # 参数
    /// - `zones`: 需求区快照 (原地修改)
    /// - `depots` / `assets`: 仓库与资产
    /// - `previous_distances`: 事件前的距离表 (仅用于日志,重算不依赖)
    /// - `event`: 外部事件
    ///
    /// # 返回
    /// - Ok(Plan): 基于修改后快照的新方案 (可能为降级空方案)
    /// - Err(EngineError::ZoneNotFound): 目标需求区不存在,快照不变
    pub fn apply_event(
        &self,
        zones: &mut [Zone],
        depots: &[Depot],
        assets: &[Asset],
        previous_distances: &DistanceTable,
        event: &ReliefEvent,
    ) -> Result<Plan, EngineError> {
        let change = mutate_zone(zones, event)?;

        info!(
            event = %event,
            zone_id = %change.zone_id,
            access_before = %change.access_before,
            access_after = %change.access_after,
            demand_before = %change.demand_before,
            demand_after = %change.demand_after,
            "事件已应用"
        );
        if change.is_noop() {
            debug!(event = %event, "事件未改变需求区状态，仍执行全量重算");
        }

        // 全量重建距离表 (坐标不变,保持统一路径)
        let distances = DistanceTable::build(depots, zones);
        debug!(
            previous_entries = previous_distances.len(),
            rebuilt_entries = distances.len(),
            "距离表已重建"
        );

        Ok(self.optimizer.optimize(zones, depots, assets, &distances))
    }

    /// 对快照应用事件 (成功后递增修订号)
    pub fn apply_to_snapshot(&self, snapshot: &mut Snapshot, event: &ReliefEvent) -> Result<Plan, EngineError> {
        let previous = DistanceTable::build(&snapshot.depots, &snapshot.zones);
        let plan = self.apply_event(
            &mut snapshot.zones,
            &snapshot.depots,
            &snapshot.assets,
            &previous,
            event,
        )?;
        snapshot.touch();
        Ok(plan)
    }
}
