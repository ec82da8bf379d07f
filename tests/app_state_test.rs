// ==========================================
// AppState 集成测试
// ==========================================
// 测试目标: 验证共享快照上的优化与事件处理
// 覆盖范围: 方案说明、事件串行化、锁内失败不污染快照
// ==========================================

mod helpers;

use helpers::stub_solver::FailingSolver;
use helpers::test_data_builder::mixed_scenario;
use relief_alloc::app::AppState;
use relief_alloc::config::ConfigManager;
use relief_alloc::domain::{AccessMode, DemandOverride, PlanStatus, ReliefEvent, Snapshot};
use relief_alloc::engine::{AllocationOptimizer, OptimizerConfig, OptionalAnnotator};
use relief_alloc::importer::load_snapshot;
use std::sync::Arc;
use std::thread;

fn mixed_state() -> AppState {
    test_helpers::init_test_logging();
    let (zones, depots, assets) = mixed_scenario();
    AppState::new(Snapshot::new(zones, depots, assets), OptimizerConfig::default())
}

#[test]
fn test_run_optimization_adds_rationales() {
    let state = mixed_state();
    let plan = state.run_optimization().unwrap();

    assert_eq!(plan.status, PlanStatus::Solved);
    assert_eq!(plan.rationales.len(), plan.assignments.len());
    for (text, a) in plan.rationales.iter().zip(plan.assignments.iter()) {
        assert!(text.contains(&a.asset_id));
        assert!(text.contains(&a.zone_id));
    }
}

#[test]
fn test_annotator_can_be_disabled() {
    let mut state = mixed_state();
    state.set_annotator(OptionalAnnotator::none());
    let plan = state.run_optimization().unwrap();
    assert!(plan.rationales.is_empty());
}

#[test]
fn test_apply_event_mutates_shared_snapshot() {
    let state = mixed_state();
    let event = ReliefEvent::RoadBlock {
        target_zone: "Z4".to_string(),
        new_access: None,
    };
    state.apply_event(&event).unwrap();

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.find_zone("Hillside").unwrap().access, AccessMode::BoatOnly);
}

#[test]
fn test_rejected_event_leaves_snapshot_untouched() {
    let state = mixed_state();
    let before = state.snapshot().unwrap();

    let err = state
        .apply_event(&ReliefEvent::RoadClear {
            target_zone: "Nowhere".to_string(),
            new_access: None,
        })
        .unwrap_err();
    assert!(err.is_zone_not_found());

    let after = state.snapshot().unwrap();
    assert_eq!(after.revision, before.revision);
    assert_eq!(after.zones, before.zones);
}

#[test]
fn test_concurrent_events_are_serialized() {
    let state = Arc::new(mixed_state());

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                let event = ReliefEvent::SosSpike {
                    target_zone: "Z1".to_string(),
                    demand: DemandOverride {
                        food_demand: Some(10 + i),
                        water_demand: None,
                        medical_demand: None,
                    },
                };
                state.apply_event(&event).unwrap()
            })
        })
        .collect();

    for h in handles {
        let plan = h.join().unwrap();
        assert_eq!(plan.status, PlanStatus::Solved);
    }

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.revision, 8);
    // 最终需求为某一个事件写入的值
    let food = snapshot.find_zone("Z1").unwrap().demand.food;
    assert!((10..18).contains(&food));
}

#[test]
fn test_solver_failure_surfaces_as_degraded_plan() {
    let (zones, depots, assets) = mixed_scenario();
    let optimizer = AllocationOptimizer::new(Arc::new(FailingSolver::infeasible()), OptimizerConfig::default());
    let state = AppState::with_optimizer(Snapshot::new(zones, depots, assets), optimizer);

    let plan = state.run_optimization().unwrap();
    assert_eq!(plan.status, PlanStatus::Degraded);
    assert!(plan.rationales.is_empty());
}

#[test]
fn test_state_from_imported_data_and_config() {
    let dir = test_helpers::create_json_data_dir().unwrap();
    let snapshot = load_snapshot(dir.path()).unwrap();

    let config = ConfigManager::new();
    let state = AppState::from_config(snapshot, &config).unwrap();
    let plan = state.run_optimization().unwrap();

    // Z1 由卡车配送 5 份食品, Z2 由船只配送
    assert_eq!(plan.status, PlanStatus::Solved);
    let z1 = plan.assignments.iter().find(|a| a.zone_id == "Z1").unwrap();
    assert_eq!(z1.asset_id, "T1");
    assert_eq!(z1.load.food, 5);
    let z2 = plan.assignments.iter().find(|a| a.zone_id == "Z2").unwrap();
    assert_eq!(z2.asset_id, "B1");
}
