// ==========================================
// 灾害救援物资调度系统 - 命令行入口
// ==========================================
// 用法: relief-alloc [DATA_DIR] [EVENTS_JSON]
// - DATA_DIR   : 含 zones / depots / assets 数据文件的目录 (默认: 用户数据目录/relief-alloc)
// - EVENTS_JSON: 事件数组文件,逐个应用并输出新方案 (可选)
// 输出: 方案 JSON 写 stdout, 日志写 stderr
// ==========================================

use anyhow::{anyhow, Context, Result};
use relief_alloc::app::{get_default_data_dir, AppState};
use relief_alloc::config::ConfigManager;
use relief_alloc::domain::{Plan, ReliefEvent};
use relief_alloc::importer::load_snapshot;
use relief_alloc::logging;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", relief_alloc::APP_NAME);
    tracing::info!("系统版本: {}", relief_alloc::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(get_default_data_dir);
    let events_path = args.next().map(PathBuf::from);

    // 配置
    let config = ConfigManager::load_default().map_err(|e| anyhow!("配置加载失败: {}", e))?;

    // 快照
    tracing::info!(data_dir = %data_dir.display(), "加载数据目录");
    let snapshot = load_snapshot(&data_dir)
        .with_context(|| format!("无法加载数据目录: {}", data_dir.display()))?;

    let state = AppState::from_config(snapshot, &config).map_err(|e| anyhow!(e))?;
    let optimizer_config = state.optimizer_config();
    tracing::info!(
        distance_penalty_weight = optimizer_config.distance_penalty_weight,
        unresolved_depot_policy = %optimizer_config.unresolved_depot_policy,
        "优化器配置"
    );

    // 初始方案
    let plan = state.run_optimization()?;
    print_plan("initial", &plan)?;

    // 事件回放
    if let Some(path) = events_path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("无法读取事件文件: {}", path.display()))?;
        let events: Vec<ReliefEvent> =
            serde_json::from_str(&raw).context("事件文件格式错误")?;

        for event in &events {
            match state.apply_event(event) {
                Ok(plan) => print_plan(&event.to_string(), &plan)?,
                Err(e) if e.is_zone_not_found() => {
                    // 单个事件目标不存在不影响后续事件
                    tracing::error!(event = %event, error = %e, "事件被拒绝");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn print_plan(label: &str, plan: &Plan) -> Result<()> {
    if plan.is_empty() {
        tracing::warn!(trigger = label, status = %plan.status, "方案无任何分配");
    }
    let output = serde_json::json!({
        "trigger": label,
        "plan": plan,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
