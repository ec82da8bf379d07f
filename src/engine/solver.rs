// ==========================================
// 灾害救援物资调度系统 - 混合整数规划求解后端
// ==========================================
// 职责: 定义求解器 trait,隔离具体 MIP 后端
// 实现: HighsSolver (highs crate)
// 说明: 优化器只依赖 MipSolver,测试可注入桩实现
// ==========================================

use highs::{HighsModelStatus, RowProblem, Sense};
use thiserror::Error;
use tracing::debug;

// ==========================================
// 模型描述
// ==========================================

/// 变量句柄 (在 MipModel 中的下标)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(usize);

#[derive(Debug, Clone)]
struct ColumnDef {
    objective: f64,
    lower: f64,
    upper: f64,
    integer: bool,
}

#[derive(Debug, Clone)]
struct RowDef {
    upper: f64,
    terms: Vec<(ColumnId, f64)>,
}

/// 求解器无关的 MIP 模型 (目标: 最大化)
///
/// 所有约束行均为 `Σ coef·x ≤ upper` 形式
#[derive(Debug, Clone, Default)]
pub struct MipModel {
    columns: Vec<ColumnDef>,
    rows: Vec<RowDef>,
}

impl MipModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 0/1 变量; pinned=true 时上界固定为 0
    pub fn add_binary(&mut self, objective: f64, pinned: bool) -> ColumnId {
        self.push_column(ColumnDef {
            objective,
            lower: 0.0,
            upper: if pinned { 0.0 } else { 1.0 },
            integer: true,
        })
    }

    /// 添加连续变量 [lower, upper]
    pub fn add_continuous(&mut self, objective: f64, lower: f64, upper: f64) -> ColumnId {
        self.push_column(ColumnDef {
            objective,
            lower,
            upper,
            integer: false,
        })
    }

    /// 添加约束行 Σ coef·x ≤ upper (空行直接忽略)
    pub fn add_row_le(&mut self, upper: f64, terms: Vec<(ColumnId, f64)>) {
        if terms.is_empty() {
            return;
        }
        self.rows.push(RowDef { upper, terms });
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn push_column(&mut self, def: ColumnDef) -> ColumnId {
        self.columns.push(def);
        ColumnId(self.columns.len() - 1)
    }
}

/// 求解结果 (变量取值按 ColumnId 下标)
#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    values: Vec<f64>,
    pub objective: f64,
}

impl MipSolution {
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    pub fn value(&self, col: ColumnId) -> f64 {
        self.values.get(col.0).copied().unwrap_or(0.0)
    }
}

// ==========================================
// 求解错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("求解器不可用: {0}")]
    Unavailable(String),

    #[error("模型无可行解: {0}")]
    Infeasible(String),

    #[error("求解未得到可用解: {0}")]
    Failed(String),
}

// ==========================================
// MipSolver Trait
// ==========================================
pub trait MipSolver: Send + Sync {
    /// 后端名称 (用于日志)
    fn name(&self) -> &str;

    /// 最大化求解
    fn maximize(&self, model: &MipModel) -> Result<MipSolution, SolveError>;
}

// ==========================================
// HighsSolver - HiGHS 后端
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MipSolver for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn maximize(&self, model: &MipModel) -> Result<MipSolution, SolveError> {
        let mut pb = RowProblem::new();

        let cols: Vec<_> = model
            .columns
            .iter()
            .map(|c| {
                if c.integer {
                    pb.add_integer_column(c.objective, c.lower..=c.upper)
                } else {
                    pb.add_column(c.objective, c.lower..=c.upper)
                }
            })
            .collect();

        for row in &model.rows {
            let terms: Vec<_> = row.terms.iter().map(|(id, coef)| (cols[id.0], *coef)).collect();
            pb.add_row(..=row.upper, terms);
        }

        let mut highs_model = pb.optimise(Sense::Maximise);
        highs_model.set_option("output_flag", false);
        let solved = highs_model.solve();
        let status = solved.status();

        debug!(
            backend = self.name(),
            status = ?status,
            columns = model.num_columns(),
            rows = model.num_rows(),
            "HiGHS 求解结束"
        );

        match status {
            HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => {
                let sol = solved.get_solution();
                let values = cols.iter().map(|&c| sol[c]).collect();
                Ok(MipSolution::new(values, solved.objective_value()))
            }
            HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
                Err(SolveError::Infeasible(format!("{:?}", status)))
            }
            other => Err(SolveError::Failed(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_builder_skips_empty_rows() {
        let mut model = MipModel::new();
        let x = model.add_continuous(1.0, 0.0, 5.0);
        model.add_row_le(3.0, vec![(x, 1.0)]);
        model.add_row_le(1.0, vec![]);
        assert_eq!(model.num_columns(), 1);
        assert_eq!(model.num_rows(), 1);
    }

    #[test]
    fn test_highs_solves_small_knapsack() {
        // max x + 2y, x + y <= 1, y 为 0/1
        let mut model = MipModel::new();
        let x = model.add_continuous(1.0, 0.0, 1.0);
        let y = model.add_binary(2.0, false);
        model.add_row_le(1.0, vec![(x, 1.0), (y, 1.0)]);

        let sol = HighsSolver::new().maximize(&model).unwrap();
        assert!((sol.value(y) - 1.0).abs() < 1e-6);
        assert!(sol.value(x).abs() < 1e-6);
        assert!((sol.objective - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_highs_reports_infeasible() {
        // x >= 2 via -x <= -2, x <= 1
        let mut model = MipModel::new();
        let x = model.add_continuous(1.0, 0.0, 1.0);
        model.add_row_le(-2.0, vec![(x, -1.0)]);

        let result = HighsSolver::new().maximize(&model);
        assert!(matches!(result, Err(SolveError::Infeasible(_))));
    }

    #[test]
    fn test_pinned_binary_stays_zero() {
        let mut model = MipModel::new();
        let y = model.add_binary(10.0, true);
        model.add_row_le(1.0, vec![(y, 1.0)]);
        let sol = HighsSolver::new().maximize(&model).unwrap();
        assert!(sol.value(y).abs() < 1e-9);
    }
}
