// ==========================================
// 替身求解器 - 用于降级路径测试
// ==========================================

use relief_alloc::engine::{MipModel, MipSolution, MipSolver, SolveError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 总是失败的求解器
pub struct FailingSolver {
    pub error: fn(String) -> SolveError,
    pub calls: AtomicUsize,
}

impl FailingSolver {
    pub fn infeasible() -> Self {
        Self {
            error: SolveError::Infeasible,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            error: SolveError::Unavailable,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MipSolver for FailingSolver {
    fn name(&self) -> &str {
        "failing-stub"
    }

    fn maximize(&self, _model: &MipModel) -> Result<MipSolution, SolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.error)("stub".to_string()))
    }
}
