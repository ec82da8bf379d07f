// ==========================================
// 灾害救援物资调度系统 - 归属仓库解析器
// ==========================================
// 优先级: EXACT_ID -> TRIMMED_ID -> NAME_CI -> TRIMMED_NAME_CI -> NONE
// 说明: 优化器库存约束分组与 ETA 计算共用此解析结果
// ==========================================

use crate::domain::site::Depot;
use std::collections::HashMap;
use std::fmt;

/// 命中的解析规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    ExactId,               // 仓库ID精确匹配
    TrimmedId,             // 去空白后匹配仓库ID
    NameIgnoreCase,        // 名称忽略大小写匹配
    TrimmedNameIgnoreCase, // 名称去空白且忽略大小写匹配
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionRule::ExactId => write!(f, "EXACT_ID"),
            ResolutionRule::TrimmedId => write!(f, "TRIMMED_ID"),
            ResolutionRule::NameIgnoreCase => write!(f, "NAME_CI"),
            ResolutionRule::TrimmedNameIgnoreCase => write!(f, "TRIMMED_NAME_CI"),
        }
    }
}

/// 解析结果
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDepot<'a> {
    pub index: usize, // 在仓库列表中的下标
    pub depot: &'a Depot,
    pub rule: ResolutionRule,
}

/// DepotResolver - 归属仓库解析器
///
/// 同一个键对应多个仓库时,保留列表中靠前的仓库
pub struct DepotResolver<'a> {
    depots: &'a [Depot],
    by_id: HashMap<&'a str, usize>,
    by_trimmed_id: HashMap<&'a str, usize>,
    by_lower_name: HashMap<String, usize>,
    by_trimmed_lower_name: HashMap<String, usize>,
}

impl<'a> DepotResolver<'a> {
    pub fn new(depots: &'a [Depot]) -> Self {
        let mut by_id = HashMap::new();
        let mut by_trimmed_id = HashMap::new();
        let mut by_lower_name = HashMap::new();
        let mut by_trimmed_lower_name = HashMap::new();

        for (idx, depot) in depots.iter().enumerate() {
            by_id.entry(depot.depot_id.as_str()).or_insert(idx);
            by_trimmed_id.entry(depot.depot_id.trim()).or_insert(idx);
            by_lower_name.entry(depot.name.to_lowercase()).or_insert(idx);
            by_trimmed_lower_name
                .entry(depot.name.trim().to_lowercase())
                .or_insert(idx);
        }

        Self {
            depots,
            by_id,
            by_trimmed_id,
            by_lower_name,
            by_trimmed_lower_name,
        }
    }

    /// 解析归属仓库引用,未命中返回 None
    pub fn resolve(&self, raw: &str) -> Option<&'a Depot> {
        self.resolve_with_rule(raw).map(|r| r.depot)
    }

    /// 按优先级解析,并返回命中的规则
    pub fn resolve_with_rule(&self, raw: &str) -> Option<ResolvedDepot<'a>> {
        let trimmed = raw.trim();

        // 1) 仓库ID精确匹配
        if let Some(&idx) = self.by_id.get(raw) {
            return Some(self.hit(idx, ResolutionRule::ExactId));
        }

        // 2) 去空白后匹配仓库ID
        if let Some(&idx) = self.by_trimmed_id.get(trimmed) {
            return Some(self.hit(idx, ResolutionRule::TrimmedId));
        }

        // 3) 名称忽略大小写
        if let Some(&idx) = self.by_lower_name.get(&raw.to_lowercase()) {
            return Some(self.hit(idx, ResolutionRule::NameIgnoreCase));
        }

        // 4) 名称去空白 + 忽略大小写
        if let Some(&idx) = self.by_trimmed_lower_name.get(&trimmed.to_lowercase()) {
            return Some(self.hit(idx, ResolutionRule::TrimmedNameIgnoreCase));
        }

        // 5) 未命中
        None
    }

    fn hit(&self, idx: usize, rule: ResolutionRule) -> ResolvedDepot<'a> {
        ResolvedDepot {
            index: idx,
            depot: &self.depots[idx],
            rule,
        }
    }
}
