// ==========================================
// 木材生产排班计划 - 良率计算引擎
// ==========================================
// 职责: 按批次汇总历史体积, 计算目标等级良率
// 输入: BatchYieldRecord 列表 + 目标等级
// 输出: batch_id -> YieldRatio
// ==========================================

use crate::domain::production::{BatchYieldRecord, YieldRatio};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// YieldCalculator - 良率计算引擎
// ==========================================
pub struct YieldCalculator {
    // 无状态引擎
}

impl Default for YieldCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算各批次良率
    ///
    /// 规则:
    /// 1) total = 批次全部体积之和
    /// 2) qualifying = 等级等于 target_grade 的体积之和
    /// 3) ratio = qualifying / total; total 为 0 时 ratio = 0
    ///
    /// 负体积与非有限值按 0 计入, 保证 ratio 落在 [0, 1]。
    #[instrument(skip(self, records), fields(records_count = records.len()))]
    pub fn compute_yield(
        &self,
        records: &[BatchYieldRecord],
        target_grade: &str,
    ) -> HashMap<String, YieldRatio> {
        let target = target_grade.trim();
        let mut sums: HashMap<String, (f64, f64)> = HashMap::new();

        for record in records {
            let volume = if record.volume.is_finite() {
                record.volume.max(0.0)
            } else {
                0.0
            };
            let entry = sums.entry(record.batch_id.clone()).or_insert((0.0, 0.0));
            entry.1 += volume;
            if record.quality_grade.trim() == target {
                entry.0 += volume;
            }
        }

        let ratios: HashMap<String, YieldRatio> = sums
            .into_iter()
            .map(|(batch_id, (qualifying, total))| {
                let ratio = if total > 0.0 {
                    (qualifying / total).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (
                    batch_id,
                    YieldRatio {
                        qualifying_volume: qualifying,
                        total_volume: total,
                        ratio,
                    },
                )
            })
            .collect();

        debug!(batches = ratios.len(), target_grade = target, "良率计算完成");
        ratios
    }
}
