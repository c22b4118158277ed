// ==========================================
// 木材生产排班计划 - 计划编排器
// ==========================================
// 职责: 整合良率计算、需求换算、班次分配
// 流程: 良率 → 需求换算 → 日历分配 → 汇总
// 红线: 单工单错误记入 skipped, 不影响其他工单;
//       产能/日历错误终止整次运行
// ==========================================

use crate::config::PlannerConfig;
use crate::domain::calendar::{CalendarTemplate, HolidaySet};
use crate::domain::production::{BatchYieldRecord, ItemSpec, Requirement, WorkItem, YieldRatio};
use crate::domain::schedule::{ItemSummary, PlanResult, ScheduleEntry, ScheduledItemEntry, SkippedItem};
use crate::domain::types::CalendarSharing;
use crate::engine::calendar_model::{CalendarCursor, CalendarModel};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::requirement_translator::RequirementTranslator;
use crate::engine::shift_allocator::ShiftAllocator;
use crate::engine::yield_calculator::YieldCalculator;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// PlanningInput - 一次计划运行的全部输入
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PlanningInput {
    pub yield_records: Vec<BatchYieldRecord>,
    pub item_specs: HashMap<String, ItemSpec>,
    pub template: CalendarTemplate,
    pub holidays: HolidaySet,
}

// ==========================================
// PlanOrchestrator - 计划编排器
// ==========================================
pub struct PlanOrchestrator {
    config: PlannerConfig,
    yield_calculator: YieldCalculator,
    translator: RequirementTranslator,
    allocator: ShiftAllocator,
}

impl PlanOrchestrator {
    /// 创建编排器
    pub fn new(config: PlannerConfig) -> Self {
        let allocator = ShiftAllocator::new(config.max_lookahead_days);
        Self {
            config,
            yield_calculator: YieldCalculator::new(),
            translator: RequirementTranslator::new(),
            allocator,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 计算全部批次良率
    pub fn yields(&self, input: &PlanningInput) -> HashMap<String, YieldRatio> {
        self.yield_calculator
            .compute_yield(&input.yield_records, &self.config.target_grade)
    }

    /// 换算单个工单（良率与品规均需存在）
    pub fn requirement_for(
        &self,
        item: &WorkItem,
        yields: &HashMap<String, YieldRatio>,
        item_specs: &HashMap<String, ItemSpec>,
    ) -> EngineResult<Requirement> {
        let spec = item_specs
            .get(&item.batch_id)
            .ok_or_else(|| EngineError::UnknownBatch(item.batch_id.clone()))?;
        let ratio = yields
            .get(&item.batch_id)
            .ok_or_else(|| EngineError::UnknownBatch(item.batch_id.clone()))?;

        self.translator.translate_item(
            item.requested_length,
            ratio.ratio,
            spec,
            &self.config.throughput(),
        )
    }

    /// 执行完整计划流程
    ///
    /// # 参数
    /// - input: 历史良率、品规、班次模板、节假日
    /// - work_items: 工单（按输入顺序排产）
    /// - start_date: 起始日期
    ///
    /// # 错误
    /// InvalidThroughput / EmptyCalendar / CalendarExhausted 终止运行
    pub fn plan(
        &self,
        input: &PlanningInput,
        work_items: &[WorkItem],
        start_date: NaiveDate,
    ) -> EngineResult<PlanResult> {
        let sharing = self.config.calendar_sharing;
        info!(
            items_count = work_items.len(),
            start_date = %start_date,
            sharing = %sharing,
            "开始执行排班计划"
        );

        // ==========================================
        // 步骤1: 参数与日历校验
        // ==========================================
        self.translator.validate_throughput(&self.config.throughput())?;

        let calendar = CalendarModel::new(
            &input.template,
            input.holidays.clone(),
            self.config.calendar_policy(),
        );
        debug!(
            weekly_capacity = calendar.weekly_capacity_hours(),
            holidays = input.holidays.len(),
            "日历模型已构建"
        );

        // ==========================================
        // 步骤2: 良率计算
        // ==========================================
        let yields = self.yields(input);

        // ==========================================
        // 步骤3: 逐工单换算并分配
        // ==========================================
        let mut cursor = CalendarCursor::new(start_date);
        let mut summaries = Vec::new();
        let mut schedule = Vec::new();
        let mut skipped = Vec::new();

        for item in work_items {
            let requirement = match self.requirement_for(item, &yields, &input.item_specs) {
                Ok(r) => r,
                Err(e) if e.is_item_level() => {
                    warn!(batch_id = %item.batch_id, reason = %e, "工单跳过");
                    skipped.push(SkippedItem {
                        batch_id: item.batch_id.clone(),
                        requested_length: item.requested_length,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let entries = match sharing {
                CalendarSharing::SharedLine => self.allocator.allocate_from_cursor(
                    requirement.required_hours,
                    &calendar,
                    &mut cursor,
                    Some(requirement.adjusted_length),
                )?,
                CalendarSharing::Independent => self.allocator.allocate(
                    requirement.required_hours,
                    &calendar,
                    start_date,
                    Some(requirement.adjusted_length),
                )?,
            };

            summaries.push(summarize(&item.batch_id, &requirement, &entries));
            schedule.extend(entries.into_iter().map(|entry| ScheduledItemEntry {
                batch_id: item.batch_id.clone(),
                entry,
            }));
        }

        info!(
            scheduled_count = summaries.len(),
            skipped_count = skipped.len(),
            entries_count = schedule.len(),
            "排班计划完成"
        );

        Ok(PlanResult {
            run_id: Uuid::new_v4().to_string(),
            start_date,
            sharing,
            summaries,
            schedule,
            skipped,
        })
    }
}

fn summarize(batch_id: &str, requirement: &Requirement, entries: &[ScheduleEntry]) -> ItemSummary {
    ItemSummary {
        batch_id: batch_id.to_string(),
        requested_length: requirement.requested_length,
        yield_ratio: requirement.yield_ratio,
        yield_pct: requirement.yield_ratio * 100.0,
        adjusted_length: requirement.adjusted_length,
        required_volume: requirement.required_volume,
        required_hours: requirement.required_hours,
        first_date: entries.first().map(|e| e.date),
        last_date: entries.last().map(|e| e.date),
        entry_count: entries.len(),
    }
}
