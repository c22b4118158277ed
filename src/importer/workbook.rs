// ==========================================
// 木材生产排班计划 - 计划工作簿导入
// ==========================================
// 输入: Excel 工作簿 或 含 `<表名>.csv` 的目录
// 输出: PlanningInput (历史产出 / 品规 / 班次模板 / 节假日)
// 规则:
//   - 产出表、品规表必需
//   - 班次表优先; 缺失时用每日工时表生成每天一个班次
//   - 节假日表可选
// ==========================================

use crate::config::WorkbookConfig;
use crate::domain::calendar::{CalendarTemplate, HolidaySet};
use crate::engine::orchestrator::PlanningInput;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, DEFAULT_SHIFT_NAME};
use crate::importer::file_parser::{CsvParser, ExcelParser, RawTable};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

// ==========================================
// TableSource - 数据来源
// ==========================================
enum TableSource {
    Workbook(ExcelParser),
    CsvDirectory(PathBuf),
}

impl TableSource {
    fn open(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if path.is_dir() {
            return Ok(TableSource::CsvDirectory(path.to_path_buf()));
        }
        Ok(TableSource::Workbook(ExcelParser::open(path)?))
    }

    /// 读取表; 不存在时返回 None
    fn read(&mut self, name: &str) -> ImportResult<Option<RawTable>> {
        match self {
            TableSource::Workbook(parser) => {
                if !parser.has_sheet(name) {
                    return Ok(None);
                }
                parser.read_sheet(name).map(Some)
            }
            TableSource::CsvDirectory(dir) => {
                let file = dir.join(format!("{}.csv", name));
                if !file.is_file() {
                    return Ok(None);
                }
                CsvParser.parse_file(&file).map(Some)
            }
        }
    }

    fn require(&mut self, name: &str) -> ImportResult<RawTable> {
        self.read(name)?
            .ok_or_else(|| ImportError::SheetNotFound(name.to_string()))
    }
}

// ==========================================
// WorkbookLoader - 工作簿导入器
// ==========================================
pub struct WorkbookLoader {
    config: WorkbookConfig,
    mapper: FieldMapper,
}

impl WorkbookLoader {
    pub fn new(config: WorkbookConfig) -> Self {
        Self {
            config,
            mapper: FieldMapper,
        }
    }

    /// 导入计划输入
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ImportResult<PlanningInput> {
        let mut source = TableSource::open(path.as_ref())?;

        // 1. 历史产出
        let yield_table = source.require(&self.config.yield_sheet)?;
        let yield_records = self.mapper.map_yield_records(&yield_table)?;

        // 2. 品规
        let item_table = source.require(&self.config.item_sheet)?;
        let item_specs = self.mapper.map_item_specs(&item_table)?;

        // 3. 班次模板
        let template = match source.read(&self.config.shift_sheet)? {
            Some(table) => CalendarTemplate::new(self.mapper.map_shifts(&table)?),
            None => {
                let hours_table = source.require(&self.config.hours_sheet)?;
                let hours = self.mapper.map_hours_per_day(&hours_table)?;
                CalendarTemplate::uniform(DEFAULT_SHIFT_NAME, hours)
            }
        };

        // 4. 节假日
        let holidays: HolidaySet = match source.read(&self.config.holiday_sheet)? {
            Some(table) => self.mapper.map_holidays(&table)?.into_iter().collect(),
            None => HolidaySet::new(),
        };

        // 只有产出表或只有品规表的规格无法排产
        let without_spec = yield_records
            .iter()
            .filter(|r| !item_specs.contains_key(&r.batch_id))
            .map(|r| r.batch_id.as_str())
            .collect::<std::collections::BTreeSet<_>>();
        if !without_spec.is_empty() {
            warn!(batches = ?without_spec, "部分规格缺少每米体积");
        }

        info!(
            yield_records = yield_records.len(),
            item_specs = item_specs.len(),
            shifts = template.shifts.len(),
            holidays = holidays.len(),
            "计划数据导入完成"
        );

        Ok(PlanningInput {
            yield_records,
            item_specs,
            template,
            holidays,
        })
    }
}
