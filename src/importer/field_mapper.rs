// ==========================================
// 木材生产排班计划 - 字段映射器实现
// ==========================================
// 职责: 原始表行 → 领域记录 + 类型转换
// 支持: 列名别名; 品规表缺少标准列名时按前两列位置读取
// ==========================================

use crate::domain::calendar::ShiftDefinition;
use crate::domain::production::{BatchYieldRecord, ItemSpec};
use crate::domain::types::parse_weekday;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

// 标准列名
pub const COL_BATCH: &str = "Batch";
pub const COL_QUALITY: &str = "Quality";
pub const COL_VOLUME: &str = "Volume [m3]";
pub const COL_ITEM: &str = "Item";
pub const COL_M3_PER_METER: &str = "M3 per meter";
pub const COL_HOURS: &str = "Hours";
pub const COL_WEEKDAY: &str = "Weekday";
pub const COL_SHIFT: &str = "Shift";
pub const COL_SEQUENCE: &str = "Sequence";
pub const COL_DATE: &str = "Date";

/// 缺少班次名称时使用的默认名称
pub const DEFAULT_SHIFT_NAME: &str = "Day";

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 表级映射
    // ==========================================

    /// 历史产出表 → BatchYieldRecord
    ///
    /// 体积为空按 0 处理; 负体积报错
    pub fn map_yield_records(&self, table: &RawTable) -> ImportResult<Vec<BatchYieldRecord>> {
        let mut records = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let batch_id = self.require_string(table, row, COL_BATCH)?;
            let quality_grade = self.require_string(table, row, COL_QUALITY)?;
            let volume = self.parse_f64(row, COL_VOLUME)?.unwrap_or(0.0);
            let volume = self.validate_range(row.row_number, COL_VOLUME, volume, 0.0, f64::MAX)?;

            records.push(BatchYieldRecord {
                batch_id,
                quality_grade,
                volume,
            });
        }
        Ok(records)
    }

    /// 品规表 → batch_id -> ItemSpec
    ///
    /// 优先按列名 (Item / M3 per meter) 读取, 否则取前两列
    pub fn map_item_specs(&self, table: &RawTable) -> ImportResult<HashMap<String, ItemSpec>> {
        let (item_col, factor_col) = self.item_columns(table)?;

        let mut specs = HashMap::new();
        for row in &table.rows {
            let batch_id = match row.values.get(&item_col).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => continue,
            };

            let factor = self.parse_f64(row, &factor_col)?.ok_or_else(|| ImportError::MissingField {
                table: table.name.clone(),
                row: row.row_number,
                field: factor_col.clone(),
            })?;
            let factor = self.validate_range(row.row_number, &factor_col, factor, f64::MIN_POSITIVE, f64::MAX)?;

            specs.insert(
                batch_id,
                ItemSpec {
                    volume_per_unit_length: factor,
                },
            );
        }
        Ok(specs)
    }

    /// 班次表 → ShiftDefinition 列表（保持录入顺序）
    pub fn map_shifts(&self, table: &RawTable) -> ImportResult<Vec<ShiftDefinition>> {
        let mut shifts = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let raw_weekday = self.require_string(table, row, COL_WEEKDAY)?;
            let weekday = parse_weekday(&raw_weekday).ok_or_else(|| ImportError::WeekdayFormatError {
                row: row.row_number,
                value: raw_weekday.clone(),
            })?;

            let shift_name = self
                .get_string(row, COL_SHIFT)
                .unwrap_or_else(|| DEFAULT_SHIFT_NAME.to_string());
            let hours = self.parse_f64(row, COL_HOURS)?.unwrap_or(0.0);
            let hours = self.validate_range(row.row_number, COL_HOURS, hours, 0.0, 24.0)?;
            let sequence = match self.parse_f64(row, COL_SEQUENCE)? {
                Some(v) if v >= 0.0 => v as u32,
                Some(v) => {
                    return Err(ImportError::ValueRangeError {
                        row: row.row_number,
                        field: COL_SEQUENCE.to_string(),
                        value: v,
                        min: 0.0,
                        max: f64::from(u32::MAX),
                    })
                }
                None => 0,
            };

            shifts.push(ShiftDefinition {
                weekday,
                shift_name,
                capacity_hours: hours,
                sequence,
            });
        }
        Ok(shifts)
    }

    /// 单值工时表 → 每日工时（取第一条非空 Hours）
    pub fn map_hours_per_day(&self, table: &RawTable) -> ImportResult<f64> {
        for row in &table.rows {
            if let Some(hours) = self.parse_f64(row, COL_HOURS)? {
                return self.validate_range(row.row_number, COL_HOURS, hours, 0.0, 24.0);
            }
        }
        Err(ImportError::MissingColumn {
            table: table.name.clone(),
            column: COL_HOURS.to_string(),
        })
    }

    /// 节假日表 → 日期列表
    pub fn map_holidays(&self, table: &RawTable) -> ImportResult<Vec<NaiveDate>> {
        let mut dates = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            if let Some(date) = self.parse_date(row, COL_DATE)? {
                dates.push(date);
            }
        }
        Ok(dates)
    }

    // ==========================================
    // 字段级解析
    // ==========================================

    fn item_columns(&self, table: &RawTable) -> ImportResult<(String, String)> {
        let item = self.resolve_column(table, COL_ITEM);
        let factor = self.resolve_column(table, COL_M3_PER_METER);

        match (item, factor) {
            (Some(i), Some(f)) => Ok((i, f)),
            _ if table.headers.len() >= 2 => {
                Ok((table.headers[0].clone(), table.headers[1].clone()))
            }
            _ => Err(ImportError::MissingColumn {
                table: table.name.clone(),
                column: COL_M3_PER_METER.to_string(),
            }),
        }
    }

    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            COL_BATCH => &["Batch", "Item", "batch_id"],
            COL_QUALITY => &["Quality", "Grade", "quality_grade"],
            COL_VOLUME => &["Volume [m3]", "Volume", "volume"],
            COL_ITEM => &["Item", "Batch", "batch_id"],
            COL_M3_PER_METER => &["M3 per meter", "m3 per meter", "volume_per_unit_length"],
            COL_HOURS => &["Hours", "hours", "capacity_hours"],
            COL_WEEKDAY => &["Weekday", "Day", "weekday"],
            COL_SHIFT => &["Shift", "shift_name"],
            COL_SEQUENCE => &["Sequence", "Order", "sequence"],
            COL_DATE => &["Date", "Holiday", "date"],
            _ => &[],
        }
    }

    fn resolve_column(&self, table: &RawTable, key: &str) -> Option<String> {
        let aliases = Self::aliases(key);
        let candidates: Vec<&str> = if aliases.is_empty() { vec![key] } else { aliases.to_vec() };
        candidates
            .into_iter()
            .find(|alias| table.has_column(alias))
            .map(|alias| alias.to_string())
    }

    /// 提取字符串字段（返回 Option），支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases = Self::aliases(key);
        let candidates: Vec<&str> = if aliases.is_empty() { vec![key] } else { aliases.to_vec() };

        for alias in candidates {
            if let Some(v) = row.values.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_string(&self, table: &RawTable, row: &RawRow, key: &str) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            table: table.name.clone(),
            row: row.row_number,
            field: key.to_string(),
        })
    }

    /// 解析浮点数（兼容逗号小数点）
    fn parse_f64(&self, row: &RawRow, key: &str) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row.row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    /// 解析日期（YYYY-MM-DD / YYYYMMDD / YYYY/MM/DD / DD.MM.YYYY / Excel 序列号）
    fn parse_date(&self, row: &RawRow, key: &str) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_date_value(&value)
                .map(Some)
                .ok_or_else(|| ImportError::DateFormatError {
                    row: row.row_number,
                    field: key.to_string(),
                    value: value.clone(),
                }),
        }
    }

    fn validate_range(&self, row: usize, field: &str, value: f64, min: f64, max: f64) -> ImportResult<f64> {
        if !value.is_finite() || value < min || value > max {
            Err(ImportError::ValueRangeError {
                row,
                field: field.to_string(),
                value,
                min,
                max,
            })
        } else {
            Ok(value)
        }
    }
}

/// 日期文本解析; 带时间部分时只取日期
pub fn parse_date_value(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    let date_part = value
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(value);

    for fmt in ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(date);
        }
    }

    // Excel 序列号（1900 日期系统, 基准 1899-12-30）
    let serial = value.parse::<f64>().ok()?;
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(idx, values)| RawRow {
                    row_number: idx + 2,
                    values: headers
                        .iter()
                        .zip(values.iter())
                        .map(|(h, v)| (h.to_string(), v.to_string()))
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_map_yield_records_with_aliases() {
        let t = table(
            "Table",
            &["Item", "Grade", "Volume"],
            &[&["19x75", "Q1", "31.999"], &["19x75", "Waste", ""], &["19x75", "Q2", "4,65"]],
        );
        let records = FieldMapper.map_yield_records(&t).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].batch_id, "19x75");
        assert_eq!(records[1].volume, 0.0);
        assert!((records[2].volume - 4.65).abs() < 1e-12);
    }

    #[test]
    fn test_negative_volume_is_rejected() {
        let t = table("Table", &["Batch", "Quality", "Volume [m3]"], &[&["A", "Q1", "-1"]]);
        let err = FieldMapper.map_yield_records(&t).unwrap_err();
        assert!(matches!(err, ImportError::ValueRangeError { row: 2, .. }));
    }

    #[test]
    fn test_missing_grade_is_reported_with_row() {
        let t = table("Table", &["Batch", "Quality", "Volume [m3]"], &[&["A", "", "1.0"]]);
        let err = FieldMapper.map_yield_records(&t).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { row: 2, .. }));
    }

    #[test]
    fn test_item_specs_by_position() {
        let t = table(
            "Item Sizes per meter",
            &["Dimension", "m3/m"],
            &[&["19x75", "0.001425"], &["", ""], &["22x100", "0.0022"]],
        );
        let specs = FieldMapper.map_item_specs(&t).unwrap();
        assert_eq!(specs.len(), 2);
        assert!((specs["19x75"].volume_per_unit_length - 0.001425).abs() < 1e-12);
    }

    #[test]
    fn test_item_specs_rejects_zero_factor() {
        let t = table("Item Sizes per meter", &["Item", "M3 per meter"], &[&["A", "0"]]);
        assert!(FieldMapper.map_item_specs(&t).is_err());
    }

    #[test]
    fn test_map_shifts() {
        let t = table(
            "Shifts",
            &["Weekday", "Shift", "Hours", "Sequence"],
            &[&["Mon", "Early", "8", "1"], &["2", "", "7.5", ""], &["Funday", "X", "1", ""]],
        );
        let err = FieldMapper.map_shifts(&t).unwrap_err();
        assert!(matches!(err, ImportError::WeekdayFormatError { row: 4, .. }));

        let t = table(
            "Shifts",
            &["Weekday", "Shift", "Hours", "Sequence"],
            &[&["Mon", "Early", "8", "1"], &["2", "", "7.5", ""]],
        );
        let shifts = FieldMapper.map_shifts(&t).unwrap();
        assert_eq!(shifts[0].weekday, Weekday::Mon);
        assert_eq!(shifts[0].sequence, 1);
        assert_eq!(shifts[1].weekday, Weekday::Tue);
        assert_eq!(shifts[1].shift_name, DEFAULT_SHIFT_NAME);
    }

    #[test]
    fn test_hours_per_day() {
        let t = table("Hours per day", &["Hours"], &[&["7.5"]]);
        assert_eq!(FieldMapper.map_hours_per_day(&t).unwrap(), 7.5);

        let empty = table("Hours per day", &["Hours"], &[]);
        assert!(FieldMapper.map_hours_per_day(&empty).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert_eq!(parse_date_value("2026-12-25"), Some(expected));
        assert_eq!(parse_date_value("20261225"), Some(expected));
        assert_eq!(parse_date_value("2026-12-25 00:00:00"), Some(expected));
        assert_eq!(parse_date_value("25.12.2026"), Some(expected));
        // Excel 序列号 46381 = 2026-12-25
        assert_eq!(parse_date_value("46381"), Some(expected));
        assert_eq!(parse_date_value("christmas"), None);
    }
}
