// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置文件读取、校验、保存, 以及配置对排产的影响
// ==========================================

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use wood_planner::config::{ConfigError, ConfigManager, PlannerConfig};
use wood_planner::domain::{
    BatchYieldRecord, CalendarSharing, CalendarTemplate, HolidaySet, ItemSpec, WorkItem,
};
use wood_planner::engine::{PlanOrchestrator, PlanningInput};

// ==========================================
// 测试辅助函数
// ==========================================

fn simple_input() -> PlanningInput {
    let mut item_specs = HashMap::new();
    for batch in ["A", "B"] {
        item_specs.insert(
            batch.to_string(),
            ItemSpec {
                volume_per_unit_length: 0.001,
            },
        );
    }
    PlanningInput {
        yield_records: vec![
            BatchYieldRecord::new("A", "Q1", 1.0),
            BatchYieldRecord::new("B", "Q1", 1.0),
        ],
        item_specs,
        template: CalendarTemplate::uniform("Day", 8.0),
        holidays: HolidaySet::new(),
    }
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "speed_m_per_min": 1, "calendar_sharing": "INDEPENDENT", "workbook": { "yield_sheet": "Output" } }"#,
    )
    .unwrap();

    let manager = ConfigManager::load(Some(path.as_path())).unwrap();
    let config = manager.config();

    assert_eq!(manager.source_path(), Some(path.as_path()));
    assert_eq!(config.speed_m_per_min, 1.0);
    assert_eq!(config.calendar_sharing, CalendarSharing::Independent);
    assert_eq!(config.workbook.yield_sheet, "Output");
    assert_eq!(config.workbook.item_sheet, "Item Sizes per meter");

    let defaults = PlannerConfig::default();
    assert_eq!(config.target_grade, defaults.target_grade);
    assert_eq!(config.availability_pct, defaults.availability_pct);
    assert_eq!(config.skip_holidays, defaults.skip_holidays);
    assert_eq!(config.max_lookahead_days, 1826);
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigManager::load(Some(dir.path().join("missing.json").as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_invalid_values_rejected() {
    let dir = tempfile::tempdir().unwrap();

    for (body, key) in [
        (r#"{ "speed_m_per_min": 0 }"#, "speed_m_per_min"),
        (r#"{ "availability_pct": 120 }"#, "availability_pct"),
        (r#"{ "target_grade": "  " }"#, "target_grade"),
        (r#"{ "max_lookahead_days": 0 }"#, "max_lookahead_days"),
    ] {
        let path = dir.path().join(format!("{}.json", key));
        fs::write(&path, body).unwrap();

        match ConfigManager::load_from_path(&path) {
            Err(ConfigError::InvalidValue { key: k, .. }) => assert_eq!(k, key),
            other => panic!("expected InvalidValue for {}, got {:?}", key, other),
        }
    }
}

#[test]
fn test_unknown_sharing_value_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "calendar_sharing": "ROUND_ROBIN" }"#).unwrap();

    let err = ConfigManager::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_saved_config_drives_planning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut manager = ConfigManager::with_defaults();
    manager
        .update(|c| {
            c.speed_m_per_min = 1.0;
            c.calendar_sharing = CalendarSharing::Independent;
        })
        .unwrap();
    manager.save_to_path(&path).unwrap();

    let config = ConfigManager::load_from_path(&path).unwrap().into_config();
    let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    // 60 m/h, 良率 100%: 每个工单 4h, 独立时间线都从起始日开始
    let plan = PlanOrchestrator::new(config)
        .plan(
            &simple_input(),
            &[WorkItem::new("A", 240.0), WorkItem::new("B", 240.0)],
            start,
        )
        .unwrap();

    assert_eq!(plan.sharing, CalendarSharing::Independent);
    for summary in &plan.summaries {
        assert_eq!(summary.first_date, Some(start));
        assert!((summary.required_hours - 4.0).abs() < 1e-9);
    }
}
