// ==========================================
// 木材生产排班计划 - 导入层
// ==========================================
// 职责: 外部表格数据 → 领域记录
// 支持: Excel 工作簿, CSV 目录
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod workbook;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawTable};
pub use workbook::WorkbookLoader;
