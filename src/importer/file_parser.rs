// ==========================================
// 木材生产排班计划 - 文件解析器实现
// ==========================================
// 支持: Excel 工作簿 (.xlsx/.xls/.ods, 按表名读取) / CSV (.csv)
// 输出: 原始表 (表头 + 行), 值统一为去空白后的字符串
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader, Sheets};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,            // 保留原始列顺序
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 源文件行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

impl RawTable {
    fn from_rows<I, R>(name: &str, mut rows: I) -> Self
    where
        I: Iterator<Item = R>,
        R: IntoIterator<Item = String>,
    {
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.into_iter().map(|h| h.trim().to_string()).collect(),
            None => Vec::new(),
        };

        let mut table_rows = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let mut values = HashMap::new();
            for (col_idx, value) in data_row.into_iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            table_rows.push(RawRow {
                row_number: idx + 2,
                values,
            });
        }

        Self {
            name: name.to_string(),
            headers,
            rows: table_rows,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(|v| v.to_string()).collect::<Vec<String>>());
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(RawTable::from_rows(&name, records.into_iter()))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    workbook: Sheets<BufReader<File>>,
}

impl ExcelParser {
    /// 打开工作簿（.xlsx/.xlsm/.xls/.ods）
    pub fn open(file_path: &Path) -> ImportResult<Self> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let workbook = open_workbook_auto(path)?;
        Ok(Self { workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    pub fn has_sheet(&self, sheet_name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == sheet_name)
    }

    /// 读取指定工作表（第一行为表头）
    pub fn read_sheet(&mut self, sheet_name: &str) -> ImportResult<RawTable> {
        if !self.has_sheet(sheet_name) {
            return Err(ImportError::SheetNotFound(sheet_name.to_string()));
        }

        let range = self.workbook.worksheet_range(sheet_name)?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

        Ok(RawTable::from_rows(sheet_name, rows))
    }
}
