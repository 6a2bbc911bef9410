// ==========================================
// HTS 关税计算系统 - 文件解析器实现
// ==========================================
// 职责: 参考文件读取与解析（保留全部 sheet 名称用于分类）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::WorkbookParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// 原始表结构
// ==========================================

/// 单个 sheet：表头 + 数据行（表头 → 单元格文本，已 trim）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawSheet {
    /// 从表头与行数据构造（行长度不足的单元格视为空）
    pub fn from_rows(name: &str, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        let value = row.get(idx).map(|v| v.trim()).unwrap_or("");
                        (header.clone(), value.to_string())
                    })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// 按优先级顺序查找第一个存在的列名
    pub fn find_column<'a, S: AsRef<str>>(&self, candidates: &'a [S]) -> Option<&'a str> {
        candidates
            .iter()
            .map(|c| c.as_ref())
            .find(|c| self.has_column(c))
    }

    /// 取单元格文本（缺失返回空串）
    pub fn cell<'r>(row: &'r HashMap<String, String>, column: &str) -> &'r str {
        row.get(column).map(|v| v.as_str()).unwrap_or("")
    }
}

/// 工作簿：文件名 + sheet 列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkbook {
    pub name: String,
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    pub fn new(name: &str, sheets: Vec<RawSheet>) -> Self {
        Self {
            name: name.to_string(),
            sheets,
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_blank_row(row: &HashMap<String, String>) -> bool {
    row.values().all(|v| v.is_empty())
}

// ==========================================
// CSV Parser 实现
// ==========================================
// CSV 只有一个 sheet，以文件名（不含扩展名）作为 sheet 名
pub struct CsvParser;

impl WorkbookParser for CsvParser {
    fn parse_workbook(&self, file_path: &Path) -> ImportResult<RawWorkbook> {
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

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if is_blank_row(&row_map) {
                continue;
            }

            rows.push(row_map);
        }

        let sheet_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(RawWorkbook::new(
            &file_label(path),
            vec![RawSheet {
                name: sheet_name,
                headers,
                rows,
            }],
        ))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取全部 sheet（分类依赖 sheet 名称）
pub struct ExcelParser;

impl WorkbookParser for ExcelParser {
    fn parse_workbook(&self, file_path: &Path) -> ImportResult<RawWorkbook> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（xlsx/xls 自动识别）
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::EmptyWorkbook(file_label(path)));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;

            // 提取表头（第一行），空 sheet 保留名称
            let mut rows_iter = range.rows();
            let headers: Vec<String> = match rows_iter.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
                None => Vec::new(),
            };

            // 读取数据行
            let mut rows = Vec::new();
            for data_row in rows_iter {
                let mut row_map = HashMap::new();

                for (col_idx, cell) in data_row.iter().enumerate() {
                    if let Some(header) = headers.get(col_idx) {
                        row_map.insert(header.clone(), cell.to_string().trim().to_string());
                    }
                }

                // 跳过完全空白的行
                if is_blank_row(&row_map) {
                    continue;
                }

                rows.push(row_map);
            }

            tracing::debug!(sheet = %sheet_name, rows = rows.len(), "读取 sheet");
            sheets.push(RawSheet {
                name: sheet_name,
                headers,
                rows,
            });
        }

        Ok(RawWorkbook::new(&file_label(path), sheets))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl WorkbookParser for UniversalFileParser {
    fn parse_workbook(&self, file_path: &Path) -> ImportResult<RawWorkbook> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_workbook(file_path),
            "xlsx" | "xls" => ExcelParser.parse_workbook(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_uses_file_stem_as_sheet_name() {
        let mut temp_file = Builder::new().prefix("China").suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "HTS,China").unwrap();
        writeln!(temp_file, "8471.30.0100,0.25").unwrap();

        let workbook = CsvParser.parse_workbook(temp_file.path()).unwrap();

        assert_eq!(workbook.sheets.len(), 1);
        assert!(workbook.sheets[0].name.starts_with("China"));
        assert_eq!(workbook.sheets[0].headers, vec!["HTS", "China"]);
        assert_eq!(
            RawSheet::cell(&workbook.sheets[0].rows[0], "HTS"),
            "8471.30.0100"
        );
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "HTS,General Rate of Duty").unwrap();
        writeln!(temp_file, "8471300100,Free").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "7208510030,5.3%").unwrap();

        let workbook = CsvParser.parse_workbook(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(workbook.sheets[0].rows.len(), 2);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_workbook(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_workbook(Path::new("rates.pdf"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "pdf"));
    }

    #[test]
    fn test_find_column_respects_priority() {
        let sheet = RawSheet::from_rows("Sheet1", &["HSCODE", "HTS Number"], &[]);
        let aliases = ["HTS", "HTS Number", "HSCODE"];
        assert_eq!(sheet.find_column(&aliases), Some("HTS Number"));
        assert_eq!(sheet.find_column(&["Missing"]), None);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let sheet = RawSheet::from_rows("S", &["A", "B"], &[vec!["1"]]);
        assert_eq!(RawSheet::cell(&sheet.rows[0], "B"), "");
    }
}
