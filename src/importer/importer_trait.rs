// ==========================================
// HTS 关税计算系统 - 导入层 Trait
// ==========================================
// 职责: 定义文件解析与参考数据抽取接口（不包含实现）
// ==========================================

use crate::config::TariffSettings;
use crate::domain::reference::ExtractedTable;
use crate::domain::types::ReferenceCategory;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawWorkbook;
use std::path::Path;

// ==========================================
// WorkbookParser Trait
// ==========================================
// 用途: 将 xlsx/xls/csv 读成按 sheet 分组的字符串表
// 实现者: CsvParser / ExcelParser / UniversalFileParser
pub trait WorkbookParser {
    /// 解析文件为原始工作簿
    ///
    /// # 返回
    /// - Ok(RawWorkbook): sheet 列表（顺序与文件一致），每行为 表头 → 单元格文本
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_workbook(&self, file_path: &Path) -> ImportResult<RawWorkbook>;
}

// ==========================================
// ReferenceExtractor Trait
// ==========================================
// 用途: 将某一类参考工作簿重塑为 {HTS_Code, ...} 规范表
// 实现者: AddCvdExtractor / SpecificDutyExtractor / GeneralRateExtractor
pub trait ReferenceExtractor {
    /// 本抽取器处理的类别
    fn category(&self) -> ReferenceCategory;

    /// 抽取规范表
    ///
    /// # 返回
    /// - Ok(ExtractedTable): 编码已 clean
    /// - Err(ColumnNotFound): 必需列缺失（只影响当前文件）
    fn extract(
        &self,
        workbook: &RawWorkbook,
        settings: &TariffSettings,
    ) -> ImportResult<ExtractedTable>;
}
