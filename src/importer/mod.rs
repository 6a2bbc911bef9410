// ==========================================
// HTS 关税计算系统 - 导入层
// ==========================================
// 职责: 参考文件读取、分类、抽取、归并；运单明细读取
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod extractor;
pub mod file_parser;
pub mod importer_trait;
pub mod line_item_reader;
pub mod reference_importer;
pub mod reference_merger;
pub mod sheet_classifier;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use extractor::{extractor_for, AddCvdExtractor, GeneralRateExtractor, SpecificDutyExtractor};
pub use file_parser::{CsvParser, ExcelParser, RawSheet, RawWorkbook, UniversalFileParser};
pub use line_item_reader::LineItemReader;
pub use reference_importer::{
    FileFailure, FileIngestion, ReferenceBuild, ReferenceBuildReport, ReferenceImporter,
};
pub use reference_merger::ReferenceMerger;
pub use sheet_classifier::SheetClassifier;

// 重导出 Trait 接口
pub use importer_trait::{ReferenceExtractor, WorkbookParser};
