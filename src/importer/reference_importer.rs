// ==========================================
// HTS 关税计算系统 - 参考表构建流程
// ==========================================
// 职责: 解析 → 分类 → 抽取 → 归并，生成统一参考表与构建报告
// 红线: 单个文件失败只记录并跳过，不影响其他文件
// 生命周期: 每次上传整体重建，同一输入重复构建结果相同
// ==========================================

use crate::config::TariffSettings;
use crate::domain::reference::{ExtractedTable, ReferenceTable};
use crate::domain::types::ReferenceCategory;
use crate::importer::error::ImportResult;
use crate::importer::extractor::extractor_for;
use crate::importer::file_parser::{file_label, RawWorkbook, UniversalFileParser};
use crate::importer::importer_trait::WorkbookParser;
use crate::importer::reference_merger::ReferenceMerger;
use crate::importer::sheet_classifier::SheetClassifier;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 构建报告
// ==========================================

/// 成功抽取的文件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileIngestion {
    pub file_name: String,
    pub category: ReferenceCategory,
    pub row_count: usize,
}

/// 被跳过的文件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceBuildReport {
    pub batch_id: String,          // 批次 ID（UUID）
    pub built_at: DateTime<Utc>,   // 构建时间
    pub files: Vec<FileIngestion>, // 成功文件
    pub failures: Vec<FileFailure>, // 失败文件
}

impl ReferenceBuildReport {
    fn start() -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            built_at: Utc::now(),
            files: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// 构建结果：参考表 + 报告
#[derive(Debug, Clone)]
pub struct ReferenceBuild {
    pub table: ReferenceTable,
    pub report: ReferenceBuildReport,
}

// ==========================================
// ReferenceImporter
// ==========================================
pub struct ReferenceImporter<P = UniversalFileParser>
where
    P: WorkbookParser,
{
    settings: TariffSettings,
    parser: P,
    classifier: SheetClassifier,
    merger: ReferenceMerger,
}

impl ReferenceImporter<UniversalFileParser> {
    pub fn new(settings: TariffSettings) -> Self {
        Self::with_parser(settings, UniversalFileParser)
    }
}

impl<P: WorkbookParser> ReferenceImporter<P> {
    pub fn with_parser(settings: TariffSettings, parser: P) -> Self {
        Self {
            settings,
            parser,
            classifier: SheetClassifier,
            merger: ReferenceMerger,
        }
    }

    /// 从文件构建参考表
    ///
    /// # 返回
    /// 始终返回构建结果；无法解析或抽取的文件记录在 report.failures
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub fn build_from_paths<Q: AsRef<Path>>(&self, paths: &[Q]) -> ReferenceBuild {
        let mut report = ReferenceBuildReport::start();
        info!(batch_id = %report.batch_id, "开始构建参考表");

        let mut tables = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match self.parser.parse_workbook(path) {
                Ok(workbook) => {
                    if let Some(table) = self.ingest(&workbook, &mut report) {
                        tables.push(table);
                    }
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "参考文件解析失败，已跳过");
                    report.failures.push(FileFailure {
                        file_name: file_label(path),
                        message: e.to_string(),
                    });
                }
            }
        }

        self.finish(tables, report)
    }

    /// 从内存中的工作簿构建参考表
    #[instrument(skip(self, workbooks), fields(count = workbooks.len()))]
    pub fn build_from_workbooks(&self, workbooks: Vec<RawWorkbook>) -> ReferenceBuild {
        let mut report = ReferenceBuildReport::start();
        info!(batch_id = %report.batch_id, "开始构建参考表");

        let tables = workbooks
            .iter()
            .filter_map(|workbook| self.ingest(workbook, &mut report))
            .collect();

        self.finish(tables, report)
    }

    /// 分类并抽取单个工作簿
    pub fn extract_workbook(&self, workbook: &RawWorkbook) -> ImportResult<ExtractedTable> {
        let category = self.classifier.classify(&workbook.sheet_names());
        debug!(file = %workbook.name, category = %category, "参考文件分类");
        extractor_for(category).extract(workbook, &self.settings)
    }

    fn ingest(
        &self,
        workbook: &RawWorkbook,
        report: &mut ReferenceBuildReport,
    ) -> Option<ExtractedTable> {
        match self.extract_workbook(workbook) {
            Ok(table) => {
                report.files.push(FileIngestion {
                    file_name: workbook.name.clone(),
                    category: table.category(),
                    row_count: table.row_count(),
                });
                Some(table)
            }
            Err(e) => {
                warn!(file = %workbook.name, error = %e, "参考文件抽取失败，已跳过");
                report.failures.push(FileFailure {
                    file_name: workbook.name.clone(),
                    message: e.to_string(),
                });
                None
            }
        }
    }

    fn finish(&self, tables: Vec<ExtractedTable>, report: ReferenceBuildReport) -> ReferenceBuild {
        let table = self.merger.merge(tables);

        info!(
            batch_id = %report.batch_id,
            rows = table.len(),
            files = report.files.len(),
            failed = report.failures.len(),
            "参考表构建完成"
        );

        ReferenceBuild { table, report }
    }
}
