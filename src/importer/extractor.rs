// ==========================================
// HTS 关税计算系统 - 参考数据抽取器实现
// ==========================================
// 职责: 将三类参考工作簿重塑为 {HTS_Code, ...} 规范表
// 红线: 编码一律转为 clean 形式；空编码行丢弃
// ==========================================

use crate::config::TariffSettings;
use crate::domain::reference::{AddCvdRow, ExtractedTable, GeneralRateRow, SpecificDutyRow};
use crate::domain::types::{AddCvdFlag, ReferenceCategory, SurchargeCategory};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawSheet, RawWorkbook};
use crate::importer::importer_trait::ReferenceExtractor;
use tracing::{debug, warn};

fn column_not_found(workbook: &RawWorkbook, sheet: &RawSheet, expected: &[String]) -> ImportError {
    ImportError::ColumnNotFound {
        file: workbook.name.clone(),
        sheet: sheet.name.clone(),
        expected: expected.to_vec(),
    }
}

// ==========================================
// ADD/CVD 抽取器
// ==========================================
// 每个名称含 ADD/CVD 的 sheet 打上对应标记后按顺序拼接（保留重复）
pub struct AddCvdExtractor;

impl ReferenceExtractor for AddCvdExtractor {
    fn category(&self) -> ReferenceCategory {
        ReferenceCategory::AddCvd
    }

    fn extract(
        &self,
        workbook: &RawWorkbook,
        settings: &TariffSettings,
    ) -> ImportResult<ExtractedTable> {
        let cleaner = DataCleaner;
        let mut rows = Vec::new();

        for sheet in &workbook.sheets {
            let flag = match AddCvdFlag::from_sheet_name(&sheet.name) {
                Some(flag) => flag,
                None => continue,
            };

            let code_column = sheet
                .find_column(&settings.add_cvd_code_aliases)
                .ok_or_else(|| column_not_found(workbook, sheet, &settings.add_cvd_code_aliases))?;

            let before = rows.len();
            rows.extend(sheet.rows.iter().filter_map(|row| {
                cleaner
                    .clean_hts_cell(RawSheet::cell(row, code_column))
                    .map(|hts_code| AddCvdRow { hts_code, flag })
            }));

            debug!(
                file = %workbook.name,
                sheet = %sheet.name,
                flag = %flag,
                rows = rows.len() - before,
                "抽取 ADD/CVD sheet"
            );
        }

        Ok(ExtractedTable::AddCvd(rows))
    }
}

// ==========================================
// 附加税抽取器（China / Aluminum / Steel）
// ==========================================
// 税率列以类别命名；空单元格 = 0% 附加税
pub struct SpecificDutyExtractor;

impl ReferenceExtractor for SpecificDutyExtractor {
    fn category(&self) -> ReferenceCategory {
        ReferenceCategory::SpecificDuty
    }

    fn extract(
        &self,
        workbook: &RawWorkbook,
        settings: &TariffSettings,
    ) -> ImportResult<ExtractedTable> {
        let cleaner = DataCleaner;
        let mut rows = Vec::new();

        for sheet in &workbook.sheets {
            let category = match SurchargeCategory::from_sheet_name(&sheet.name) {
                Some(category) => category,
                None => continue,
            };

            let code_column = settings.specific_duty_code_column.as_str();
            if !sheet.has_column(code_column) {
                return Err(column_not_found(
                    workbook,
                    sheet,
                    &[code_column.to_string()],
                ));
            }

            let rate_candidates = [category.as_str(), category.column_label()];
            let rate_column = sheet.find_column(&rate_candidates).ok_or_else(|| {
                let expected: Vec<String> =
                    rate_candidates.iter().map(|s| s.to_string()).collect();
                column_not_found(workbook, sheet, &expected)
            })?;

            for row in &sheet.rows {
                let hts_code = match cleaner.clean_hts_cell(RawSheet::cell(row, code_column)) {
                    Some(code) => code,
                    None => continue,
                };

                let raw_rate = RawSheet::cell(row, rate_column);
                let rate = cleaner.parse_surcharge_rate(raw_rate).unwrap_or_else(|| {
                    warn!(
                        file = %workbook.name,
                        sheet = %sheet.name,
                        hts_code = %hts_code,
                        value = %raw_rate,
                        "附加税率无法解析，按 0 处理"
                    );
                    0.0
                });

                rows.push(SpecificDutyRow {
                    hts_code,
                    category,
                    rate,
                });
            }

            debug!(file = %workbook.name, sheet = %sheet.name, category = %category, "抽取附加税 sheet");
        }

        Ok(ExtractedTable::SpecificDuty(rows))
    }
}

// ==========================================
// 一般税率抽取器
// ==========================================
// 读取第一个 sheet；HTS 列按别名优先级查找
pub struct GeneralRateExtractor;

impl ReferenceExtractor for GeneralRateExtractor {
    fn category(&self) -> ReferenceCategory {
        ReferenceCategory::GeneralRate
    }

    fn extract(
        &self,
        workbook: &RawWorkbook,
        settings: &TariffSettings,
    ) -> ImportResult<ExtractedTable> {
        let cleaner = DataCleaner;
        let sheet = workbook
            .sheets
            .first()
            .ok_or_else(|| ImportError::EmptyWorkbook(workbook.name.clone()))?;

        let code_column = sheet
            .find_column(&settings.hts_column_aliases)
            .ok_or_else(|| column_not_found(workbook, sheet, &settings.hts_column_aliases))?;

        let rate_column = settings.general_rate_column.as_str();
        if !sheet.has_column(rate_column) {
            warn!(file = %workbook.name, column = %rate_column, "一般税率列缺失，税率视为空");
        }

        let rows: Vec<GeneralRateRow> = sheet
            .rows
            .iter()
            .filter_map(|row| {
                cleaner
                    .clean_hts_cell(RawSheet::cell(row, code_column))
                    .map(|hts_code| GeneralRateRow {
                        hts_code,
                        general_rate_of_duty: cleaner
                            .normalize_null(RawSheet::cell(row, rate_column)),
                    })
            })
            .collect();

        debug!(file = %workbook.name, column = %code_column, rows = rows.len(), "抽取一般税率");
        Ok(ExtractedTable::GeneralRate(rows))
    }
}

/// 按类别取对应抽取器
pub fn extractor_for(category: ReferenceCategory) -> Box<dyn ReferenceExtractor> {
    match category {
        ReferenceCategory::AddCvd => Box::new(AddCvdExtractor),
        ReferenceCategory::SpecificDuty => Box::new(SpecificDutyExtractor),
        ReferenceCategory::GeneralRate => Box::new(GeneralRateExtractor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TariffSettings {
        TariffSettings::default()
    }

    #[test]
    fn test_add_cvd_extractor_labels_and_concatenates() {
        let workbook = RawWorkbook::new(
            "addcvd.xlsx",
            vec![
                RawSheet::from_rows(
                    "ADD Orders",
                    &["HSCODE", "Case"],
                    &[vec!["7208.51.0030", "A-570"], vec!["", "A-571"]],
                ),
                RawSheet::from_rows("Notes", &["Text"], &[vec!["ignored"]]),
                RawSheet::from_rows(
                    "CVD Orders",
                    &["HSCODE"],
                    &[vec!["7208.51.0030"], vec!["7604.10.9000"]],
                ),
            ],
        );

        let table = AddCvdExtractor.extract(&workbook, &settings()).unwrap();

        assert_eq!(
            table,
            ExtractedTable::AddCvd(vec![
                AddCvdRow { hts_code: "7208510030".to_string(), flag: AddCvdFlag::Add },
                AddCvdRow { hts_code: "7208510030".to_string(), flag: AddCvdFlag::Cvd },
                AddCvdRow { hts_code: "7604109000".to_string(), flag: AddCvdFlag::Cvd },
            ])
        );
    }

    #[test]
    fn test_add_cvd_extractor_missing_code_column() {
        let workbook = RawWorkbook::new(
            "addcvd.xlsx",
            vec![RawSheet::from_rows("ADD", &["Product"], &[vec!["x"]])],
        );

        let result = AddCvdExtractor.extract(&workbook, &settings());
        assert!(matches!(result, Err(ImportError::ColumnNotFound { sheet, .. }) if sheet == "ADD"));
    }

    #[test]
    fn test_specific_duty_extractor_defaults_empty_to_zero() {
        let workbook = RawWorkbook::new(
            "steel.xlsx",
            vec![RawSheet::from_rows(
                "Steel",
                &["HTS", "Steel"],
                &[
                    vec!["7208.51.0030", "0.25"],
                    vec!["7210.49.0090", ""],
                    vec!["7211.14.0030", "25%"],
                    vec!["7212.10.0000", "abc"],
                ],
            )],
        );

        let table = SpecificDutyExtractor.extract(&workbook, &settings()).unwrap();
        let rates: Vec<f64> = match table {
            ExtractedTable::SpecificDuty(rows) => {
                assert!(rows.iter().all(|r| r.category == SurchargeCategory::Steel));
                rows.into_iter().map(|r| r.rate).collect()
            }
            other => panic!("unexpected table: {:?}", other),
        };
        assert_eq!(rates, vec![0.25, 0.0, 0.25, 0.0]);
    }

    #[test]
    fn test_specific_duty_extractor_accepts_long_column_label() {
        let workbook = RawWorkbook::new(
            "china.xlsx",
            vec![RawSheet::from_rows(
                "China",
                &["HTS", "China Duties"],
                &[vec!["8471300100", "0.25"]],
            )],
        );

        let table = SpecificDutyExtractor.extract(&workbook, &settings()).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_specific_duty_extractor_requires_hts_column() {
        let workbook = RawWorkbook::new(
            "china.xlsx",
            vec![RawSheet::from_rows("China", &["HSCODE", "China"], &[])],
        );

        let result = SpecificDutyExtractor.extract(&workbook, &settings());
        assert!(matches!(result, Err(ImportError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_general_rate_extractor_alias_priority() {
        let workbook = RawWorkbook::new(
            "rates.xlsx",
            vec![RawSheet::from_rows(
                "Sheet1",
                &["HSCODE", "HTS Number", "General Rate of Duty"],
                &[vec!["0000", "8471.30.0100", "Free"], vec!["1111", "7208.51.0030", ""]],
            )],
        );

        let table = GeneralRateExtractor.extract(&workbook, &settings()).unwrap();

        assert_eq!(
            table,
            ExtractedTable::GeneralRate(vec![
                GeneralRateRow {
                    hts_code: "8471300100".to_string(),
                    general_rate_of_duty: Some("Free".to_string()),
                },
                GeneralRateRow {
                    hts_code: "7208510030".to_string(),
                    general_rate_of_duty: None,
                },
            ])
        );
    }

    #[test]
    fn test_general_rate_extractor_column_not_found() {
        let workbook = RawWorkbook::new(
            "rates.xlsx",
            vec![RawSheet::from_rows("Sheet1", &["Code", "General Rate of Duty"], &[])],
        );

        let result = GeneralRateExtractor.extract(&workbook, &settings());
        match result {
            Err(ImportError::ColumnNotFound { file, expected, .. }) => {
                assert_eq!(file, "rates.xlsx");
                assert_eq!(expected, vec!["HTS", "HTS Number", "HSCODE"]);
            }
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_extractor_for_category() {
        for category in [
            ReferenceCategory::AddCvd,
            ReferenceCategory::SpecificDuty,
            ReferenceCategory::GeneralRate,
        ] {
            assert_eq!(extractor_for(category).category(), category);
        }
    }
}
