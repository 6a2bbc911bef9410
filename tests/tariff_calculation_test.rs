// ==========================================
// 关税计算集成测试
// ==========================================
// 测试目标: 参考表 + 明细文件 → 计算报告 → 输出表 → CSV 导出
// ==========================================

mod test_helpers;

use hts_tariff::config::{config_keys, ConfigManager, TariffSettings};
use hts_tariff::domain::{LineStatus, ReferenceTable};
use hts_tariff::engine::{OutputTable, RecalcRequest, TariffCalculator};
use hts_tariff::export;
use hts_tariff::importer::{LineItemReader, ReferenceImporter};
use hts_tariff::logging;
use std::path::Path;
use test_helpers::*;

fn build_reference(dir: &Path) -> ReferenceTable {
    let files = write_reference_files(dir).expect("Failed to write fixtures");
    ReferenceImporter::new(TariffSettings::default())
        .build_from_paths(&files)
        .table
}

#[test]
fn test_end_to_end_calculation() {
    logging::init_test();

    let dir = create_test_dir().expect("Failed to create temp dir");
    let reference = build_reference(dir.path());
    let items_path = write_line_items_file(
        dir.path(),
        &[
            &["P-100", "7208.51.0030", "China", "1000", "10", "OCEAN"],
            &["P-101", "7208.51.0030", "Germany", "1000", "10", "AIR"],
            &["P-102", "", "China", "500", "1", "AIR"],
            &["P-103", "7604.10.9000", "Canada", "200", "5", "TRUCK"],
            &["P-104", "7208.51.0030", "Atlantis", "100", "1", "AIR"],
        ],
    )
    .expect("Failed to write line items");

    let items = LineItemReader.read_csv(&items_path).expect("Failed to read line items");
    let calculator = TariffCalculator::new(&TariffSettings::default());
    let report = calculator.evaluate_batch(&RecalcRequest::new(&reference, &items));

    // 行顺序与输入一致
    let statuses: Vec<LineStatus> = report.lines.iter().map(|l| l.status).collect();
    assert_eq!(
        statuses,
        vec![
            LineStatus::Computed,
            LineStatus::Computed,
            LineStatus::Skipped,
            LineStatus::Computed,
            LineStatus::Failed,
        ]
    );

    // China 原产：一般税率 Free + Steel 25% + China 25%
    let china_line = &report.lines[0];
    assert_close(china_line.coo_china_tariff, 25.0);
    assert_close(china_line.tariffs_usd, 500.0);
    assert_close(china_line.tariffs_and_fees_usd, 531.67);
    assert_eq!(china_line.potential_add_cvd_flag, "ADD");

    // 非 China 原产：不计 China 附加税
    let german_line = &report.lines[1];
    assert_eq!(german_line.coo_china_tariff, 0.0);
    assert_close(german_line.tariffs_and_fees_usd, 281.67);

    // 一般税率 5% + Aluminum 10%
    let aluminum_line = &report.lines[3];
    assert_close(aluminum_line.general_tariff_percentage, 5.0);
    assert_close(aluminum_line.aluminum_tariff, 10.0);
    assert_close(aluminum_line.tariffs_usd, 30.0);

    // 失败行不计入合计，汇总提示只有一条
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 5);
    let notice = report.failure_notice().expect("notice");
    assert!(notice.starts_with("1 行明细计算失败"));
    assert!(notice.contains("Atlantis"));
    assert_close(report.total_tariffs_and_fees_usd, 531.67 + 281.67 + 61.67);

    // 输出表：明细行 + 合计行
    let table = OutputTable::from_report(&report);
    assert_eq!(table.len(), report.lines.len() + 1);
    let total_row = table.rows.last().expect("total row");
    assert_eq!(total_row.part_number, None);
    assert_eq!(total_row.tariffs_usd, None);
    assert_eq!(
        total_row.tariffs_and_fees_usd,
        Some(report.total_tariffs_and_fees_usd)
    );
}

#[test]
fn test_compound_general_rate_with_general_only_reference() {
    let dir = create_test_dir().expect("Failed to create temp dir");
    let file = write_general_rate_file(dir.path()).expect("Failed to write fixture");
    let reference = ReferenceImporter::new(TariffSettings::default())
        .build_from_paths(&[file])
        .table;

    let items_path = write_line_items_file(
        dir.path(),
        &[&["P-200", "8471.30.0100", "USA", "1000", "50", "AIR"]],
    )
    .expect("Failed to write line items");
    let items = LineItemReader.read_csv(&items_path).expect("Failed to read line items");

    let report = TariffCalculator::new(&TariffSettings::default())
        .evaluate_batch(&RecalcRequest::new(&reference, &items));

    let line = &report.lines[0];
    assert_close(line.general_tariff_percentage, 19.2);
    assert_close(line.tariffs_usd, 192.0);
    assert_close(line.tariffs_and_fees_percent, 22.367);
}

#[test]
fn test_empty_coo_skips_china_duties() {
    let dir = create_test_dir().expect("Failed to create temp dir");
    let reference = build_reference(dir.path());
    let items_path = write_line_items_file(
        dir.path(),
        &[&["P-300", "7208510030", "", "1000", "", ""]],
    )
    .expect("Failed to write line items");
    let items = LineItemReader.read_csv(&items_path).expect("Failed to read line items");

    let report = TariffCalculator::new(&TariffSettings::default())
        .evaluate_batch(&RecalcRequest::new(&reference, &items));

    assert_eq!(report.lines[0].status, LineStatus::Computed);
    assert_eq!(report.lines[0].coo_china_tariff, 0.0);
    assert_close(report.lines[0].tariffs_usd, 250.0);
}

#[test]
fn test_configured_processing_fee() {
    let dir = create_test_dir().expect("Failed to create temp dir");
    let reference = build_reference(dir.path());

    let mut config = ConfigManager::new();
    config.set(config_keys::MERCHANDISE_PROCESSING_FEE, "27.75");
    let settings = TariffSettings::from_reader(&config).expect("valid settings");

    let items = vec![hts_tariff::RawLineItem::new(
        "P-400",
        "0101.21.0010",
        "USA",
        "100",
        "1",
        "COURIER",
    )];
    let report = TariffCalculator::new(&settings)
        .evaluate_batch(&RecalcRequest::new(&reference, &items));

    assert_close(report.lines[0].merchandise_processing_fee, 27.75);
    assert_close(report.total_tariffs_and_fees_usd, 27.75);
}

#[test]
fn test_export_csv_round_trip_shape() {
    let dir = create_test_dir().expect("Failed to create temp dir");
    let reference = build_reference(dir.path());
    let items = vec![
        hts_tariff::RawLineItem::new("P-500", "7208.51.0030", "China", "1000", "10", "OCEAN"),
        hts_tariff::RawLineItem::new("P-501", "7604.10.9000", "Mexico", "200", "5", "TRUCK"),
    ];
    let report = TariffCalculator::new(&TariffSettings::default())
        .evaluate_batch(&RecalcRequest::new(&reference, &items));
    let table = OutputTable::from_report(&report);

    let out_path = dir.path().join("result.csv");
    export::write_output_csv(&table, &out_path).expect("Failed to export");

    let mut reader = csv::Reader::from_path(&out_path).expect("Failed to open export");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.len(), 16);
    assert_eq!(&headers[0], "SLB Part Number");
    assert_eq!(&headers[15], "Tariffs & Fees to be Paid (USD)");

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("records");
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "P-500");

    let total_record = &records[2];
    assert!(total_record.iter().take(15).all(|field| field.is_empty()));
    let total: f64 = total_record[15].parse().expect("numeric total");
    assert_close(total, report.total_tariffs_and_fees_usd);
}
