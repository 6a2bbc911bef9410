// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成参考文件与明细 CSV
// 说明: CSV 的 sheet 名取文件名（不含扩展名），可借此模拟工作簿分类
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 创建临时目录（需要保持存活）
pub fn create_test_dir() -> Result<TempDir, Box<dyn Error>> {
    Ok(tempfile::tempdir()?)
}

/// 写入 CSV 文件
pub fn write_csv(
    dir: &Path,
    file_name: &str,
    headers: &[&str],
    rows: &[&[&str]],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(file_name);
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(*row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// ADD/CVD 参考文件（sheet 名 "ADD_orders"）
pub fn write_add_cvd_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "ADD_orders.csv",
        &["HSCODE", "Case Number"],
        &[
            &["7208.51.0030", "A-570-001"],
            &["7604.10.9000", "A-570-002"],
            &["", "A-570-003"],
        ],
    )
}

/// Steel 附加税文件
pub fn write_steel_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "Steel.csv",
        &["HTS", "Steel"],
        &[&["7208.51.0030", "0.25"], &["7210.49.0090", ""]],
    )
}

/// Aluminum 附加税文件
pub fn write_aluminum_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "Aluminum.csv",
        &["HTS", "Aluminum"],
        &[&["7604.10.9000", "10%"]],
    )
}

/// China 附加税文件
pub fn write_china_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "China.csv",
        &["HTS", "China"],
        &[&["7208.51.0030", "0.25"], &["8471.30.0100", "0.25"]],
    )
}

/// 一般税率文件
pub fn write_general_rate_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "general_rates.csv",
        &["HTS Number", "Description", "General Rate of Duty"],
        &[
            &["7208.51.0030", "Flat-rolled steel", "Free"],
            &["7604.10.9000", "Aluminum bars", "5%"],
            &["8471.30.0100", "Portable computers", "$0.44/kg + 17%"],
        ],
    )
}

/// 缺少 HTS 列的一般税率文件
pub fn write_broken_general_rate_file(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "broken_rates.csv",
        &["Code", "General Rate of Duty"],
        &[&["8471300100", "Free"]],
    )
}

/// 全部有效参考文件
pub fn write_reference_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    Ok(vec![
        write_add_cvd_file(dir)?,
        write_steel_file(dir)?,
        write_aluminum_file(dir)?,
        write_china_file(dir)?,
        write_general_rate_file(dir)?,
    ])
}

/// 运单明细文件
pub fn write_line_items_file(
    dir: &Path,
    rows: &[&[&str]],
) -> Result<PathBuf, Box<dyn Error>> {
    write_csv(
        dir,
        "line_items.csv",
        &["SLB Part Number", "US HTS", "COO", "Value", "Weight", "MOT"],
        rows,
    )
}

/// 浮点近似断言
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
