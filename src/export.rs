// ==========================================
// HTS 关税计算系统 - 结果导出
// ==========================================
// 职责: 将输出表写为 CSV（表头为显示列名，空值留空）
// ==========================================

use crate::engine::output_table::OutputTable;
use crate::importer::error::ImportResult;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 写入任意输出流
pub fn write_output<W: Write>(table: &OutputTable, output: W) -> ImportResult<()> {
    let mut writer = Writer::from_writer(output);
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 写入 CSV 文件
pub fn write_output_csv<P: AsRef<Path>>(table: &OutputTable, path: P) -> ImportResult<()> {
    let path = path.as_ref();
    write_output(table, File::create(path)?)?;
    info!(file = %path.display(), rows = table.len(), "导出计算结果");
    Ok(())
}
