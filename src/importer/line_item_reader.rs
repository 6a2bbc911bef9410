// ==========================================
// HTS 关税计算系统 - 运单明细读取
// ==========================================
// 职责: 读取明细 CSV（列: SLB Part Number / US HTS / COO / Value / Weight / MOT）
// 红线: 只做字符串读取，数值与枚举校验在计算时逐行进行
// ==========================================

use crate::domain::shipment::RawLineItem;
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub struct LineItemReader;

impl LineItemReader {
    /// 从 CSV 文件读取明细
    pub fn read_csv<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<RawLineItem>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let items = self.read_from(File::open(path)?)?;
        info!(file = %path.display(), rows = items.len(), "读取运单明细");
        Ok(items)
    }

    /// 从任意输入流读取明细（缺失列按空串处理，空白行跳过）
    pub fn read_from<R: Read>(&self, input: R) -> ImportResult<Vec<RawLineItem>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let mut items = Vec::new();
        for result in reader.deserialize::<RawLineItem>() {
            let item = result?;
            if item == RawLineItem::default() {
                continue;
            }
            items.push(item);
        }
        Ok(items)
    }
}
