// ==========================================
// HTS 关税计算系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / HTS 编码 clean / 附加税率单元格解析
// ==========================================

use crate::domain::hts;

pub struct DataCleaner;

impl DataCleaner {
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 空白视为缺失
    pub fn normalize_null(&self, value: &str) -> Option<String> {
        let cleaned = self.clean_text(value);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// HTS 单元格 → clean 编码（空单元格返回 None）
    pub fn clean_hts_cell(&self, value: &str) -> Option<String> {
        self.normalize_null(value)
            .map(|v| hts::clean(&v))
            .filter(|code| !code.is_empty())
    }

    /// 解析附加税率单元格为小数比例
    ///
    /// - 空单元格 → Some(0.0)（空 = 0% 附加税）
    /// - "25%" → Some(0.25)
    /// - "0.25" → Some(0.25)（已是小数比例）
    /// - 无法解析 → None（由调用方记录告警并按 0 处理）
    pub fn parse_surcharge_rate(&self, value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }

        let parsed = match trimmed.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
            None => trimmed.parse::<f64>().ok(),
        };

        parsed.filter(|r| r.is_finite())
    }
}
