// ==========================================
// HTS 关税计算系统 - 输出表组装
// ==========================================
// 职责: 将 TariffReport 展开为 16 列输出行 + 末尾合计行
// 列顺序: 6 个输入列 → 10 个计算列（与导出文件一致）
// ==========================================

use crate::domain::shipment::{TariffLine, TariffReport};
use crate::domain::types::LineStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTableRow {
    // ===== 输入列 =====
    #[serde(rename = "SLB Part Number")]
    pub part_number: Option<String>,
    #[serde(rename = "US HTS")]
    pub us_hts: Option<String>,
    #[serde(rename = "COO")]
    pub coo: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "Weight")]
    pub weight: Option<String>,
    #[serde(rename = "MOT")]
    pub mot: Option<String>,

    // ===== 计算列 =====
    #[serde(rename = "General Tariff Percentage")]
    pub general_tariff_percentage: Option<f64>,
    #[serde(rename = "COO China Tariff")]
    pub coo_china_tariff: Option<f64>,
    #[serde(rename = "Aluminum Tariff")]
    pub aluminum_tariff: Option<f64>,
    #[serde(rename = "Steel Tariff")]
    pub steel_tariff: Option<f64>,
    #[serde(rename = "Potential ADD/CVD Flag")]
    pub potential_add_cvd_flag: Option<String>,
    #[serde(rename = "CBP Merchandise Processing Fee")]
    pub merchandise_processing_fee: Option<f64>,
    #[serde(rename = "CBP Harbor Maintenance Fee")]
    pub harbor_maintenance_fee: Option<f64>,
    #[serde(rename = "Tariffs & Fees to be Paid (%)")]
    pub tariffs_and_fees_percent: Option<f64>,
    #[serde(rename = "Tariffs to be Paid (USD)")]
    pub tariffs_usd: Option<f64>,
    #[serde(rename = "Tariffs & Fees to be Paid (USD)")]
    pub tariffs_and_fees_usd: Option<f64>,
}

impl OutputTableRow {
    /// 明细行；Failed 行只回显输入，计算列留空
    pub fn from_line(line: &TariffLine) -> Self {
        let input = &line.input;
        let mut row = Self {
            part_number: Some(input.part_number.clone()),
            us_hts: Some(input.us_hts.clone()),
            coo: Some(input.coo.clone()),
            value: Some(input.value.clone()),
            weight: Some(input.weight.clone()),
            mot: Some(input.mot.clone()),
            ..Self::default()
        };

        if line.status == LineStatus::Failed {
            return row;
        }

        row.general_tariff_percentage = Some(line.general_tariff_percentage);
        row.coo_china_tariff = Some(line.coo_china_tariff);
        row.aluminum_tariff = Some(line.aluminum_tariff);
        row.steel_tariff = Some(line.steel_tariff);
        row.potential_add_cvd_flag = Some(line.potential_add_cvd_flag.clone());
        row.merchandise_processing_fee = Some(line.merchandise_processing_fee);
        row.harbor_maintenance_fee = Some(line.harbor_maintenance_fee);
        row.tariffs_and_fees_percent = Some(line.tariffs_and_fees_percent);
        row.tariffs_usd = Some(line.tariffs_usd);
        row.tariffs_and_fees_usd = Some(line.tariffs_and_fees_usd);
        row
    }

    /// 合计行：仅 "Tariffs & Fees to be Paid (USD)" 有值
    pub fn total(total_tariffs_and_fees_usd: f64) -> Self {
        Self {
            tariffs_and_fees_usd: Some(total_tariffs_and_fees_usd),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputTable {
    pub rows: Vec<OutputTableRow>,
}

impl OutputTable {
    pub fn from_report(report: &TariffReport) -> Self {
        let mut rows: Vec<OutputTableRow> =
            report.lines.iter().map(OutputTableRow::from_line).collect();
        rows.push(OutputTableRow::total(report.total_tariffs_and_fees_usd));
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
