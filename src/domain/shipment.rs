// ==========================================
// HTS 关税计算系统 - 运单明细与计算结果模型
// ==========================================
// 职责: 用户录入的明细行（原始/校验后）+ 逐行计算结果 + 批次报告
// 红线: 明细行不唯一、允许重复；结果只派生不存储
// ==========================================

use crate::domain::country::Country;
use crate::domain::hts;
use crate::domain::types::{LineStatus, TransportMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// RawLineItem - 原始录入行
// ==========================================
// 列名与可编辑表格一致，全部按字符串接收
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(rename = "SLB Part Number", default)]
    pub part_number: String,
    #[serde(rename = "US HTS", default)]
    pub us_hts: String,
    #[serde(rename = "COO", default)]
    pub coo: String,
    #[serde(rename = "Value", default)]
    pub value: String,
    #[serde(rename = "Weight", default)]
    pub weight: String,
    #[serde(rename = "MOT", default)]
    pub mot: String,
}

impl RawLineItem {
    pub fn new(
        part_number: &str,
        us_hts: &str,
        coo: &str,
        value: &str,
        weight: &str,
        mot: &str,
    ) -> Self {
        Self {
            part_number: part_number.to_string(),
            us_hts: us_hts.to_string(),
            coo: coo.to_string(),
            value: value.to_string(),
            weight: weight.to_string(),
            mot: mot.to_string(),
        }
    }

    /// HTS 为空（clean 后）的行不参与计算
    pub fn has_hts(&self) -> bool {
        !hts::clean(&self.us_hts).is_empty()
    }
}

// ==========================================
// 明细行校验错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineItemError {
    #[error("Value 无法解析为数值: {0}")]
    InvalidValue(String),

    #[error("Value 必须大于 0（实际 {0}）")]
    NonPositiveValue(f64),

    #[error("Weight 必须为非负数值: {0}")]
    InvalidWeight(String),

    #[error("未列出的原产国: {0}")]
    UnlistedCountry(String),

    #[error("未知运输方式: {0}（仅支持 AIR/TRUCK/OCEAN/COURIER）")]
    UnknownTransportMode(String),
}

// ==========================================
// ShipmentLineItem - 校验后的明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentLineItem {
    pub part_number: String,
    pub us_hts: String, // clean 形式
    pub coo: Option<Country>,
    pub value: f64,  // 申报价值（除数，必须 > 0）
    pub weight: f64, // 重量（>= 0）
    pub mot: Option<TransportMode>,
}

impl ShipmentLineItem {
    /// 校验数值字段（直接构造时也需满足）
    pub fn validate(&self) -> Result<(), LineItemError> {
        if !self.value.is_finite() {
            return Err(LineItemError::InvalidValue(self.value.to_string()));
        }
        if self.value <= 0.0 {
            return Err(LineItemError::NonPositiveValue(self.value));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(LineItemError::InvalidWeight(self.weight.to_string()));
        }
        Ok(())
    }
}

impl TryFrom<&RawLineItem> for ShipmentLineItem {
    type Error = LineItemError;

    fn try_from(raw: &RawLineItem) -> Result<Self, Self::Error> {
        let value_text = raw.value.trim();
        let value = parse_amount(value_text)
            .ok_or_else(|| LineItemError::InvalidValue(value_text.to_string()))?;

        let weight_text = raw.weight.trim();
        let weight = if weight_text.is_empty() {
            0.0
        } else {
            parse_amount(weight_text)
                .ok_or_else(|| LineItemError::InvalidWeight(weight_text.to_string()))?
        };

        let coo = match raw.coo.trim() {
            "" => None,
            name => Some(
                name.parse::<Country>()
                    .map_err(LineItemError::UnlistedCountry)?,
            ),
        };

        let mot = match raw.mot.trim() {
            "" => None,
            mode => Some(
                mode.parse::<TransportMode>()
                    .map_err(LineItemError::UnknownTransportMode)?,
            ),
        };

        let item = ShipmentLineItem {
            part_number: raw.part_number.trim().to_string(),
            us_hts: hts::clean(&raw.us_hts),
            coo,
            value,
            weight,
            mot,
        };
        item.validate()?;
        Ok(item)
    }
}

/// 解析金额/重量（允许千分位逗号）
fn parse_amount(text: &str) -> Option<f64> {
    let normalized: String = text.chars().filter(|c| *c != ',').collect();
    normalized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ==========================================
// TariffLine - 逐行计算结果
// ==========================================
// 百分比列 = 小数比例 × 100；USD 列为货币单位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffLine {
    pub row: usize, // 输入顺序（从 1 开始）
    pub input: RawLineItem,
    pub hts_code: String, // clean 形式
    pub status: LineStatus,

    pub general_tariff_percentage: f64,
    pub coo_china_tariff: f64,
    pub aluminum_tariff: f64,
    pub steel_tariff: f64,
    pub potential_add_cvd_flag: String,
    pub merchandise_processing_fee: f64,
    pub harbor_maintenance_fee: f64,
    pub tariffs_and_fees_percent: f64,
    pub tariffs_usd: f64,
    pub tariffs_and_fees_usd: f64,
}

impl TariffLine {
    /// 未计算的行：所有数值为 0，处理费列保留固定值
    pub fn uncomputed(
        row: usize,
        input: RawLineItem,
        status: LineStatus,
        merchandise_processing_fee: f64,
        harbor_maintenance_fee: f64,
    ) -> Self {
        let hts_code = hts::clean(&input.us_hts);
        Self {
            row,
            input,
            hts_code,
            status,
            general_tariff_percentage: 0.0,
            coo_china_tariff: 0.0,
            aluminum_tariff: 0.0,
            steel_tariff: 0.0,
            potential_add_cvd_flag: String::new(),
            merchandise_processing_fee,
            harbor_maintenance_fee,
            tariffs_and_fees_percent: 0.0,
            tariffs_usd: 0.0,
            tariffs_and_fees_usd: 0.0,
        }
    }
}

/// 单行失败记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFailure {
    pub row: usize,
    pub message: String,
}

// ==========================================
// TariffReport - 批次计算报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffReport {
    pub lines: Vec<TariffLine>,
    pub total_tariffs_and_fees_usd: f64,
    pub failures: Vec<LineFailure>,
}

impl TariffReport {
    pub fn computed_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.status == LineStatus::Computed)
            .count()
    }

    /// 汇总失败提示（无失败时为 None）
    pub fn failure_notice(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("第 {} 行: {}", f.row, f.message))
            .collect();
        Some(format!(
            "{} 行明细计算失败（其余行已正常计算）: {}",
            self.failures.len(),
            details.join("; ")
        ))
    }
}
