// ==========================================
// HTS 关税计算系统 - 参考数据领域模型
// ==========================================
// 职责: 三类参考数据的抽取结果 + 归并后的统一参考表
// 红线: 统一参考表以 clean HTS 编码为关联键
// 生命周期: 每次上传整体重建，不做增量、不持久化
// ==========================================

use crate::domain::types::{AddCvdFlag, ReferenceCategory, SurchargeCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 抽取结果 - 单类参考数据行
// ==========================================

/// ADD/CVD 标记行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCvdRow {
    #[serde(rename = "HTS_Code")]
    pub hts_code: String,
    #[serde(rename = "ADD/CVD")]
    pub flag: AddCvdFlag,
}

/// 附加税率行（rate 为小数比例，空单元格已按 0 处理）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificDutyRow {
    #[serde(rename = "HTS_Code")]
    pub hts_code: String,
    pub category: SurchargeCategory,
    #[serde(rename = "Specific_Rate_of_Duty")]
    pub rate: f64,
}

/// 一般税率行（税率保留原始表达式字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralRateRow {
    #[serde(rename = "HTS_Code")]
    pub hts_code: String,
    #[serde(rename = "General_Rate_of_Duty")]
    pub general_rate_of_duty: Option<String>,
}

/// 单个文件抽取出的规范化表
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedTable {
    AddCvd(Vec<AddCvdRow>),
    SpecificDuty(Vec<SpecificDutyRow>),
    GeneralRate(Vec<GeneralRateRow>),
}

impl ExtractedTable {
    pub fn category(&self) -> ReferenceCategory {
        match self {
            ExtractedTable::AddCvd(_) => ReferenceCategory::AddCvd,
            ExtractedTable::SpecificDuty(_) => ReferenceCategory::SpecificDuty,
            ExtractedTable::GeneralRate(_) => ReferenceCategory::GeneralRate,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ExtractedTable::AddCvd(rows) => rows.len(),
            ExtractedTable::SpecificDuty(rows) => rows.len(),
            ExtractedTable::GeneralRate(rows) => rows.len(),
        }
    }
}

// ==========================================
// ReferenceRow - 统一参考行
// ==========================================
// None 表示该类别的源数据中没有此编码（数值消费方按 0 处理）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "HTS_Code")]
    pub hts_code: String,

    #[serde(rename = "ADD/CVD Flag")]
    pub add_cvd_flag: Option<AddCvdFlag>,

    // ===== 附加税率（小数比例）=====
    #[serde(rename = "China Duties")]
    pub china_duties: Option<f64>,
    #[serde(rename = "Aluminum Tariff")]
    pub aluminum_tariff: Option<f64>,
    #[serde(rename = "Steel Tariff")]
    pub steel_tariff: Option<f64>,

    // ===== 一般税率（原始表达式）=====
    #[serde(rename = "General_Rate_of_Duty")]
    pub general_rate_of_duty: Option<String>,
}

impl ReferenceRow {
    /// 只有编码、其余列为空的行
    pub fn empty(hts_code: impl Into<String>) -> Self {
        Self {
            hts_code: hts_code.into(),
            add_cvd_flag: None,
            china_duties: None,
            aluminum_tariff: None,
            steel_tariff: None,
            general_rate_of_duty: None,
        }
    }

    pub fn surcharge(&self, category: SurchargeCategory) -> Option<f64> {
        match category {
            SurchargeCategory::China => self.china_duties,
            SurchargeCategory::Aluminum => self.aluminum_tariff,
            SurchargeCategory::Steel => self.steel_tariff,
        }
    }

    pub fn set_surcharge(&mut self, category: SurchargeCategory, rate: f64) {
        match category {
            SurchargeCategory::China => self.china_duties = Some(rate),
            SurchargeCategory::Aluminum => self.aluminum_tariff = Some(rate),
            SurchargeCategory::Steel => self.steel_tariff = Some(rate),
        }
    }

    /// 附加税率，缺失或非有限数值按 0
    pub fn surcharge_or_zero(&self, category: SurchargeCategory) -> f64 {
        self.surcharge(category)
            .filter(|r| r.is_finite())
            .unwrap_or(0.0)
    }

    /// 综合税率说明: 一般税率 + Steel + Aluminum + China（跳过空值）
    pub fn tariff_summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(general) = self.general_rate_of_duty.as_deref() {
            if !general.trim().is_empty() {
                parts.push(general.trim().to_string());
            }
        }
        for category in [
            SurchargeCategory::Steel,
            SurchargeCategory::Aluminum,
            SurchargeCategory::China,
        ] {
            if let Some(rate) = self.surcharge(category) {
                parts.push(rate.to_string());
            }
        }
        parts.join(" + ")
    }
}

// ==========================================
// ReferenceTable - 统一参考表
// ==========================================
// 编码允许重复（多文件/多 sheet），查询取首次出现的行
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            index.entry(row.hts_code.clone()).or_insert(position);
        }
        Self { rows, index }
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按 clean 编码查询
    pub fn lookup(&self, clean_code: &str) -> Option<&ReferenceRow> {
        self.index.get(clean_code).map(|&position| &self.rows[position])
    }
}

impl PartialEq for ReferenceTable {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}
