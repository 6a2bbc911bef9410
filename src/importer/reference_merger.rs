// ==========================================
// HTS 关税计算系统 - 参考表归并
// ==========================================
// 职责: 将各类抽取结果按类别拼接，再以 HTS_Code 左连接为统一参考表
// 种子顺序: ADD/CVD → 附加税 → 一般税率（取第一个非空类别）
// 红线: 连接不放大行数；右表重复编码取首次出现
// ==========================================

use crate::domain::reference::{
    AddCvdRow, ExtractedTable, GeneralRateRow, ReferenceRow, ReferenceTable, SpecificDutyRow,
};
use crate::domain::types::{ReferenceCategory, SurchargeCategory};
use std::collections::HashMap;
use tracing::debug;

/// 按类别拼接后的抽取结果
#[derive(Debug, Default)]
struct CategoryTables {
    add_cvd: Vec<AddCvdRow>,
    specific_duty: Vec<SpecificDutyRow>,
    general_rate: Vec<GeneralRateRow>,
}

impl CategoryTables {
    fn collect(tables: Vec<ExtractedTable>) -> Self {
        let mut merged = Self::default();
        for table in tables {
            match table {
                ExtractedTable::AddCvd(rows) => merged.add_cvd.extend(rows),
                ExtractedTable::SpecificDuty(rows) => merged.specific_duty.extend(rows),
                ExtractedTable::GeneralRate(rows) => merged.general_rate.extend(rows),
            }
        }
        merged
    }

    fn seed_category(&self) -> Option<ReferenceCategory> {
        if !self.add_cvd.is_empty() {
            Some(ReferenceCategory::AddCvd)
        } else if !self.specific_duty.is_empty() {
            Some(ReferenceCategory::SpecificDuty)
        } else if !self.general_rate.is_empty() {
            Some(ReferenceCategory::GeneralRate)
        } else {
            None
        }
    }
}

// ==========================================
// ReferenceMerger
// ==========================================
pub struct ReferenceMerger;

impl ReferenceMerger {
    /// 归并抽取结果
    ///
    /// # 规则
    /// - 种子类别的行（含重复编码）全部保留，顺序不变
    /// - 附加税作为种子时按编码透视为一行（首次出现顺序）
    /// - 其后每个非空类别左连接；种子中没有的右表编码被丢弃
    pub fn merge(&self, tables: Vec<ExtractedTable>) -> ReferenceTable {
        let tables = CategoryTables::collect(tables);

        let seed = match tables.seed_category() {
            Some(category) => category,
            None => {
                debug!("无可用参考数据，返回空表");
                return ReferenceTable::default();
            }
        };

        let mut rows = match seed {
            ReferenceCategory::AddCvd => tables
                .add_cvd
                .iter()
                .map(|r| {
                    let mut row = ReferenceRow::empty(r.hts_code.clone());
                    row.add_cvd_flag = Some(r.flag);
                    row
                })
                .collect(),
            ReferenceCategory::SpecificDuty => pivot_specific_duty(&tables.specific_duty),
            ReferenceCategory::GeneralRate => tables
                .general_rate
                .iter()
                .map(|r| {
                    let mut row = ReferenceRow::empty(r.hts_code.clone());
                    row.general_rate_of_duty = r.general_rate_of_duty.clone();
                    row
                })
                .collect(),
        };

        if seed == ReferenceCategory::AddCvd && !tables.specific_duty.is_empty() {
            join_specific_duty(&mut rows, &tables.specific_duty);
        }
        if seed != ReferenceCategory::GeneralRate && !tables.general_rate.is_empty() {
            join_general_rate(&mut rows, &tables.general_rate);
        }

        debug!(seed = %seed, rows = rows.len(), "参考表归并完成");
        ReferenceTable::new(rows)
    }
}

fn first_surcharges(rows: &[SpecificDutyRow]) -> HashMap<(&str, SurchargeCategory), f64> {
    let mut first = HashMap::new();
    for row in rows {
        first
            .entry((row.hts_code.as_str(), row.category))
            .or_insert(row.rate);
    }
    first
}

fn pivot_specific_duty(rows: &[SpecificDutyRow]) -> Vec<ReferenceRow> {
    let surcharges = first_surcharges(rows);
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut pivoted: Vec<ReferenceRow> = Vec::new();

    for row in rows {
        if positions.contains_key(row.hts_code.as_str()) {
            continue;
        }
        positions.insert(row.hts_code.as_str(), pivoted.len());

        let mut merged = ReferenceRow::empty(row.hts_code.clone());
        for category in SurchargeCategory::ALL {
            if let Some(rate) = surcharges.get(&(row.hts_code.as_str(), category)) {
                merged.set_surcharge(category, *rate);
            }
        }
        pivoted.push(merged);
    }

    pivoted
}

fn join_specific_duty(rows: &mut [ReferenceRow], right: &[SpecificDutyRow]) {
    let surcharges = first_surcharges(right);
    for row in rows.iter_mut() {
        for category in SurchargeCategory::ALL {
            if let Some(rate) = surcharges.get(&(row.hts_code.as_str(), category)) {
                row.set_surcharge(category, *rate);
            }
        }
    }
}

fn join_general_rate(rows: &mut [ReferenceRow], right: &[GeneralRateRow]) {
    let mut first: HashMap<&str, &Option<String>> = HashMap::new();
    for r in right {
        first
            .entry(r.hts_code.as_str())
            .or_insert(&r.general_rate_of_duty);
    }

    for row in rows.iter_mut() {
        if let Some(rate) = first.get(row.hts_code.as_str()) {
            row.general_rate_of_duty = (*rate).clone();
        }
    }
}
