// ==========================================
// HTS 关税计算系统 - 参考文件分类器
// ==========================================
// 职责: 根据 sheet 名称判定参考文件类别
// 规则（顺序执行，命中即返回）:
// 1) 任一 sheet 名包含 "ADD" 或 "CVD" → AddCvd
// 2) 任一 sheet 名恰为 "China"/"Aluminum"/"Steel" → SpecificDuty
// 3) 其他（含空 sheet 列表）→ GeneralRate
// ==========================================

use crate::domain::types::{AddCvdFlag, ReferenceCategory, SurchargeCategory};

pub struct SheetClassifier;

impl SheetClassifier {
    pub fn classify<S: AsRef<str>>(&self, sheet_names: &[S]) -> ReferenceCategory {
        let names = || sheet_names.iter().map(|s| s.as_ref());

        if names().any(|name| AddCvdFlag::from_sheet_name(name).is_some()) {
            return ReferenceCategory::AddCvd;
        }

        if names().any(|name| SurchargeCategory::from_sheet_name(name).is_some()) {
            return ReferenceCategory::SpecificDuty;
        }

        ReferenceCategory::GeneralRate
    }
}
