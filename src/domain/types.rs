// ==========================================
// HTS 关税计算系统 - 领域类型定义
// ==========================================
// 职责: 闭合枚举（ADD/CVD 标记、附加税类别、参考数据类别、运输方式、行状态）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// ADD/CVD 标记 (Antidumping / Countervailing)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddCvdFlag {
    Add, // 反倾销
    Cvd, // 反补贴
}

impl AddCvdFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddCvdFlag::Add => "ADD",
            AddCvdFlag::Cvd => "CVD",
        }
    }

    /// 根据 sheet 名称判定标记（ADD 优先于 CVD）
    pub fn from_sheet_name(sheet_name: &str) -> Option<Self> {
        if sheet_name.contains("ADD") {
            Some(AddCvdFlag::Add)
        } else if sheet_name.contains("CVD") {
            Some(AddCvdFlag::Cvd)
        } else {
            None
        }
    }
}

impl fmt::Display for AddCvdFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 附加税类别 (Specific Duty Category)
// ==========================================
// sheet 名称必须与类别名完全一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurchargeCategory {
    China,
    Aluminum,
    Steel,
}

impl SurchargeCategory {
    pub const ALL: [SurchargeCategory; 3] = [
        SurchargeCategory::China,
        SurchargeCategory::Aluminum,
        SurchargeCategory::Steel,
    ];

    /// 类别名（同时也是 sheet 名与税率列名）
    pub fn as_str(&self) -> &'static str {
        match self {
            SurchargeCategory::China => "China",
            SurchargeCategory::Aluminum => "Aluminum",
            SurchargeCategory::Steel => "Steel",
        }
    }

    /// 统一参考表中的长列名
    pub fn column_label(&self) -> &'static str {
        match self {
            SurchargeCategory::China => "China Duties",
            SurchargeCategory::Aluminum => "Aluminum Tariff",
            SurchargeCategory::Steel => "Steel Tariff",
        }
    }

    pub fn from_sheet_name(sheet_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == sheet_name)
    }
}

impl fmt::Display for SurchargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 参考数据类别 (Reference Category)
// ==========================================
// 优先级: AddCvd > SpecificDuty > GeneralRate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceCategory {
    AddCvd,       // 反倾销/反补贴标记
    SpecificDuty, // 附加税率（China/Aluminum/Steel）
    GeneralRate,  // 一般税率
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceCategory::AddCvd => write!(f, "ADD_CVD"),
            ReferenceCategory::SpecificDuty => write!(f, "SPECIFIC_DUTY"),
            ReferenceCategory::GeneralRate => write!(f, "GENERAL_RATE"),
        }
    }
}

// ==========================================
// 运输方式 (Method of Transportation)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Air,
    Truck,
    Ocean,
    Courier,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Air,
        TransportMode::Truck,
        TransportMode::Ocean,
        TransportMode::Courier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "AIR",
            TransportMode::Truck => "TRUCK",
            TransportMode::Ocean => "OCEAN",
            TransportMode::Courier => "COURIER",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| s.trim().to_string())
    }
}

// ==========================================
// 明细行计算状态 (Line Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStatus {
    Computed, // 已计算
    Skipped,  // HTS 为空，跳过
    Failed,   // 输入校验失败
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStatus::Computed => write!(f, "COMPUTED"),
            LineStatus::Skipped => write!(f, "SKIPPED"),
            LineStatus::Failed => write!(f, "FAILED"),
        }
    }
}
