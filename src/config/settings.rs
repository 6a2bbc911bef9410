// ==========================================
// HTS 关税计算系统 - 生效配置
// ==========================================
// 职责: 一次性读出全部配置，作为显式参数传入导入层与计算引擎
// 红线: 不使用全局状态
// ==========================================

use crate::config::config_manager::defaults;
use crate::config::error::ConfigResult;
use crate::config::tariff_config_trait::TariffConfigReader;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffSettings {
    pub merchandise_processing_fee: f64,
    pub harbor_maintenance_fee: f64,
    pub hts_column_aliases: Vec<String>,
    pub add_cvd_code_aliases: Vec<String>,
    pub specific_duty_code_column: String,
    pub general_rate_column: String,
}

impl TariffSettings {
    pub fn from_reader<C: TariffConfigReader + ?Sized>(config: &C) -> ConfigResult<Self> {
        Ok(Self {
            merchandise_processing_fee: config.get_merchandise_processing_fee()?,
            harbor_maintenance_fee: config.get_harbor_maintenance_fee()?,
            hts_column_aliases: config.get_hts_column_aliases()?,
            add_cvd_code_aliases: config.get_add_cvd_code_aliases()?,
            specific_duty_code_column: config.get_specific_duty_code_column()?,
            general_rate_column: config.get_general_rate_column()?,
        })
    }
}

impl Default for TariffSettings {
    fn default() -> Self {
        Self {
            merchandise_processing_fee: defaults::MERCHANDISE_PROCESSING_FEE,
            harbor_maintenance_fee: defaults::HARBOR_MAINTENANCE_FEE,
            hts_column_aliases: defaults::HTS_COLUMN_ALIASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            add_cvd_code_aliases: defaults::ADD_CVD_CODE_ALIASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            specific_duty_code_column: defaults::SPECIFIC_DUTY_CODE_COLUMN.to_string(),
            general_rate_column: defaults::GENERAL_RATE_COLUMN.to_string(),
        }
    }
}
