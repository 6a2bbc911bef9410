// ==========================================
// HTS 关税计算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 存储: 扁平 JSON 键值文件（key → value），缺失键回落默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::tariff_config_trait::TariffConfigReader;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有键值创建
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从 JSON 文件加载
    ///
    /// 文件内容为 JSON 对象；非字符串值（数字、数组）按其 JSON 文本保存
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let parsed: serde_json::Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let values = parsed
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect::<HashMap<_, _>>();

        info!(path = %path.display(), keys = values.len(), "加载配置文件");
        Ok(Self { values })
    }

    /// 按 显式路径 → 环境变量 → 用户配置目录 的顺序加载
    ///
    /// 都不存在时返回默认配置
    pub fn load_default(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match get_default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::new())
            }
        }
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key).unwrap_or(default).to_string()
    }

    fn parse_f64(&self, key: &str, default: f64) -> ConfigResult<f64> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| ConfigError::ConfigValueError {
                    key: key.to_string(),
                    value: raw.to_string(),
                    message: "期望非负数值".to_string(),
                }),
        }
    }

    fn parse_string_list(&self, key: &str, default: &[&str]) -> ConfigResult<Vec<String>> {
        match self.get_config_value(key) {
            None => Ok(default.iter().map(|s| s.to_string()).collect()),
            Some(raw) => {
                let list: Vec<String> =
                    serde_json::from_str(raw).map_err(|e| ConfigError::ConfigValueError {
                        key: key.to_string(),
                        value: raw.to_string(),
                        message: format!("期望 JSON 字符串数组: {}", e),
                    })?;
                if list.is_empty() {
                    return Err(ConfigError::ConfigValueError {
                        key: key.to_string(),
                        value: raw.to_string(),
                        message: "列表不能为空".to_string(),
                    });
                }
                Ok(list)
            }
        }
    }

    /// 获取生效配置快照（JSON 格式，含默认值）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut snapshot: BTreeMap<&str, Value> = BTreeMap::new();
        snapshot.insert(
            config_keys::MERCHANDISE_PROCESSING_FEE,
            json!(self.get_merchandise_processing_fee()?),
        );
        snapshot.insert(
            config_keys::HARBOR_MAINTENANCE_FEE,
            json!(self.get_harbor_maintenance_fee()?),
        );
        snapshot.insert(
            config_keys::HTS_COLUMN_ALIASES,
            json!(self.get_hts_column_aliases()?),
        );
        snapshot.insert(
            config_keys::ADD_CVD_CODE_ALIASES,
            json!(self.get_add_cvd_code_aliases()?),
        );
        snapshot.insert(
            config_keys::SPECIFIC_DUTY_CODE_COLUMN,
            json!(self.get_specific_duty_code_column()?),
        );
        snapshot.insert(
            config_keys::GENERAL_RATE_COLUMN,
            json!(self.get_general_rate_column()?),
        );

        serde_json::to_string(&snapshot).map_err(|e| ConfigError::ConfigValueError {
            key: "*".to_string(),
            value: String::new(),
            message: e.to_string(),
        })
    }
}

impl TariffConfigReader for ConfigManager {
    fn get_merchandise_processing_fee(&self) -> ConfigResult<f64> {
        self.parse_f64(
            config_keys::MERCHANDISE_PROCESSING_FEE,
            defaults::MERCHANDISE_PROCESSING_FEE,
        )
    }

    fn get_harbor_maintenance_fee(&self) -> ConfigResult<f64> {
        self.parse_f64(
            config_keys::HARBOR_MAINTENANCE_FEE,
            defaults::HARBOR_MAINTENANCE_FEE,
        )
    }

    fn get_hts_column_aliases(&self) -> ConfigResult<Vec<String>> {
        self.parse_string_list(config_keys::HTS_COLUMN_ALIASES, &defaults::HTS_COLUMN_ALIASES)
    }

    fn get_add_cvd_code_aliases(&self) -> ConfigResult<Vec<String>> {
        self.parse_string_list(
            config_keys::ADD_CVD_CODE_ALIASES,
            &defaults::ADD_CVD_CODE_ALIASES,
        )
    }

    fn get_specific_duty_code_column(&self) -> ConfigResult<String> {
        Ok(self.get_config_or_default(
            config_keys::SPECIFIC_DUTY_CODE_COLUMN,
            defaults::SPECIFIC_DUTY_CODE_COLUMN,
        ))
    }

    fn get_general_rate_column(&self) -> ConfigResult<String> {
        Ok(self.get_config_or_default(
            config_keys::GENERAL_RATE_COLUMN,
            defaults::GENERAL_RATE_COLUMN,
        ))
    }
}

/// 获取默认配置文件路径
///
/// # 返回
/// - 环境变量 HTS_TARIFF_CONFIG 指定的路径
/// - 否则: 用户配置目录/hts-tariff/config.json
pub fn get_default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HTS_TARIFF_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("hts-tariff").join("config.json"))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 费用
    pub const MERCHANDISE_PROCESSING_FEE: &str = "tariff.merchandise_processing_fee";
    pub const HARBOR_MAINTENANCE_FEE: &str = "tariff.harbor_maintenance_fee";

    // 列名
    pub const HTS_COLUMN_ALIASES: &str = "import.hts_column_aliases"; // JSON 数组
    pub const ADD_CVD_CODE_ALIASES: &str = "import.add_cvd_code_aliases"; // JSON 数组
    pub const SPECIFIC_DUTY_CODE_COLUMN: &str = "import.specific_duty_code_column";
    pub const GENERAL_RATE_COLUMN: &str = "import.general_rate_column";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const MERCHANDISE_PROCESSING_FEE: f64 = 31.67;
    pub const HARBOR_MAINTENANCE_FEE: f64 = 0.0;
    pub const HTS_COLUMN_ALIASES: [&str; 3] = ["HTS", "HTS Number", "HSCODE"];
    pub const ADD_CVD_CODE_ALIASES: [&str; 3] = ["HSCODE", "HTS", "HTS Number"];
    pub const SPECIFIC_DUTY_CODE_COLUMN: &str = "HTS";
    pub const GENERAL_RATE_COLUMN: &str = "General Rate of Duty";
}
