// ==========================================
// HTS 关税计算系统 - 配置层
// ==========================================
// 职责: 费用与列名配置管理,支持文件覆写
// 存储: JSON 键值文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod settings;
pub mod tariff_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use settings::TariffSettings;
pub use tariff_config_trait::TariffConfigReader;
