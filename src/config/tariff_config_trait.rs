// ==========================================
// HTS 关税计算系统 - 配置读取 Trait
// ==========================================
// 职责: 定义导入与计算所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;

// ==========================================
// TariffConfigReader Trait
// ==========================================
// 用途: 导入模块与计算引擎所需的配置读取接口
// 实现者: ConfigManager（从 JSON 键值文件读取）
pub trait TariffConfigReader {
    // ===== 费用配置 =====

    /// 获取 CBP 商品处理费（每行固定金额）
    ///
    /// # 默认值
    /// - 31.67
    fn get_merchandise_processing_fee(&self) -> ConfigResult<f64>;

    /// 获取 CBP 港口维护费
    ///
    /// # 默认值
    /// - 0（占位，暂不按 MOT/价值计算）
    fn get_harbor_maintenance_fee(&self) -> ConfigResult<f64>;

    // ===== 列名配置 =====

    /// 一般税率文件的 HTS 列别名（按优先级）
    ///
    /// # 默认值
    /// - ["HTS", "HTS Number", "HSCODE"]
    fn get_hts_column_aliases(&self) -> ConfigResult<Vec<String>>;

    /// ADD/CVD 文件的编码列别名（按优先级）
    ///
    /// # 默认值
    /// - ["HSCODE", "HTS", "HTS Number"]
    fn get_add_cvd_code_aliases(&self) -> ConfigResult<Vec<String>>;

    /// 附加税文件的编码列名
    ///
    /// # 默认值
    /// - "HTS"
    fn get_specific_duty_code_column(&self) -> ConfigResult<String>;

    /// 一般税率列名
    ///
    /// # 默认值
    /// - "General Rate of Duty"
    fn get_general_rate_column(&self) -> ConfigResult<String>;
}
