// ==========================================
// HTS 关税计算系统 - 核心库
// ==========================================
// 职责: 参考表构建（ADD/CVD、附加税、一般税率）+ 运单明细关税计算
// 技术栈: Rust + calamine/csv + serde
// 系统定位: 申报前估算工具（人工复核最终结果）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 税率解析与计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 费用与列名
pub mod config;

// 结果导出
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AddCvdFlag, LineStatus, ReferenceCategory, SurchargeCategory, TransportMode,
};

// 领域实体
pub use domain::{
    Country, RawLineItem, ReferenceRow, ReferenceTable, ShipmentLineItem, TariffLine,
    TariffReport,
};

// 引擎
pub use engine::{OutputTable, OutputTableRow, RateExpr, RecalcRequest, TariffCalculator};

// 导入
pub use importer::{LineItemReader, ReferenceBuild, ReferenceBuildReport, ReferenceImporter};

// 配置
pub use config::{ConfigManager, TariffSettings};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "HTS 关税计算系统";
