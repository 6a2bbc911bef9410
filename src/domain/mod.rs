// ==========================================
// HTS 关税计算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、HTS 编码规范化
// 红线: 不含文件读取逻辑,不含计算引擎逻辑
// ==========================================

pub mod country;
pub mod hts;
pub mod reference;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use country::{Country, COUNTRIES};
pub use reference::{
    AddCvdRow, ExtractedTable, GeneralRateRow, ReferenceRow, ReferenceTable, SpecificDutyRow,
};
pub use shipment::{
    LineFailure, LineItemError, RawLineItem, ShipmentLineItem, TariffLine, TariffReport,
};
pub use types::{AddCvdFlag, LineStatus, ReferenceCategory, SurchargeCategory, TransportMode};
