// ==========================================
// HTS 关税计算系统 - 引擎层
// ==========================================
// 职责: 税率表达式解析、逐行关税计算、输出表组装
// 红线: 纯函数，不读写文件
// ==========================================

pub mod output_table;
pub mod rate_expression;
pub mod tariff_calculator;

// 重导出核心引擎
pub use output_table::{OutputTable, OutputTableRow};
pub use rate_expression::{parse_general_rate, RateExpr, RateUnit};
pub use tariff_calculator::{RecalcRequest, TariffCalculator};
