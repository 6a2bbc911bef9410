// ==========================================
// HTS 关税计算系统 - 一般税率表达式解析
// ==========================================
// 职责: 将 "General Rate of Duty" 文本解析为结构化表达式，再按价值/重量求小数税率
// 语法（按优先级）:
//   expr := term | term "+" expr
//   term := 数值"%" | 金额"/kg" | 金额"/liter" | "$"金额 | 金额"¢" | "Free" | 裸数值
// 红线: 解析永不失败；无法识别的部分贡献 0，结果永不为 NaN
// ==========================================

use std::fmt;

/// 从量税单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Kilogram,
    Liter,
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::Kilogram => write!(f, "kg"),
            RateUnit::Liter => write!(f, "liter"),
        }
    }
}

/// 税率表达式
///
/// 金额统一换算为美元（`¢` 已除以 100）
#[derive(Debug, Clone, PartialEq)]
pub enum RateExpr {
    Free,
    Percent(f64), // 百分数，如 5.3 表示 5.3%
    PerUnit { amount: f64, unit: RateUnit },
    Fixed(f64),
    Bare(f64), // 无符号数值，按百分数处理
    Sum(Box<RateExpr>, Box<RateExpr>),
    Invalid(String),
}

impl RateExpr {
    /// 解析税率文本
    pub fn parse(raw: &str) -> RateExpr {
        let text = raw.trim();

        if let Some((left, right)) = text.split_once('+') {
            return RateExpr::Sum(
                Box::new(RateExpr::parse(left)),
                Box::new(RateExpr::parse(right)),
            );
        }

        parse_term(text)
    }

    /// 求小数税率
    ///
    /// # 参数
    /// - value: 申报价值（从量/定额项的除数）
    /// - weight: 重量（从量/定额项的乘数）
    pub fn fraction(&self, value: f64, weight: f64) -> f64 {
        let result = match self {
            RateExpr::Free | RateExpr::Invalid(_) => 0.0,
            RateExpr::Percent(pct) | RateExpr::Bare(pct) => pct / 100.0,
            RateExpr::PerUnit { amount, .. } | RateExpr::Fixed(amount) => {
                weighted_amount(*amount, value, weight)
            }
            RateExpr::Sum(left, right) => {
                left.fraction(value, weight) + right.fraction(value, weight)
            }
        };

        if result.is_finite() {
            result
        } else {
            0.0
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            RateExpr::Invalid(_) => false,
            RateExpr::Sum(left, right) => left.is_valid() && right.is_valid(),
            _ => true,
        }
    }
}

fn weighted_amount(amount: f64, value: f64, weight: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || !weight.is_finite() {
        return 0.0;
    }
    amount * weight / value
}

fn parse_term(text: &str) -> RateExpr {
    let lower = text.to_lowercase();

    if text.contains('%') {
        return parse_number(&text.replace('%', ""))
            .map(RateExpr::Percent)
            .unwrap_or_else(|| RateExpr::Invalid(text.to_string()));
    }

    let unit = if lower.contains("/kg") {
        Some(RateUnit::Kilogram)
    } else if lower.contains("/liter") {
        Some(RateUnit::Liter)
    } else {
        None
    };
    if let Some(unit) = unit {
        let amount_text = text.split('/').next().unwrap_or("");
        return parse_money(amount_text)
            .map(|amount| RateExpr::PerUnit { amount, unit })
            .unwrap_or_else(|| RateExpr::Invalid(text.to_string()));
    }

    if text.contains('$') || text.contains('¢') {
        return parse_money(text)
            .map(RateExpr::Fixed)
            .unwrap_or_else(|| RateExpr::Invalid(text.to_string()));
    }

    if lower == "free" {
        return RateExpr::Free;
    }

    parse_number(text)
        .map(RateExpr::Bare)
        .unwrap_or_else(|| RateExpr::Invalid(text.to_string()))
}

/// 金额（美元）；含 ¢ 时除以 100
fn parse_money(text: &str) -> Option<f64> {
    let cents = text.contains('¢');
    let amount = parse_number(&text.replace(['$', '¢'], ""))?;
    Some(if cents { amount / 100.0 } else { amount })
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 解析并求值一般税率（None 按 "0%"）
pub fn parse_general_rate(raw: Option<&str>, value: f64, weight: f64) -> f64 {
    match raw {
        Some(text) => RateExpr::parse(text).fraction(value, weight),
        None => 0.0,
    }
}
