// ==========================================
// HTS 关税计算系统 - 关税计算引擎
// ==========================================
// 职责: 按参考表逐行计算一般税率、附加税、处理费与合计
// 输入: RecalcRequest（参考表 + 明细行）+ TariffSettings
// 输出: TariffReport（行顺序与输入一致）
// 红线: 无隐藏状态，每次调用全量重算；查不到编码按 0 税率处理
// ==========================================

use crate::config::TariffSettings;
use crate::domain::reference::ReferenceTable;
use crate::domain::shipment::{
    LineFailure, LineItemError, RawLineItem, ShipmentLineItem, TariffLine, TariffReport,
};
use crate::domain::types::{LineStatus, SurchargeCategory};
use crate::engine::rate_expression::parse_general_rate;
use tracing::{debug, info, instrument, warn};

/// 一次重算请求
#[derive(Debug, Clone, Copy)]
pub struct RecalcRequest<'a> {
    pub reference: &'a ReferenceTable,
    pub line_items: &'a [RawLineItem],
}

impl<'a> RecalcRequest<'a> {
    pub fn new(reference: &'a ReferenceTable, line_items: &'a [RawLineItem]) -> Self {
        Self {
            reference,
            line_items,
        }
    }
}

// ==========================================
// TariffCalculator
// ==========================================
pub struct TariffCalculator {
    merchandise_processing_fee: f64,
    harbor_maintenance_fee: f64,
}

impl TariffCalculator {
    pub fn new(settings: &TariffSettings) -> Self {
        Self {
            merchandise_processing_fee: settings.merchandise_processing_fee,
            harbor_maintenance_fee: settings.harbor_maintenance_fee,
        }
    }

    /// 批量计算
    ///
    /// 单行校验失败不影响其他行：该行标记 Failed、不计入合计，并记录到 failures
    #[instrument(skip(self, request), fields(count = request.line_items.len()))]
    pub fn evaluate_batch(&self, request: &RecalcRequest<'_>) -> TariffReport {
        let mut lines = Vec::with_capacity(request.line_items.len());
        let mut failures = Vec::new();

        for (idx, input) in request.line_items.iter().enumerate() {
            let row = idx + 1;
            match self.evaluate_line(row, input, request.reference) {
                Ok(line) => lines.push(line),
                Err(e) => {
                    warn!(row = row, error = %e, "明细行计算失败");
                    failures.push(LineFailure {
                        row,
                        message: e.to_string(),
                    });
                    lines.push(self.uncomputed(row, input, LineStatus::Failed));
                }
            }
        }

        let total_tariffs_and_fees_usd = lines
            .iter()
            .filter(|l| l.status == LineStatus::Computed)
            .map(|l| l.tariffs_and_fees_usd)
            .sum();

        let report = TariffReport {
            lines,
            total_tariffs_and_fees_usd,
            failures,
        };

        info!(
            computed = report.computed_count(),
            failed = report.failures.len(),
            total = report.total_tariffs_and_fees_usd,
            "关税计算完成"
        );

        report
    }

    /// 单行计算
    ///
    /// # 返回
    /// - Ok(Skipped): HTS 为空
    /// - Ok(Computed): 正常计算
    /// - Err: 输入校验失败
    pub fn evaluate_line(
        &self,
        row: usize,
        input: &RawLineItem,
        reference: &ReferenceTable,
    ) -> Result<TariffLine, LineItemError> {
        if !input.has_hts() {
            return Ok(self.uncomputed(row, input, LineStatus::Skipped));
        }

        let item = ShipmentLineItem::try_from(input)?;
        Ok(self.compute(row, input, &item, reference))
    }

    /// 对已校验的明细行求值
    pub fn compute(
        &self,
        row: usize,
        input: &RawLineItem,
        item: &ShipmentLineItem,
        reference: &ReferenceTable,
    ) -> TariffLine {
        let reference_row = reference.lookup(&item.us_hts);
        if reference_row.is_none() {
            debug!(row = row, hts_code = %item.us_hts, "参考表无此编码，按 0 税率计算");
        }

        let general = parse_general_rate(
            reference_row.and_then(|r| r.general_rate_of_duty.as_deref()),
            item.value,
            item.weight,
        );
        let surcharge = |category: SurchargeCategory| {
            reference_row
                .map(|r| r.surcharge_or_zero(category))
                .unwrap_or(0.0)
        };

        // China 附加税仅对原产国为 China 的行生效
        let china = if item.coo.map(|c| c.is_china()).unwrap_or(false) {
            surcharge(SurchargeCategory::China)
        } else {
            0.0
        };
        let aluminum = surcharge(SurchargeCategory::Aluminum);
        let steel = surcharge(SurchargeCategory::Steel);

        let rate = general + china + aluminum + steel;
        let fee = self.merchandise_processing_fee;
        let tariffs_usd = rate * item.value;

        TariffLine {
            row,
            input: input.clone(),
            hts_code: item.us_hts.clone(),
            status: LineStatus::Computed,
            general_tariff_percentage: general * 100.0,
            coo_china_tariff: china * 100.0,
            aluminum_tariff: aluminum * 100.0,
            steel_tariff: steel * 100.0,
            potential_add_cvd_flag: reference_row
                .and_then(|r| r.add_cvd_flag)
                .map(|f| f.as_str().to_string())
                .unwrap_or_default(),
            merchandise_processing_fee: fee,
            harbor_maintenance_fee: self.harbor_maintenance_fee,
            tariffs_and_fees_percent: (rate + fee / item.value) * 100.0,
            tariffs_usd,
            tariffs_and_fees_usd: tariffs_usd + fee,
        }
    }

    fn uncomputed(&self, row: usize, input: &RawLineItem, status: LineStatus) -> TariffLine {
        TariffLine::uncomputed(
            row,
            input.clone(),
            status,
            self.merchandise_processing_fee,
            self.harbor_maintenance_fee,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::ReferenceRow;
    use crate::domain::types::AddCvdFlag;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn reference() -> ReferenceTable {
        let mut steel = ReferenceRow::empty("7208510030");
        steel.add_cvd_flag = Some(AddCvdFlag::Add);
        steel.general_rate_of_duty = Some("Free".to_string());
        steel.set_surcharge(SurchargeCategory::Steel, 0.25);
        steel.set_surcharge(SurchargeCategory::China, 0.25);

        let mut computer = ReferenceRow::empty("8471300100");
        computer.general_rate_of_duty = Some("$0.44/kg + 17%".to_string());

        ReferenceTable::new(vec![steel, computer])
    }

    fn calculator() -> TariffCalculator {
        TariffCalculator::new(&TariffSettings::default())
    }

    #[test]
    fn test_china_origin_applies_china_duties() {
        let table = reference();
        let input = RawLineItem::new("P-1", "7208.51.0030", "China", "1000", "10", "OCEAN");

        let line = calculator().evaluate_line(1, &input, &table).unwrap();

        assert_eq!(line.status, LineStatus::Computed);
        assert_close(line.coo_china_tariff, 25.0);
        assert_close(line.steel_tariff, 25.0);
        assert_close(line.tariffs_usd, 500.0);
        assert_close(line.tariffs_and_fees_usd, 531.67);
        assert_close(line.tariffs_and_fees_percent, 53.167);
        assert_eq!(line.potential_add_cvd_flag, "ADD");
    }

    #[test]
    fn test_non_china_origin_skips_china_duties() {
        let table = reference();
        for coo in ["Germany", ""] {
            let input = RawLineItem::new("P-1", "7208510030", coo, "1000", "10", "AIR");
            let line = calculator().evaluate_line(1, &input, &table).unwrap();
            assert_eq!(line.coo_china_tariff, 0.0);
            assert_close(line.tariffs_usd, 250.0);
        }
    }

    #[test]
    fn test_compound_general_rate() {
        let table = reference();
        let input = RawLineItem::new("", "8471.30.0100", "USA", "1000", "50", "AIR");

        let line = calculator().evaluate_line(1, &input, &table).unwrap();

        assert_close(line.general_tariff_percentage, 19.2);
        assert_close(line.tariffs_usd, 192.0);
        assert_eq!(line.potential_add_cvd_flag, "");
    }

    #[test]
    fn test_unknown_code_charges_fee_only() {
        let table = reference();
        let input = RawLineItem::new("", "0101.21.0010", "USA", "100", "1", "");

        let line = calculator().evaluate_line(1, &input, &table).unwrap();

        assert_eq!(line.tariffs_usd, 0.0);
        assert_close(line.tariffs_and_fees_usd, 31.67);
        assert_close(line.tariffs_and_fees_percent, 31.67);
    }

    #[test]
    fn test_batch_isolates_failures_and_skips_empty_hts() {
        let table = reference();
        let items = vec![
            RawLineItem::new("P-1", "7208510030", "China", "1000", "10", "OCEAN"),
            RawLineItem::new("P-2", "", "China", "1000", "10", "OCEAN"),
            RawLineItem::new("P-3", "7208510030", "China", "0", "10", "OCEAN"),
            RawLineItem::new("P-4", "8471300100", "Narnia", "1000", "50", "AIR"),
            RawLineItem::new("P-5", "8471300100", "USA", "1000", "50", "AIR"),
        ];

        let report = calculator().evaluate_batch(&RecalcRequest::new(&table, &items));

        let statuses: Vec<LineStatus> = report.lines.iter().map(|l| l.status).collect();
        assert_eq!(
            statuses,
            vec![
                LineStatus::Computed,
                LineStatus::Skipped,
                LineStatus::Failed,
                LineStatus::Failed,
                LineStatus::Computed,
            ]
        );
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].row, 3);
        assert_close(report.total_tariffs_and_fees_usd, 531.67 + 223.67);
        assert!(report.failure_notice().unwrap().starts_with("2 行"));
    }

    #[test]
    fn test_batch_is_stateless() {
        let table = reference();
        let items = vec![RawLineItem::new("", "7208510030", "China", "1000", "10", "")];
        let calc = calculator();

        let first = calc.evaluate_batch(&RecalcRequest::new(&table, &items));
        let second = calc.evaluate_batch(&RecalcRequest::new(&table, &items));
        assert_eq!(first, second);
    }
}
