//! 商品處置判定
//!
//! 規則依序評估，第一個符合的規則決定處置；全部不符合時為 [`StockAction::Normal`]。

use inventory_core::{InventoryRow, StatusLabels, Thresholds};
use serde::Serialize;

/// 處置建議
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockAction {
    /// 緊急補貨
    UrgentReorder,
    /// 售罄補貨
    ReorderAfterStockout,
    /// 折扣銷售
    DiscountSale,
    /// 清理庫存
    Liquidate,
    /// 正常
    Normal,
}

impl StockAction {
    /// 匯出檔使用的標籤
    pub fn label(&self) -> &'static str {
        match self {
            StockAction::UrgentReorder => "🚨 긴급 재발주",
            StockAction::ReorderAfterStockout => "⚠️ 품절 재발주",
            StockAction::DiscountSale => "🟡 할인 판매",
            StockAction::Liquidate => "❌ 재고 정리",
            StockAction::Normal => "✅ 정상",
        }
    }
}

/// 規則條件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Condition {
    /// 可用率 ≤ 值
    AvailabilityRateAtMost(f64),
    /// 銷售狀態顯示文字等於值
    StatusTextIs(String),
    /// 未訂購天數 ≥ 值
    DaysWithoutOrderAtLeast(u32),
}

impl Condition {
    pub fn matches(&self, row: &InventoryRow) -> bool {
        match self {
            Condition::AvailabilityRateAtMost(limit) => row.availability_rate <= *limit,
            Condition::StatusTextIs(label) => row.sale_status_text == *label,
            Condition::DaysWithoutOrderAtLeast(days) => row.days_without_order >= *days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRule {
    pub action: StockAction,
    pub condition: Condition,
}

impl ActionRule {
    pub fn new(action: StockAction, condition: Condition) -> Self {
        Self { action, condition }
    }
}

/// 有序規則表
#[derive(Debug, Clone, Serialize)]
pub struct ActionRules {
    rules: Vec<ActionRule>,
}

impl ActionRules {
    pub fn new(rules: Vec<ActionRule>) -> Self {
        Self { rules }
    }

    /// 標準規則：低可用率 → 售罄 → 長期未訂購 → 停產
    pub fn standard(thresholds: &Thresholds, labels: &StatusLabels) -> Self {
        Self::new(vec![
            ActionRule::new(
                StockAction::UrgentReorder,
                Condition::AvailabilityRateAtMost(thresholds.low_availability_rate),
            ),
            ActionRule::new(
                StockAction::ReorderAfterStockout,
                Condition::StatusTextIs(labels.out_of_stock.clone()),
            ),
            ActionRule::new(
                StockAction::DiscountSale,
                Condition::DaysWithoutOrderAtLeast(thresholds.stale_days_without_order),
            ),
            ActionRule::new(
                StockAction::Liquidate,
                Condition::StatusTextIs(labels.discontinued.clone()),
            ),
        ])
    }

    pub fn evaluate(&self, row: &InventoryRow) -> StockAction {
        self.rules
            .iter()
            .find(|rule| rule.condition.matches(row))
            .map(|rule| rule.action)
            .unwrap_or(StockAction::Normal)
    }
}
