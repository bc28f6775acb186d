//! 最終摘要與建議
//!
//! 所有建議項目都由其他報表的彙總結果推導，不使用固定名稱或數值。

use serde::Serialize;

use crate::flow::DailyFlow;
use crate::location::BuildingSummary;
use crate::profitability::Profitability;
use crate::risk::RiskItems;
use crate::turnover::TurnoverAnalysis;
use crate::Highlight;

/// 最終摘要
#[derive(Debug, Clone, Serialize)]
pub struct FinalSummary {
    /// 可用率過低、需緊急補貨的商品數
    pub urgent_reorder_count: usize,

    /// 長期未訂購、需折扣銷售的商品數
    pub discount_count: usize,

    /// 售罄商品數
    pub sold_out_count: usize,

    /// 周轉率超過門檻的分類中最高者
    pub high_turnover_category: Option<Highlight<f64>>,

    /// 平均毛利率最高的分類
    pub high_margin_category: Option<Highlight<f64>>,

    /// 庫存量佔比最高的棟別
    pub dominant_building: Option<Highlight<f64>>,

    /// 當日缺口最大的棟別（淨變化）
    pub deficit_building: Option<Highlight<i64>>,

    /// 周轉率最高的分類
    pub fastest_category: Option<Highlight<f64>>,
}

/// 最終摘要產生器
pub struct FinalSummaryBuilder;

impl FinalSummaryBuilder {
    pub fn build(
        risks: &RiskItems,
        buildings: &[BuildingSummary],
        flow: &DailyFlow,
        profitability: &Profitability,
        turnover: &TurnoverAnalysis,
        turnover_high: f64,
    ) -> FinalSummary {
        let dominant_building = buildings
            .iter()
            .fold(None::<&BuildingSummary>, |best, b| match best {
                Some(current) if current.quantity >= b.quantity => Some(current),
                _ => Some(b),
            })
            .map(|b| Highlight::new(b.building.clone(), b.quantity_share_percent));

        FinalSummary {
            urgent_reorder_count: risks.low_availability.len(),
            discount_count: risks.stale.len(),
            sold_out_count: risks.sold_out.len(),
            high_turnover_category: turnover.fastest_category_above(turnover_high),
            high_margin_category: profitability.best_category(),
            dominant_building,
            deficit_building: flow
                .worst_deficit()
                .map(|b| Highlight::new(b.building.clone(), b.net)),
            fastest_category: turnover.fastest_category(),
        }
    }
}
