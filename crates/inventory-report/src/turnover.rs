//! 周轉率分析（當日出庫 / 現有庫存）

use inventory_core::{InventoryRow, Thresholds};
use serde::Serialize;

use crate::stats::{group_by, percent_of, sum_quantity, top_n_by, total};
use crate::{Highlight, RankedProduct, Tier};

/// 周轉率分析結果
#[derive(Debug, Clone, Serialize)]
pub struct TurnoverAnalysis {
    /// 分類周轉率（分類名稱遞增）
    pub categories: Vec<CategoryTurnover>,

    /// 周轉率最高的商品
    pub top: Vec<RankedProduct>,
}

impl TurnoverAnalysis {
    /// 周轉率最高的分類（同值取資料中較早出現者）
    pub fn fastest_category(&self) -> Option<Highlight<f64>> {
        self.categories
            .iter()
            .fold(None::<&CategoryTurnover>, |best, c| match best {
                Some(b)
                    if b.turnover_percent > c.turnover_percent
                        || (b.turnover_percent == c.turnover_percent
                            && b.first_seen <= c.first_seen) =>
                {
                    Some(b)
                }
                _ => Some(c),
            })
            .map(|c| Highlight::new(c.category.clone(), c.turnover_percent))
    }

    /// 周轉率超過門檻的分類中最高者
    pub fn fastest_category_above(&self, threshold: f64) -> Option<Highlight<f64>> {
        self.fastest_category().filter(|h| h.value > threshold)
    }
}

/// 分類周轉率（以分類合計計算，不是單品周轉率的平均）
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTurnover {
    pub category: String,
    pub daily_outbound: u64,
    pub quantity: u64,
    pub turnover_percent: f64,
    pub tier: Tier,
    /// 首筆資料列的位置
    #[serde(skip)]
    pub(crate) first_seen: usize,
}

/// 周轉率計算器
pub struct TurnoverCalculator;

impl TurnoverCalculator {
    pub fn calculate(rows: &[InventoryRow], thresholds: &Thresholds) -> TurnoverAnalysis {
        let categories = group_by(rows, |r| r.category.clone())
            .into_iter()
            .map(|(category, members)| {
                let first_seen = rows
                    .iter()
                    .position(|r| r.category == category)
                    .unwrap_or_default();
                let daily_outbound = total(members.iter().map(|r| r.daily_outbound_qty));
                let quantity = sum_quantity(&members);
                let turnover_percent = percent_of(daily_outbound as f64, quantity as f64);
                CategoryTurnover {
                    category,
                    daily_outbound,
                    quantity,
                    turnover_percent,
                    tier: Tier::classify(
                        turnover_percent,
                        thresholds.turnover_high,
                        thresholds.turnover_good,
                    ),
                    first_seen,
                }
            })
            .collect();

        let top = top_n_by(rows, thresholds.top_n, true, InventoryRow::turnover_percent)
            .into_iter()
            .map(|r| RankedProduct {
                product_name: r.product_name.clone(),
                category: r.category.clone(),
                quantity: r.quantity,
                value: r.turnover_percent(),
            })
            .collect();

        TurnoverAnalysis { categories, top }
    }
}
