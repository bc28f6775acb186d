//! 毛利率分析

use inventory_core::{InventoryRow, Thresholds};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::{group_by, mean, sum_quantity, sum_value, top_n_by};
use crate::{Highlight, RankedProduct, Tier};

/// 毛利率分析結果
#[derive(Debug, Clone, Serialize)]
pub struct Profitability {
    /// 整體平均毛利率
    pub mean_margin: Option<f64>,

    /// 分類平均毛利率（遞減）
    pub categories: Vec<CategoryMargin>,

    /// 毛利率最高的商品
    pub top: Vec<RankedProduct>,

    /// 毛利率最低的商品
    pub bottom: Vec<RankedProduct>,
}

impl Profitability {
    /// 平均毛利率最高的分類
    pub fn best_category(&self) -> Option<Highlight<f64>> {
        self.categories
            .first()
            .map(|c| Highlight::new(c.category.clone(), c.mean_margin))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMargin {
    pub category: String,
    pub mean_margin: f64,
    pub quantity: u64,
    pub stock_value: Decimal,
    pub tier: Tier,
}

/// 毛利率計算器
pub struct ProfitabilityCalculator;

impl ProfitabilityCalculator {
    pub fn calculate(rows: &[InventoryRow], thresholds: &Thresholds) -> Profitability {
        let mut categories: Vec<CategoryMargin> = group_by(rows, |r| r.category.clone())
            .into_iter()
            .filter_map(|(category, members)| {
                let mean_margin = mean(members.iter().map(|r| r.margin_percentage))?;
                Some(CategoryMargin {
                    category,
                    mean_margin,
                    quantity: sum_quantity(&members),
                    stock_value: sum_value(&members),
                    tier: Tier::classify(mean_margin, thresholds.margin_best, thresholds.margin_good),
                })
            })
            .collect();
        categories.sort_by(|a, b| b.mean_margin.total_cmp(&a.mean_margin));

        let rank = |descending: bool| -> Vec<RankedProduct> {
            top_n_by(rows, thresholds.top_n, descending, |r| r.margin_percentage)
                .into_iter()
                .map(|r| RankedProduct {
                    product_name: r.product_name.clone(),
                    category: r.category.clone(),
                    quantity: r.quantity,
                    value: r.margin_percentage,
                })
                .collect()
        };

        Profitability {
            mean_margin: mean(rows.iter().map(|r| r.margin_percentage)),
            top: rank(true),
            bottom: rank(false),
            categories,
        }
    }
}
