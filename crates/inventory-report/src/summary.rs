//! 基本統計

use inventory_core::InventoryRow;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::{decimal_share, group_by, mean, sum_quantity, sum_value, total, value_total};

/// 整體庫存統計
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    /// 商品數
    pub product_count: usize,

    /// 總庫存量
    pub total_quantity: u64,

    /// 總可用庫存
    pub total_available: u64,

    /// 平均可用率（空資料為 None）
    pub mean_availability_rate: Option<f64>,

    /// 總庫存額
    pub total_stock_value: Decimal,

    /// 分類小計（依庫存額遞減）
    pub categories: Vec<CategorySubtotal>,
}

/// 分類小計
#[derive(Debug, Clone, Serialize)]
pub struct CategorySubtotal {
    pub category: String,
    pub quantity: u64,
    pub stock_value: Decimal,
    pub product_count: usize,
    /// 佔總庫存額比例（%）
    pub value_share_percent: f64,
}

/// 基本統計計算器
pub struct SummaryCalculator;

impl SummaryCalculator {
    pub fn calculate(rows: &[InventoryRow]) -> SummaryStats {
        let total_stock_value = value_total(rows.iter().map(|r| r.total_stock_value));

        let mut categories: Vec<CategorySubtotal> = group_by(rows, |r| r.category.clone())
            .into_iter()
            .map(|(category, members)| {
                let stock_value = sum_value(&members);
                CategorySubtotal {
                    category,
                    quantity: sum_quantity(&members),
                    stock_value,
                    product_count: members.len(),
                    value_share_percent: decimal_share(stock_value, total_stock_value),
                }
            })
            .collect();

        // 分組鍵已排序，穩定排序下同額分類依名稱排列
        categories.sort_by(|a, b| b.stock_value.cmp(&a.stock_value));

        SummaryStats {
            product_count: rows.len(),
            total_quantity: total(rows.iter().map(|r| r.quantity)),
            total_available: total(rows.iter().map(|r| r.available_quantity)),
            mean_availability_rate: mean(rows.iter().map(|r| r.availability_rate)),
            total_stock_value,
            categories,
        }
    }
}
