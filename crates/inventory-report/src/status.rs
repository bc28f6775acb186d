//! 銷售狀態分析

use inventory_core::{InventoryRow, SaleStatus, StatusLabels};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::{sum_quantity, sum_value};

/// 單一銷售狀態的彙總
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup {
    /// 顯示文字
    pub label: String,
    pub status: SaleStatus,
    pub product_count: usize,
    pub quantity: u64,
    pub stock_value: Decimal,
    pub mean_availability_rate: f64,
}

/// 銷售狀態分析器
pub struct StatusCalculator;

impl StatusCalculator {
    /// 依 `saleStatusText` 分組，保留首次出現順序
    pub fn calculate(rows: &[InventoryRow], labels: &StatusLabels) -> Vec<StatusGroup> {
        let mut order: Vec<&str> = Vec::new();
        for row in rows {
            if !order.contains(&row.sale_status_text.as_str()) {
                order.push(&row.sale_status_text);
            }
        }

        order
            .into_iter()
            .map(|label| {
                let members: Vec<&InventoryRow> =
                    rows.iter().filter(|r| r.sale_status_text == label).collect();
                let rate_sum: f64 = members.iter().map(|r| r.availability_rate).sum();

                StatusGroup {
                    label: label.to_string(),
                    status: SaleStatus::from_label(label, labels),
                    product_count: members.len(),
                    quantity: sum_quantity(&members),
                    stock_value: sum_value(&members),
                    // 分組至少有一筆
                    mean_availability_rate: rate_sum / members.len() as f64,
                }
            })
            .collect()
    }
}
