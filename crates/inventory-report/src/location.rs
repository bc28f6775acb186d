//! 棟別位置分析

use inventory_core::InventoryRow;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::{group_by, percent_of, sum_quantity, sum_value, total};

/// 單棟彙總
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSummary {
    pub building: String,
    pub product_count: usize,
    pub quantity: u64,
    /// 佔總庫存量比例（%）
    pub quantity_share_percent: f64,
    pub stock_value: Decimal,
    /// 庫存量最多的區域
    pub top_zones: Vec<ZoneQuantity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneQuantity {
    pub zone: String,
    pub quantity: u64,
}

/// 位置分析器
pub struct LocationCalculator;

impl LocationCalculator {
    /// 依棟別彙總（棟別名稱遞增）
    pub fn calculate(rows: &[InventoryRow], top_zones: usize) -> Vec<BuildingSummary> {
        let total_quantity = total(rows.iter().map(|r| r.quantity));

        group_by(rows, |r| r.building.clone())
            .into_iter()
            .map(|(building, members)| {
                let quantity = sum_quantity(&members);
                BuildingSummary {
                    product_count: members.len(),
                    quantity,
                    quantity_share_percent: percent_of(quantity as f64, total_quantity as f64),
                    stock_value: sum_value(&members),
                    top_zones: Self::top_zones(&members, top_zones),
                    building,
                }
            })
            .collect()
    }

    fn top_zones(members: &[&InventoryRow], limit: usize) -> Vec<ZoneQuantity> {
        let mut zones: Vec<ZoneQuantity> = Vec::new();
        for row in members {
            match zones.iter_mut().find(|z| z.zone == row.zone) {
                Some(zone) => zone.quantity += row.quantity,
                None => zones.push(ZoneQuantity {
                    zone: row.zone.clone(),
                    quantity: row.quantity,
                }),
            }
        }

        zones.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.zone.cmp(&b.zone)));
        zones.truncate(limit);
        zones
    }
}
