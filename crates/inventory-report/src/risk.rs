//! 風險商品識別
//!
//! 三個篩選條件彼此獨立：同一商品可能同時出現在多個清單，也可能都不出現。

use inventory_core::{InventoryRow, Thresholds};
use serde::Serialize;

/// 需關注的商品清單
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiskItems {
    /// 可用率 ≤ 門檻（依可用率遞增）
    pub low_availability: Vec<InventoryRow>,

    /// 未訂購天數 ≥ 門檻（依天數遞減）
    pub stale: Vec<InventoryRow>,

    /// 售罄（保留原始順序）
    pub sold_out: Vec<InventoryRow>,
}

impl RiskItems {
    pub fn is_low_availability(row: &InventoryRow, thresholds: &Thresholds) -> bool {
        row.availability_rate <= thresholds.low_availability_rate
    }

    pub fn is_stale(row: &InventoryRow, thresholds: &Thresholds) -> bool {
        row.days_without_order >= thresholds.stale_days_without_order
    }
}

/// 風險識別器
pub struct RiskCalculator;

impl RiskCalculator {
    pub fn identify(rows: &[InventoryRow], thresholds: &Thresholds) -> RiskItems {
        let mut low_availability: Vec<InventoryRow> = rows
            .iter()
            .filter(|r| RiskItems::is_low_availability(r, thresholds))
            .cloned()
            .collect();
        low_availability.sort_by(|a, b| a.availability_rate.total_cmp(&b.availability_rate));

        let mut stale: Vec<InventoryRow> = rows
            .iter()
            .filter(|r| RiskItems::is_stale(r, thresholds))
            .cloned()
            .collect();
        stale.sort_by(|a, b| b.days_without_order.cmp(&a.days_without_order));

        let sold_out = rows.iter().filter(|r| r.is_sold_out()).cloned().collect();

        let items = RiskItems {
            low_availability,
            stale,
            sold_out,
        };

        tracing::debug!(
            "風險商品：低可用率 {}，長期未訂購 {}，售罄 {}",
            items.low_availability.len(),
            items.stale.len(),
            items.sold_out.len()
        );

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::RowBuilder;

    fn ids(rows: &[InventoryRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_low_availability_sorted_ascending() {
        let rows = vec![
            RowBuilder::new("1").availability_rate(30.0).build(),
            RowBuilder::new("2").availability_rate(31.0).build(),
            RowBuilder::new("3").availability_rate(5.0).build(),
        ];

        let items = RiskCalculator::identify(&rows, &Thresholds::default());
        assert_eq!(ids(&items.low_availability), vec!["3", "1"]);
    }

    #[test]
    fn test_stale_sorted_descending() {
        let rows = vec![
            RowBuilder::new("1").days_without_order(100).build(),
            RowBuilder::new("2").days_without_order(99).build(),
            RowBuilder::new("3").days_without_order(240).build(),
        ];

        let items = RiskCalculator::identify(&rows, &Thresholds::default());
        assert_eq!(ids(&items.stale), vec!["3", "1"]);
    }

    #[test]
    fn test_filters_are_independent() {
        let rows = vec![
            // 同時符合三個條件
            RowBuilder::new("1")
                .availability_rate(0.0)
                .days_without_order(150)
                .status("sold_out", "품절")
                .build(),
            // 售罄但可用率正常
            RowBuilder::new("2")
                .availability_rate(50.0)
                .status("sold_out", "품절")
                .build(),
            // 都不符合
            RowBuilder::new("3").availability_rate(80.0).build(),
        ];

        let items = RiskCalculator::identify(&rows, &Thresholds::default());
        assert_eq!(ids(&items.low_availability), vec!["1"]);
        assert_eq!(ids(&items.stale), vec!["1"]);
        assert_eq!(ids(&items.sold_out), vec!["1", "2"]);
    }

    #[test]
    fn test_shoes_example_in_low_availability() {
        let rows = vec![RowBuilder::new("1")
            .category("Shoes")
            .quantity(100, 20)
            .availability_rate(20.0)
            .flow(0, 30)
            .build()];

        let items = RiskCalculator::identify(&rows, &Thresholds::default());
        assert_eq!(items.low_availability.len(), 1);
        assert!(items.sold_out.is_empty());
    }
}
