//! 彙總計算輔助函式

use inventory_core::InventoryRow;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 平均值，空集合回傳 None
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// 佔比（%），總數為 0 時回傳 0
pub(crate) fn percent_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part * 100.0 / total
    }
}

/// 金額佔比（%），總額為 0 時回傳 0
pub(crate) fn decimal_share(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

/// 依鍵分組（鍵排序）
pub(crate) fn group_by<'a, K, F>(rows: &'a [InventoryRow], key: F) -> BTreeMap<K, Vec<&'a InventoryRow>>
where
    K: Ord,
    F: Fn(&InventoryRow) -> K,
{
    let mut groups: BTreeMap<K, Vec<&InventoryRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// 取前 N 筆（穩定排序，同值保留原始順序）
pub(crate) fn top_n_by<'a, F>(
    rows: &'a [InventoryRow],
    n: usize,
    descending: bool,
    value: F,
) -> Vec<&'a InventoryRow>
where
    F: Fn(&InventoryRow) -> f64,
{
    let mut sorted: Vec<&InventoryRow> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = value(*a).total_cmp(&value(*b));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    sorted.truncate(n);
    sorted
}

/// 數量合計（飽和加總）
pub(crate) fn total<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().fold(0, u64::saturating_add)
}

/// 淨變化合計（飽和加總）
pub(crate) fn net_total<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().fold(0, i64::saturating_add)
}

/// 金額合計（飽和加總）
pub(crate) fn value_total<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

pub(crate) fn sum_quantity(rows: &[&InventoryRow]) -> u64 {
    total(rows.iter().map(|r| r.quantity))
}

pub(crate) fn sum_value(rows: &[&InventoryRow]) -> Decimal {
    value_total(rows.iter().map(|r| r.total_stock_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::RowBuilder;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![10.0, 20.0]), Some(15.0));
    }

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(25.0, 200.0), 12.5);
    }

    #[test]
    fn test_decimal_share() {
        assert_eq!(decimal_share(Decimal::from(1), Decimal::from(4)), 25.0);
        assert_eq!(decimal_share(Decimal::from(1), Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_totals_saturate() {
        assert_eq!(total(vec![u64::MAX, 5]), u64::MAX);
        assert_eq!(total(vec![2, 3]), 5);
        assert_eq!(net_total(vec![i64::MIN, -1]), i64::MIN);
        assert_eq!(value_total(vec![Decimal::MAX, Decimal::ONE]), Decimal::MAX);
    }

    #[test]
    fn test_top_n_is_stable_on_ties() {
        let rows = vec![
            RowBuilder::new("1").margin(10.0).build(),
            RowBuilder::new("2").margin(30.0).build(),
            RowBuilder::new("3").margin(10.0).build(),
            RowBuilder::new("4").margin(30.0).build(),
        ];

        let top = top_n_by(&rows, 3, true, |r| r.margin_percentage);
        let ids: Vec<_> = top.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "1"]);

        let bottom = top_n_by(&rows, 2, false, |r| r.margin_percentage);
        let ids: Vec<_> = bottom.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_group_by_sorted_keys() {
        let rows = vec![
            RowBuilder::new("1").location("C", "01").build(),
            RowBuilder::new("2").location("A", "01").build(),
            RowBuilder::new("3").location("C", "02").build(),
        ];

        let groups = group_by(&rows, |r| r.building.clone());
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["A", "C"]);
        assert_eq!(groups["C"].len(), 2);
    }
}
