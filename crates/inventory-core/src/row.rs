//! 庫存資料列模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 售罄的銷售狀態代碼
pub const SOLD_OUT_CODE: &str = "sold_out";

/// 單一商品的庫存快照
///
/// 欄位名稱與輸入 CSV 表頭一一對應（camelCase，大小寫敏感）。
/// `availability_rate` 與 `total_stock_value` 直接採用來源數據，不會由數量重新計算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    /// 商品ID
    pub id: String,

    /// 商品代碼
    pub product_code: String,

    /// 商品名稱
    pub product_name: String,

    /// 分類
    pub category: String,

    /// 棟別
    pub building: String,

    /// 區域
    pub zone: String,

    /// 現有庫存
    pub quantity: u64,

    /// 可用庫存
    pub available_quantity: u64,

    /// 可用率（%）
    pub availability_rate: f64,

    /// 庫存總額
    pub total_stock_value: Decimal,

    /// 毛利率（%），可能為負
    pub margin_percentage: f64,

    /// 當日入庫量
    pub daily_inbound_qty: u64,

    /// 當日出庫量
    pub daily_outbound_qty: u64,

    /// 未訂購天數
    pub days_without_order: u32,

    /// 銷售狀態代碼
    pub sale_status: String,

    /// 銷售狀態顯示文字
    pub sale_status_text: String,
}

impl InventoryRow {
    /// 周轉率（當日出庫 / 現有庫存 × 100）
    ///
    /// 庫存為 0 時回傳 0。
    pub fn turnover_percent(&self) -> f64 {
        if self.quantity == 0 {
            0.0
        } else {
            self.daily_outbound_qty as f64 * 100.0 / self.quantity as f64
        }
    }

    /// 當日淨變化（入庫 - 出庫），超出 i64 範圍時取邊界值
    pub fn daily_net_flow(&self) -> i64 {
        let net = i128::from(self.daily_inbound_qty) - i128::from(self.daily_outbound_qty);
        i64::try_from(net).unwrap_or(if net < 0 { i64::MIN } else { i64::MAX })
    }

    pub fn is_sold_out(&self) -> bool {
        self.sale_status == SOLD_OUT_CODE
    }

    /// 依顯示文字判斷銷售狀態
    pub fn status(&self, labels: &crate::config::StatusLabels) -> SaleStatus {
        SaleStatus::from_label(&self.sale_status_text, labels)
    }
}

/// 銷售狀態（依顯示文字分類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    /// 販售中
    OnSale,
    /// 售罄
    OutOfStock,
    /// 停產
    Discontinued,
    /// 其他未知狀態
    Other,
}

impl SaleStatus {
    pub fn from_label(label: &str, labels: &crate::config::StatusLabels) -> Self {
        if label == labels.on_sale {
            SaleStatus::OnSale
        } else if label == labels.out_of_stock {
            SaleStatus::OutOfStock
        } else if label == labels.discontinued {
            SaleStatus::Discontinued
        } else {
            SaleStatus::Other
        }
    }

    /// 報表圖示
    pub fn icon(&self) -> &'static str {
        match self {
            SaleStatus::OnSale => "✅",
            SaleStatus::OutOfStock => "⚠️",
            SaleStatus::Discontinued | SaleStatus::Other => "❌",
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 測試用資料列
    pub fn row(id: &str, category: &str, quantity: u64, outbound: u64) -> InventoryRow {
        InventoryRow {
            id: id.to_string(),
            product_code: format!("P-{}", id),
            product_name: format!("商品{}", id),
            category: category.to_string(),
            building: "A".to_string(),
            zone: "01".to_string(),
            quantity,
            available_quantity: quantity,
            availability_rate: 100.0,
            total_stock_value: Decimal::from(1000),
            margin_percentage: 20.0,
            daily_inbound_qty: 0,
            daily_outbound_qty: outbound,
            days_without_order: 0,
            sale_status: "on_sale".to_string(),
            sale_status_text: "판매중".to_string(),
        }
    }
}
