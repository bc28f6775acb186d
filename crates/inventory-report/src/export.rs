//! 分析結果匯出（UTF-8 BOM CSV）

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use inventory_core::{InventoryRow, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::action::ActionRules;

/// UTF-8 BOM，讓試算表軟體正確辨識編碼
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 匯出欄位（順序即輸出欄位順序）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: String,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub quantity: u64,
    pub available_quantity: u64,
    pub availability_rate: f64,
    pub total_stock_value: Decimal,
    pub margin_percentage: f64,
    pub daily_inbound_qty: u64,
    pub daily_outbound_qty: u64,
    pub days_without_order: u32,
    pub sale_status_text: String,
    /// 周轉率（%），四捨五入至小數一位
    pub turnover_percent: f64,
    /// 處置標籤
    pub action: String,
}

impl ExportRecord {
    pub fn from_row(row: &InventoryRow, rules: &ActionRules) -> Self {
        Self {
            id: row.id.clone(),
            product_code: row.product_code.clone(),
            product_name: row.product_name.clone(),
            category: row.category.clone(),
            quantity: row.quantity,
            available_quantity: row.available_quantity,
            availability_rate: row.availability_rate,
            total_stock_value: row.total_stock_value,
            margin_percentage: row.margin_percentage,
            daily_inbound_qty: row.daily_inbound_qty,
            daily_outbound_qty: row.daily_outbound_qty,
            days_without_order: row.days_without_order,
            sale_status_text: row.sale_status_text.clone(),
            turnover_percent: round_one_decimal(row.turnover_percent()),
            action: rules.evaluate(row).label().to_string(),
        }
    }
}

/// 匯出器
pub struct Exporter;

impl Exporter {
    /// 建立匯出資料（每筆輸入對應一筆輸出，順序不變）
    pub fn build(rows: &[InventoryRow], rules: &ActionRules) -> Vec<ExportRecord> {
        rows.iter().map(|row| ExportRecord::from_row(row, rules)).collect()
    }

    /// 寫入任意 writer（含 BOM 與表頭）
    pub fn write<W: Write>(mut writer: W, records: &[ExportRecord]) -> Result<()> {
        writer.write_all(UTF8_BOM)?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 寫入檔案
    pub fn write_to_path(path: &Path, records: &[ExportRecord]) -> Result<()> {
        let file = File::create(path)?;
        Self::write(BufWriter::new(file), records)?;
        tracing::info!("匯出 {} 筆至 {}", records.len(), path.display());
        Ok(())
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
