//! CSV 庫存資料載入

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;

use crate::{InventoryError, InventoryRow, Result};

/// 數量欄位的累計上限，任何分組加總與淨變化都能以 i64 表示
const MAX_QUANTITY_TOTAL: u64 = i64::MAX as u64;

/// 已載入的庫存表
#[derive(Debug, Clone, Default)]
pub struct InventoryDataset {
    /// 輸入表頭（依檔案順序）
    pub headers: Vec<String>,

    /// 資料列
    pub rows: Vec<InventoryRow>,
}

impl InventoryDataset {
    pub fn new(headers: Vec<String>, rows: Vec<InventoryRow>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// 從任意 reader 載入庫存資料
///
/// 任何無法解析的資料列都會立即回傳 [`InventoryError::MalformedRow`]，
/// 數值欄位不會被默默補成 0。
pub fn load_inventory<R: Read>(reader: R) -> Result<InventoryDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    let mut totals = Totals::default();
    for (index, result) in csv_reader.deserialize::<InventoryRow>().enumerate() {
        // 表頭佔第 1 行
        let fallback_line = index as u64 + 2;
        let row = result.map_err(|e| into_row_error(e, fallback_line))?;
        validate_row(&row, fallback_line)?;
        totals.add(&row, fallback_line)?;
        rows.push(row);
    }

    tracing::debug!("載入 {} 筆資料，欄位 {} 個", rows.len(), headers.len());

    Ok(InventoryDataset::new(headers, rows))
}

/// 從檔案路徑載入庫存資料
///
/// 路徑不存在、不是一般檔案或讀取時發生 I/O 錯誤，都回傳
/// [`InventoryError::InputNotFound`]。
pub fn load_inventory_file(path: &Path) -> Result<InventoryDataset> {
    let not_found = || InventoryError::InputNotFound {
        path: path.to_path_buf(),
    };

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            tracing::debug!("{} 不是檔案", path.display());
            return Err(not_found());
        }
        Err(e) => {
            tracing::debug!("無法取得 {} 資訊: {}", path.display(), e);
            return Err(not_found());
        }
    }

    let file = File::open(path).map_err(|e| {
        tracing::debug!("開啟 {} 失敗: {}", path.display(), e);
        not_found()
    })?;

    tracing::info!("讀取庫存資料: {}", path.display());
    load_inventory(file).map_err(|err| match err {
        InventoryError::Csv(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
            tracing::debug!("讀取 {} 失敗: {}", path.display(), e);
            not_found()
        }
        other => other,
    })
}

/// 逐列累計，超出上限的資料列視為格式錯誤
#[derive(Default)]
struct Totals {
    quantity: u64,
    available_quantity: u64,
    daily_inbound_qty: u64,
    daily_outbound_qty: u64,
    total_stock_value: Decimal,
}

impl Totals {
    fn add(&mut self, row: &InventoryRow, line: u64) -> Result<()> {
        let overflow = |field: &str| InventoryError::MalformedRow {
            line,
            message: format!("{} 累計超出可表示範圍", field),
        };

        let quantities = [
            ("quantity", &mut self.quantity, row.quantity),
            ("availableQuantity", &mut self.available_quantity, row.available_quantity),
            ("dailyInboundQty", &mut self.daily_inbound_qty, row.daily_inbound_qty),
            ("dailyOutboundQty", &mut self.daily_outbound_qty, row.daily_outbound_qty),
        ];
        for (field, total, value) in quantities {
            *total = total
                .checked_add(value)
                .filter(|sum| *sum <= MAX_QUANTITY_TOTAL)
                .ok_or_else(|| overflow(field))?;
        }

        self.total_stock_value = self
            .total_stock_value
            .checked_add(row.total_stock_value)
            .ok_or_else(|| overflow("totalStockValue"))?;
        Ok(())
    }
}

fn into_row_error(err: csv::Error, fallback_line: u64) -> InventoryError {
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => Some(de.to_string()),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => Some(format!("欄位數不符：預期 {}，實際 {}", expected_len, len)),
        _ => None,
    };

    match message {
        Some(message) => InventoryError::MalformedRow { line, message },
        None => InventoryError::Csv(err),
    }
}

fn validate_row(row: &InventoryRow, line: u64) -> Result<()> {
    let checks = [
        ("availabilityRate", row.availability_rate),
        ("marginPercentage", row.margin_percentage),
    ];
    for (field, value) in checks {
        if !value.is_finite() {
            return Err(InventoryError::MalformedRow {
                line,
                message: format!("{} 不是有效數值: {}", field, value),
            });
        }
    }
    Ok(())
}
