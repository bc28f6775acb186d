//! # Inventory Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod loader;
pub mod row;

// Re-export 主要類型
pub use config::{ReportConfig, StatusLabels, Thresholds};
pub use loader::{load_inventory, load_inventory_file, InventoryDataset};
pub use row::{InventoryRow, SaleStatus, SOLD_OUT_CODE};

use std::path::PathBuf;

/// 庫存分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("找不到輸入檔案: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("第 {line} 行資料格式錯誤: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("CSV 錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
