//! 報表配置模型

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{InventoryError, Result};

/// 預設輸入檔名（位於執行檔所在目錄）
pub const DEFAULT_INPUT_FILE: &str = "mock-inventory-data.csv";

/// 預設輸出檔名（位於執行檔所在目錄）
pub const DEFAULT_OUTPUT_FILE: &str = "inventory_analysis_result.csv";

/// 庫存分析報表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 輸入 CSV 路徑
    pub input_path: PathBuf,

    /// 輸出 CSV 路徑
    pub output_path: PathBuf,

    /// 判定門檻
    #[serde(default)]
    pub thresholds: Thresholds,

    /// 銷售狀態顯示文字
    #[serde(default)]
    pub status_labels: StatusLabels,
}

impl ReportConfig {
    /// 創建新的報表配置
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            thresholds: Thresholds::default(),
            status_labels: StatusLabels::default(),
        }
    }

    /// 以指定目錄為基準，使用預設檔名
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_INPUT_FILE), dir.join(DEFAULT_OUTPUT_FILE))
    }

    /// 從 JSON 字串載入配置
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InventoryError::InvalidConfig(e.to_string()))
    }

    /// 建構器模式：設置輸入路徑
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// 建構器模式：設置輸出路徑
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

/// 各報表使用的判定門檻
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// 可用率低於等於此值視為緊急（%）
    pub low_availability_rate: f64,

    /// 未訂購天數大於等於此值需折扣銷售
    pub stale_days_without_order: u32,

    /// 當日淨變化低於此值視為緊急（負數）
    pub flow_urgent_deficit: i64,

    /// 毛利率高於此值為最佳（%）
    pub margin_best: f64,

    /// 毛利率高於此值為良好（%）
    pub margin_good: f64,

    /// 周轉率高於此值為最佳（%）
    pub turnover_high: f64,

    /// 周轉率高於此值為良好（%）
    pub turnover_good: f64,

    /// 排行榜筆數
    pub top_n: usize,

    /// 每棟顯示的區域數
    pub top_zones: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_availability_rate: 30.0,
            stale_days_without_order: 100,
            flow_urgent_deficit: -100,
            margin_best: 32.0,
            margin_good: 25.0,
            turnover_high: 15.0,
            turnover_good: 10.0,
            top_n: 5,
            top_zones: 3,
        }
    }
}

/// 銷售狀態顯示文字（與來源數據一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub on_sale: String,
    pub out_of_stock: String,
    pub discontinued: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            on_sale: "판매중".to_string(),
            out_of_stock: "품절".to_string(),
            discontinued: "단종".to_string(),
        }
    }
}
