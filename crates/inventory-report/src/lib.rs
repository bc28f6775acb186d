//! # Inventory Report Engine
//!
//! 庫存分析報表引擎：統計、風險識別、位置彙總、出入庫、毛利、周轉與匯出

pub mod action;
pub mod engine;
pub mod export;
pub mod final_summary;
pub mod flow;
pub mod format;
pub mod location;
pub mod profitability;
pub mod render;
pub mod risk;
pub mod status;
pub mod summary;
pub mod turnover;

mod stats;

// Re-export 主要類型
pub use action::{ActionRule, ActionRules, Condition, StockAction};
pub use engine::InventoryReportEngine;
pub use export::ExportRecord;
pub use final_summary::FinalSummary;
pub use flow::{DailyFlow, FlowStatus};
pub use location::BuildingSummary;
pub use profitability::Profitability;
pub use risk::RiskItems;
pub use status::StatusGroup;
pub use summary::SummaryStats;
pub use turnover::TurnoverAnalysis;

use serde::Serialize;

/// 三段式評級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    /// 最佳
    Best,
    /// 良好
    Good,
    /// 注意
    Caution,
}

impl Tier {
    /// 依門檻分級（嚴格大於）
    pub fn classify(value: f64, best_above: f64, good_above: f64) -> Self {
        if value > best_above {
            Tier::Best
        } else if value > good_above {
            Tier::Good
        } else {
            Tier::Caution
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tier::Best => "⭐",
            Tier::Good => "✅",
            Tier::Caution => "⚠️",
        }
    }
}

/// 商品排行項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProduct {
    pub product_name: String,
    pub category: String,
    pub quantity: u64,
    /// 排序依據的數值（毛利率或周轉率）
    pub value: f64,
}

/// 名稱與數值配對（推薦項目）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight<T> {
    pub name: String,
    pub value: T,
}

impl<T> Highlight<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
