//! 庫存報表主引擎

use std::io::Write;

use chrono::{DateTime, Local};
use inventory_core::{InventoryDataset, InventoryRow, ReportConfig, Result};

use crate::action::ActionRules;
use crate::export::{ExportRecord, Exporter};
use crate::final_summary::{FinalSummary, FinalSummaryBuilder};
use crate::flow::{DailyFlow, FlowCalculator};
use crate::location::{BuildingSummary, LocationCalculator};
use crate::profitability::{Profitability, ProfitabilityCalculator};
use crate::render::TextRenderer;
use crate::risk::{RiskCalculator, RiskItems};
use crate::status::{StatusCalculator, StatusGroup};
use crate::summary::{SummaryCalculator, SummaryStats};
use crate::turnover::{TurnoverAnalysis, TurnoverCalculator};

/// 庫存報表引擎
///
/// 各報表方法只讀取已載入的資料；周轉率與處置標籤在需要時即時推導。
pub struct InventoryReportEngine {
    /// 已載入的庫存表
    dataset: InventoryDataset,

    /// 報表配置
    config: ReportConfig,

    /// 處置規則
    rules: ActionRules,
}

impl InventoryReportEngine {
    /// 創建新的報表引擎
    pub fn new(dataset: InventoryDataset, config: ReportConfig) -> Self {
        let rules = ActionRules::standard(&config.thresholds, &config.status_labels);
        Self {
            dataset,
            config,
            rules,
        }
    }

    /// 建構器模式：替換處置規則
    pub fn with_rules(mut self, rules: ActionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.dataset.rows
    }

    pub fn dataset(&self) -> &InventoryDataset {
        &self.dataset
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn summary_stats(&self) -> SummaryStats {
        SummaryCalculator::calculate(self.rows())
    }

    pub fn status_breakdown(&self) -> Vec<StatusGroup> {
        StatusCalculator::calculate(self.rows(), &self.config.status_labels)
    }

    pub fn risk_identification(&self) -> RiskItems {
        RiskCalculator::identify(self.rows(), &self.config.thresholds)
    }

    pub fn location_analysis(&self) -> Vec<BuildingSummary> {
        LocationCalculator::calculate(self.rows(), self.config.thresholds.top_zones)
    }

    pub fn daily_flow(&self) -> DailyFlow {
        FlowCalculator::calculate(self.rows(), &self.config.thresholds)
    }

    pub fn profitability_analysis(&self) -> Profitability {
        ProfitabilityCalculator::calculate(self.rows(), &self.config.thresholds)
    }

    pub fn turnover_analysis(&self) -> TurnoverAnalysis {
        TurnoverCalculator::calculate(self.rows(), &self.config.thresholds)
    }

    /// 匯出資料（含周轉率與處置標籤）
    pub fn export_records(&self) -> Vec<ExportRecord> {
        Exporter::build(self.rows(), &self.rules)
    }

    /// 寫出匯出檔至配置的輸出路徑
    pub fn export(&self) -> Result<Vec<ExportRecord>> {
        let records = self.export_records();
        Exporter::write_to_path(&self.config.output_path, &records)?;
        Ok(records)
    }

    /// 最終摘要（重新計算風險數量與推薦項目）
    pub fn final_summary(&self) -> FinalSummary {
        FinalSummaryBuilder::build(
            &self.risk_identification(),
            &self.location_analysis(),
            &self.daily_flow(),
            &self.profitability_analysis(),
            &self.turnover_analysis(),
            self.config.thresholds.turnover_high,
        )
    }

    /// 依固定順序輸出所有報表並匯出檔案
    pub fn run<W: Write>(&self, out: W, generated_at: DateTime<Local>) -> Result<()> {
        tracing::info!("開始庫存分析：商品 {} 筆", self.dataset.len());
        let start_time = std::time::Instant::now();

        let mut renderer = TextRenderer::new(out).with_thresholds(self.config.thresholds.clone());
        renderer.start_banner(generated_at)?;
        renderer.load_banner(&self.dataset)?;

        tracing::debug!("Step 1: 基本統計");
        renderer.summary(&self.summary_stats())?;

        tracing::debug!("Step 2: 銷售狀態");
        renderer.status_breakdown(&self.status_breakdown())?;

        tracing::debug!("Step 3: 風險商品");
        renderer.risks(&self.risk_identification())?;

        tracing::debug!("Step 4: 棟別位置");
        renderer.locations(&self.location_analysis())?;

        tracing::debug!("Step 5: 當日出入庫");
        renderer.daily_flow(&self.daily_flow())?;

        tracing::debug!("Step 6: 毛利率");
        renderer.profitability(&self.profitability_analysis())?;

        tracing::debug!("Step 7: 周轉率");
        renderer.turnover(&self.turnover_analysis())?;

        tracing::debug!("Step 8: 匯出");
        let records = self.export()?;
        renderer.export_preview(&self.config.output_path, &records)?;

        tracing::debug!("Step 9: 最終摘要");
        renderer.final_summary(&self.final_summary())?;
        renderer.end_banner()?;

        tracing::info!("庫存分析完成，耗時 {:?}", start_time.elapsed());
        Ok(())
    }
}
