//! 文字報表輸出

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use inventory_core::{InventoryDataset, Thresholds};

use crate::export::ExportRecord;
use crate::final_summary::FinalSummary;
use crate::flow::{DailyFlow, FlowDirection, FlowStatus};
use crate::format::{money, optional_percent, percent, signed_thousands, thousands};
use crate::location::BuildingSummary;
use crate::profitability::Profitability;
use crate::risk::RiskItems;
use crate::status::StatusGroup;
use crate::summary::SummaryStats;
use crate::turnover::TurnoverAnalysis;
use crate::RankedProduct;

const RULE_WIDTH: usize = 70;
const EMPTY_LIST: &str = "   ✅ 해당 상품 없음";

/// 將各報表結果寫成文字區段
pub struct TextRenderer<W: Write> {
    out: W,
    thresholds: Thresholds,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            thresholds: Thresholds::default(),
        }
    }

    /// 建構器模式：設置標題中顯示的門檻
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", rule)
    }

    pub fn start_banner(&mut self, generated_at: DateTime<Local>) -> io::Result<()> {
        self.heading("🎯 재고 데이터 분석 시작")?;
        writeln!(self.out, "🕒 {}", generated_at.format("%Y-%m-%d %H:%M:%S"))
    }

    pub fn end_banner(&mut self) -> io::Result<()> {
        self.heading("✅ 분석 완료!")?;
        writeln!(self.out)
    }

    pub fn input_not_found(&mut self, path: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "❌ 오류: {} 파일을 찾을 수 없습니다.",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        )?;
        writeln!(self.out, "   파일 위치: {}", path.display())
    }

    pub fn load_banner(&mut self, dataset: &InventoryDataset) -> io::Result<()> {
        writeln!(self.out, "✅ 데이터 로드 완료: {}개 상품", dataset.len())?;
        writeln!(self.out, "📊 총 컬럼: {}", dataset.column_count())
    }

    pub fn summary(&mut self, stats: &SummaryStats) -> io::Result<()> {
        self.heading("📈 기본 통계")?;

        writeln!(self.out, "\n🏪 전체 재고 현황:")?;
        writeln!(self.out, "  ├─ 총 상품 수: {}개", stats.product_count)?;
        writeln!(self.out, "  ├─ 총 재고량: {}개", thousands(stats.total_quantity))?;
        writeln!(self.out, "  ├─ 총 가용재고: {}개", thousands(stats.total_available))?;
        writeln!(
            self.out,
            "  ├─ 평균 가용율: {}",
            optional_percent(stats.mean_availability_rate)
        )?;
        writeln!(self.out, "  └─ 총 재고액: {}원", money(stats.total_stock_value))?;

        writeln!(self.out, "\n📊 카테고리별 현황:")?;
        for (idx, cat) in stats.categories.iter().enumerate() {
            writeln!(
                self.out,
                "  {}. {:10} | 재고: {:>6}개 | 재고액: {:>12}원 ({:>5.1}%) | 상품수: {}개",
                idx + 1,
                cat.category,
                thousands(cat.quantity),
                money(cat.stock_value),
                cat.value_share_percent,
                cat.product_count
            )?;
        }
        Ok(())
    }

    pub fn status_breakdown(&mut self, groups: &[StatusGroup]) -> io::Result<()> {
        self.heading("📉 판매상태별 분석")?;

        for group in groups {
            writeln!(self.out, "\n{} {}", group.status.icon(), group.label)?;
            writeln!(self.out, "   ├─ 상품 수: {}개", group.product_count)?;
            writeln!(self.out, "   ├─ 총 재고: {}개", thousands(group.quantity))?;
            writeln!(self.out, "   ├─ 재고액: {}원", money(group.stock_value))?;
            writeln!(
                self.out,
                "   └─ 평균 가용율: {}",
                percent(group.mean_availability_rate)
            )?;
        }
        Ok(())
    }

    pub fn risks(&mut self, risks: &RiskItems) -> io::Result<()> {
        self.heading("⚠️ 주의 필요 상품 식별")?;

        writeln!(
            self.out,
            "\n🔴 가용율 {}% 이하 상품 (긴급 조치 필요):",
            self.thresholds.low_availability_rate
        )?;
        if risks.low_availability.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
        }
        for row in &risks.low_availability {
            writeln!(
                self.out,
                "   {:15} | 가용율: {:>5.1}% | 가용: {:>5}개 / {:>5}개",
                row.product_name,
                row.availability_rate,
                thousands(row.available_quantity),
                thousands(row.quantity)
            )?;
        }

        writeln!(
            self.out,
            "\n🟡 미주문 {}일 이상 상품 (할인 필요):",
            self.thresholds.stale_days_without_order
        )?;
        if risks.stale.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
        }
        for row in &risks.stale {
            writeln!(
                self.out,
                "   {:15} | 미주문: {:>3}일 | 재고액: {:>12}원",
                row.product_name,
                row.days_without_order,
                money(row.total_stock_value)
            )?;
        }

        writeln!(self.out, "\n🟠 품절 상품 (즉시 재발주):")?;
        if risks.sold_out.is_empty() {
            writeln!(self.out, "{}", EMPTY_LIST)?;
        }
        for row in &risks.sold_out {
            writeln!(
                self.out,
                "   {:15} | 현재: {:>5}개 | 가용: {:>5}개",
                row.product_name,
                thousands(row.quantity),
                thousands(row.available_quantity)
            )?;
        }
        Ok(())
    }

    pub fn locations(&mut self, buildings: &[BuildingSummary]) -> io::Result<()> {
        self.heading("🏢 건물별 위치 분석")?;

        for b in buildings {
            writeln!(self.out, "\n🏢 {}동", b.building)?;
            writeln!(self.out, "   ├─ 상품 수: {}개", b.product_count)?;
            writeln!(
                self.out,
                "   ├─ 재고량: {}개 ({})",
                thousands(b.quantity),
                percent(b.quantity_share_percent)
            )?;
            writeln!(self.out, "   ├─ 재고액: {}원", money(b.stock_value))?;
            writeln!(self.out, "   └─ TOP 구역:")?;
            for zone in &b.top_zones {
                writeln!(
                    self.out,
                    "      └─ {}-{}: {}개",
                    b.building,
                    zone.zone,
                    thousands(zone.quantity)
                )?;
            }
        }
        Ok(())
    }

    pub fn daily_flow(&mut self, flow: &DailyFlow) -> io::Result<()> {
        self.heading("📦 당일 입출고 분석")?;

        let direction = match flow.direction {
            FlowDirection::Decrease => "⬇️ 재고 감소",
            FlowDirection::Increase => "⬆️ 재고 증가",
        };

        writeln!(self.out, "\n📊 당일 전체 현황:")?;
        writeln!(self.out, "   ├─ 총 입고: {}개", thousands(flow.total_inbound))?;
        writeln!(self.out, "   ├─ 총 출고: {}개", thousands(flow.total_outbound))?;
        writeln!(
            self.out,
            "   └─ 순 변화: {}개 ({})",
            signed_thousands(flow.net),
            direction
        )?;

        writeln!(self.out, "\n🏢 건물별 당일 입출고:")?;
        for b in &flow.buildings {
            let status = match b.status {
                FlowStatus::Normal => "✅ 정상",
                FlowStatus::Shortage => "⚠️ 부족",
                FlowStatus::Urgent => "🚨 긴급",
            };
            writeln!(
                self.out,
                "   {}동: 입고 {:>5} - 출고 {:>5} = {:>6} {}",
                b.building,
                thousands(b.inbound),
                thousands(b.outbound),
                signed_thousands(b.net),
                status
            )?;
        }
        Ok(())
    }

    pub fn profitability(&mut self, result: &Profitability) -> io::Result<()> {
        self.heading("💰 수익성 분석 (마진율)")?;

        writeln!(
            self.out,
            "\n📊 전체 평균 마진율: {}",
            optional_percent(result.mean_margin)
        )?;

        writeln!(self.out, "\n📈 카테고리별 마진율:")?;
        for cat in &result.categories {
            writeln!(
                self.out,
                "   {} {:10} | 마진: {:>5.1}% | 재고: {:>6}개 | 재고액: {:>12}원",
                cat.tier.icon(),
                cat.category,
                cat.mean_margin,
                thousands(cat.quantity),
                money(cat.stock_value)
            )?;
        }

        writeln!(self.out, "\n⭐ 마진율 TOP {} 상품:", result.top.len())?;
        self.ranking(&result.top, |p| thousands(p.quantity) + "개")?;

        writeln!(self.out, "\n❌ 마진율 BOTTOM {} 상품:", result.bottom.len())?;
        self.ranking(&result.bottom, |p| thousands(p.quantity) + "개")
    }

    pub fn turnover(&mut self, result: &TurnoverAnalysis) -> io::Result<()> {
        self.heading("🔄 회전율 분석 (당일 출고 / 전체 재고)")?;

        writeln!(self.out, "\n📊 카테고리별 회전율:")?;
        for cat in &result.categories {
            writeln!(
                self.out,
                "   {} {:10} | 회전율: {:>5.1}% | 일일 출고: {:>5}개 / 총재고 {:>6}개",
                cat.tier.icon(),
                cat.category,
                cat.turnover_percent,
                thousands(cat.daily_outbound),
                thousands(cat.quantity)
            )?;
        }

        writeln!(self.out, "\n🚀 회전율 TOP {} 상품:", result.top.len())?;
        self.ranking(&result.top, |p| p.category.clone())
    }

    fn ranking<F>(&mut self, products: &[RankedProduct], trailing: F) -> io::Result<()>
    where
        F: Fn(&RankedProduct) -> String,
    {
        for (idx, p) in products.iter().enumerate() {
            writeln!(
                self.out,
                "   {}. {:20} | {:>5.1}% | {}",
                idx + 1,
                p.product_name,
                p.value,
                trailing(p)
            )?;
        }
        Ok(())
    }

    pub fn export_preview(&mut self, path: &Path, records: &[ExportRecord]) -> io::Result<()> {
        writeln!(self.out, "\n✅ 분석 결과 저장: {}", path.display())?;
        writeln!(self.out, "\n📋 분석 결과 미리보기:")?;
        writeln!(
            self.out,
            "{:>6} {:>12} {:20} {:10} {:>8} {:>8} {:>8}  {}",
            "id", "productCode", "productName", "category", "quantity", "rate", "turnover", "action"
        )?;
        for r in records.iter().take(5) {
            writeln!(
                self.out,
                "{:>6} {:>12} {:20} {:10} {:>8} {:>8.1} {:>8.1}  {}",
                r.id,
                r.product_code,
                r.product_name,
                r.category,
                r.quantity,
                r.availability_rate,
                r.turnover_percent,
                r.action
            )?;
        }
        Ok(())
    }

    pub fn final_summary(&mut self, summary: &FinalSummary) -> io::Result<()> {
        self.heading("🎯 최종 요약 및 권장사항")?;

        writeln!(self.out, "\n⚠️ 주요 지표:")?;
        writeln!(
            self.out,
            "   ├─ 🚨 긴급 재발주 필요: {}개 상품 (가용율 ≤ {}%)",
            summary.urgent_reorder_count, self.thresholds.low_availability_rate
        )?;
        writeln!(
            self.out,
            "   ├─ 🟡 할인 판매 필요: {}개 상품 (미주문 ≥ {}일)",
            summary.discount_count, self.thresholds.stale_days_without_order
        )?;
        writeln!(self.out, "   └─ ⚠️ 품절 상품: {}개", summary.sold_out_count)?;

        writeln!(self.out, "\n💡 기회 영역:")?;
        if let Some(cat) = &summary.high_turnover_category {
            writeln!(
                self.out,
                "   ├─ 🚀 회전율 높은 카테고리: {} ({})",
                cat.name,
                percent(cat.value)
            )?;
            writeln!(self.out, "      → 발주 증가 권장")?;
        }
        if let Some(cat) = &summary.high_margin_category {
            writeln!(
                self.out,
                "   ├─ 💰 마진율 높은 카테고리: {} ({})",
                cat.name,
                percent(cat.value)
            )?;
            writeln!(self.out, "      → 판매 증진 및 재고 최적화")?;
        }
        if let Some(b) = &summary.dominant_building {
            writeln!(
                self.out,
                "   └─ 📍 위치 최적화: {}동 중심 ({:.0}%) → 균등 분산",
                b.name, b.value
            )?;
        }

        writeln!(self.out, "\n✅ 즉시 조치 사항:")?;
        let mut items = vec![
            format!(
                "{}개 저재고 상품 긴급 조치 (재발주/생산)",
                summary.urgent_reorder_count
            ),
            format!("{}개 미판매 상품 30% 이상 할인", summary.discount_count),
            format!("{}개 품절 상품 우선 재발주", summary.sold_out_count),
        ];
        if let Some(b) = &summary.deficit_building {
            items.push(format!(
                "{}동 입고 증가 (당일 {}개 적자 해결)",
                b.name,
                signed_thousands(b.value)
            ));
        }
        if let Some(cat) = &summary.fastest_category {
            items.push(format!("{} 카테고리 재발주 증가 (회전율 최고)", cat.name));
        }
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.out, "   {}. {}", idx + 1, item)?;
        }
        Ok(())
    }
}
