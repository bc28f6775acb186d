//! 集成測試

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use chrono::Local;
use inventory_core::{load_inventory, load_inventory_file, InventoryError, ReportConfig};
use inventory_report::export::UTF8_BOM;
use inventory_report::{InventoryReportEngine, StockAction};
use rstest::rstest;

const HEADER: &str = "id,productCode,productName,category,building,zone,quantity,availableQuantity,availabilityRate,totalStockValue,marginPercentage,dailyInboundQty,dailyOutboundQty,daysWithoutOrder,saleStatus,saleStatusText";

/// 測試資料：
/// - 1: 可用率 20%，出庫 30 / 庫存 100 → 周轉率 30%，緊急補貨
/// - 2: 售罄但可用率 50% → 售罄補貨
/// - 3: 可用率 25% 且 150 天未訂購 → 仍為緊急補貨
/// - 4: 停產
/// - 5: 庫存為 0，周轉率 0
fn sample_csv() -> String {
    [
        HEADER,
        "1,SH-001,러닝화,Shoes,A,01,100,20,20.0,1500000,35.0,10,30,5,on_sale,판매중",
        "2,BG-002,백팩,가방,D,01,40,20,50.0,800000,28.0,60,200,10,sold_out,품절",
        "3,CL-003,티셔츠,의류,D,02,200,50,25.0,400000,12.0,40,50,150,on_sale,판매중",
        "4,CL-004,자켓,의류,B,01,60,60,100.0,1200000,-4.5,0,0,40,discontinued,단종",
        "5,SH-005,샌들,Shoes,A,02,0,0,0.0,0,30.0,0,3,0,on_sale,판매중",
    ]
    .join("\n")
        + "\n"
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("mock-inventory-data.csv");
    fs::write(&path, sample_csv()).unwrap();
    path
}

fn run_engine(dir: &Path) -> (InventoryReportEngine, String) {
    let input = write_input(dir);
    let config = ReportConfig::in_dir(dir).with_input_path(input);
    let dataset = load_inventory_file(&config.input_path).unwrap();
    let engine = InventoryReportEngine::new(dataset, config);

    let mut out = Vec::new();
    engine.run(&mut out, Local::now()).unwrap();
    (engine, String::from_utf8(out).unwrap())
}

#[test]
fn test_full_run_writes_sections_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let (_, report) = run_engine(dir.path());

    let sections = [
        "재고 데이터 분석 시작",
        "데이터 로드 완료: 5개 상품",
        "📈 기본 통계",
        "📉 판매상태별 분석",
        "⚠️ 주의 필요 상품 식별",
        "🏢 건물별 위치 분석",
        "📦 당일 입출고 분석",
        "💰 수익성 분석",
        "🔄 회전율 분석",
        "분석 결과 저장",
        "🎯 최종 요약 및 권장사항",
        "✅ 분석 완료!",
    ];

    let mut last = 0;
    for section in sections {
        let pos = report[last..]
            .find(section)
            .unwrap_or_else(|| panic!("section missing or out of order: {section}"));
        last += pos;
    }
}

#[test]
fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, _) = run_engine(dir.path());

    let bytes = fs::read(&engine.config().output_path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "id", "productCode", "productName", "category", "quantity", "availableQuantity",
            "availabilityRate", "totalStockValue", "marginPercentage", "dailyInboundQty",
            "dailyOutboundQty", "daysWithoutOrder", "saleStatusText", "turnoverPercent", "action",
        ]
    );

    let exported: HashMap<String, (f64, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (
                r[0].to_string(),
                (r[13].parse::<f64>().unwrap(), r[14].to_string()),
            )
        })
        .collect();

    // 每筆輸入恰好出現一次
    assert_eq!(exported.len(), engine.rows().len());
    for row in engine.rows() {
        let (turnover, _) = &exported[&row.id];
        let expected = (row.turnover_percent() * 10.0).round() / 10.0;
        assert_eq!(*turnover, expected);
    }

    assert_eq!(exported["1"], (30.0, StockAction::UrgentReorder.label().to_string()));
    assert_eq!(
        exported["2"].1,
        StockAction::ReorderAfterStockout.label().to_string()
    );
    assert_eq!(exported["3"].1, StockAction::UrgentReorder.label().to_string());
    assert_eq!(exported["4"].1, StockAction::Liquidate.label().to_string());
    assert_eq!(exported["5"].0, 0.0);
}

#[test]
fn test_risk_lists_and_flow_tiers() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, report) = run_engine(dir.path());

    let risks = engine.risk_identification();
    let low: Vec<_> = risks.low_availability.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(low, vec!["5", "1", "3"]);

    // 售罄但可用率 50% 不在低可用率清單
    let sold_out: Vec<_> = risks.sold_out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(sold_out, vec!["2"]);
    assert!(!low.contains(&"2"));

    // D 棟：入庫 100、出庫 250 → -150，緊急
    let flow = engine.daily_flow();
    let d = flow.buildings.iter().find(|b| b.building == "D").unwrap();
    assert_eq!(d.net, -150);
    assert_eq!(d.status, inventory_report::FlowStatus::Urgent);
    assert!(report.contains("D동 입고 증가 (당일 -150개 적자 해결)"));
}

#[test]
fn test_summary_shares_sum_to_hundred() {
    let dir = tempfile::tempdir().unwrap();
    let (engine, _) = run_engine(dir.path());

    let stats = engine.summary_stats();
    let total: f64 = stats.categories.iter().map(|c| c.value_share_percent).sum();
    assert!((total - 100.0).abs() < 1e-6);
    assert_eq!(stats.total_stock_value, rust_decimal::Decimal::from(3_900_000));
}

#[rstest]
#[case("not-a-number", 2)]
#[case("-1", 2)]
fn test_malformed_quantity_fails_fast(#[case] quantity: &str, #[case] line: u64) {
    let csv = format!(
        "{}\n1,SH-001,러닝화,Shoes,A,01,{},20,20.0,1500000,35.0,10,30,5,on_sale,판매중\n",
        HEADER, quantity
    );

    match load_inventory(csv.as_bytes()) {
        Err(InventoryError::MalformedRow { line: reported, .. }) => assert_eq!(reported, line),
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn test_binary_reports_missing_input_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.csv");
    let output = dir.path().join("result.csv");

    let result = Command::new(env!("CARGO_BIN_EXE_inventory-analysis"))
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("missing.csv 파일을 찾을 수 없습니다"));
    assert!(stdout.contains(&input.display().to_string()));
    assert!(!output.exists());
}

#[test]
fn test_binary_reports_unreadable_input_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inventory-dir");
    fs::create_dir(&input).unwrap();
    let output = dir.path().join("result.csv");

    let result = Command::new(env!("CARGO_BIN_EXE_inventory-analysis"))
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("재고 데이터 분석 시작"));
    assert!(stdout.contains("inventory-dir 파일을 찾을 수 없습니다"));
    assert!(stdout.contains(&input.display().to_string()));
    assert!(!output.exists());
}

#[test]
fn test_binary_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("result.csv");

    let result = Command::new(env!("CARGO_BIN_EXE_inventory-analysis"))
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(output.exists());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("✅ 분석 완료!"));
}
