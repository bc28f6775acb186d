//! 庫存資料分析工具
//!
//! 讀取庫存 CSV，輸出各項分析報表並匯出附加周轉率與處置標籤的結果檔。

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use inventory_core::{load_inventory_file, InventoryError, ReportConfig};
use inventory_report::render::TextRenderer;
use inventory_report::InventoryReportEngine;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inventory-analysis", about = "재고 데이터 분석 도구")]
struct Cli {
    /// 輸入 CSV（預設為執行檔目錄下的 mock-inventory-data.csv）
    #[arg(long)]
    input: Option<PathBuf>,

    /// 輸出 CSV（預設為執行檔目錄下的 inventory_analysis_result.csv）
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON 配置檔（門檻與狀態文字）
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // 日誌輸出至 stderr，stdout 只保留報表
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match load_inventory_file(&config.input_path) {
        Ok(dataset) => {
            let engine = InventoryReportEngine::new(dataset, config);
            engine.run(&mut out, Local::now())?;
        }
        Err(InventoryError::InputNotFound { path }) => {
            tracing::warn!("找不到輸入檔案: {}", path.display());
            let mut renderer = TextRenderer::new(&mut out);
            renderer.start_banner(Local::now())?;
            renderer.input_not_found(&path)?;
        }
        Err(err) => return Err(err.into()),
    }

    out.flush()?;
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("無法讀取配置檔 {}", path.display()))?;
            ReportConfig::from_json_str(&json)?
        }
        None => ReportConfig::in_dir(&program_dir()?),
    };

    if let Some(input) = &cli.input {
        config = config.with_input_path(input.clone());
    }
    if let Some(output) = &cli.output {
        config = config.with_output_path(output.clone());
    }
    Ok(config)
}

/// 執行檔所在目錄
fn program_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("無法取得執行檔路徑")?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
