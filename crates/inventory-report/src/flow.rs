//! 當日出入庫分析

use inventory_core::{InventoryRow, Thresholds};
use serde::Serialize;

use crate::stats::{group_by, net_total, total};

/// 整體庫存變化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowDirection {
    Increase,
    Decrease,
}

/// 棟別出入庫狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowStatus {
    /// 淨變化 ≥ 0
    Normal,
    /// 緊急門檻 ≤ 淨變化 < 0
    Shortage,
    /// 淨變化 < 緊急門檻
    Urgent,
}

impl FlowStatus {
    pub fn classify(net: i64, urgent_deficit: i64) -> Self {
        if net >= 0 {
            FlowStatus::Normal
        } else if net >= urgent_deficit {
            FlowStatus::Shortage
        } else {
            FlowStatus::Urgent
        }
    }
}

/// 出入庫彙總
#[derive(Debug, Clone, Serialize)]
pub struct DailyFlow {
    pub total_inbound: u64,
    pub total_outbound: u64,
    pub net: i64,
    pub direction: FlowDirection,
    /// 棟別明細（棟別名稱遞增）
    pub buildings: Vec<BuildingFlow>,
}

impl DailyFlow {
    /// 淨變化最低且為負的棟別
    pub fn worst_deficit(&self) -> Option<&BuildingFlow> {
        self.buildings
            .iter()
            .filter(|b| b.net < 0)
            .min_by_key(|b| b.net)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingFlow {
    pub building: String,
    pub inbound: u64,
    pub outbound: u64,
    pub net: i64,
    pub status: FlowStatus,
}

/// 出入庫計算器
pub struct FlowCalculator;

impl FlowCalculator {
    pub fn calculate(rows: &[InventoryRow], thresholds: &Thresholds) -> DailyFlow {
        let total_inbound = total(rows.iter().map(|r| r.daily_inbound_qty));
        let total_outbound = total(rows.iter().map(|r| r.daily_outbound_qty));

        let buildings = group_by(rows, |r| r.building.clone())
            .into_iter()
            .map(|(building, members)| {
                let inbound = total(members.iter().map(|r| r.daily_inbound_qty));
                let outbound = total(members.iter().map(|r| r.daily_outbound_qty));
                let net = net_total(members.iter().map(|r| r.daily_net_flow()));
                BuildingFlow {
                    building,
                    inbound,
                    outbound,
                    net,
                    status: FlowStatus::classify(net, thresholds.flow_urgent_deficit),
                }
            })
            .collect();

        DailyFlow {
            total_inbound,
            total_outbound,
            net: net_total(rows.iter().map(|r| r.daily_net_flow())),
            direction: if total_inbound < total_outbound {
                FlowDirection::Decrease
            } else {
                FlowDirection::Increase
            },
            buildings,
        }
    }
}
