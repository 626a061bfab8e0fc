//! Distributed memory across wearable mesh nodes.
//!
//! Fleet memory totals per node class, the shared 24-bit address space,
//! the sensor-to-report data pipeline, and how far a harvest budget goes
//! in memory operations versus radio bits.

pub mod address;

use serde::Serialize;

use crate::error::{ensure_positive, Result};
use crate::report::{Report, Table};

pub use address::MeshAddress;

/// A class of mesh node and its memory complement.
#[derive(Debug, Clone, Copy)]
pub struct NodeClass {
    pub name: &'static str,
    /// Four-bit type code in the address space
    pub type_code: u8,
    pub count: u32,
    pub sram_kb: u32,
    pub flash_kb: u32,
    pub mram_kb: u32,
    pub role: &'static str,
    pub data_rate_bps: u32,
}

impl NodeClass {
    pub fn per_node_kb(&self) -> u32 {
        self.sram_kb + self.flash_kb + self.mram_kb
    }

    fn memory_kinds(&self) -> &'static str {
        if self.mram_kb > 0 {
            "SRAM+Flash+MRAM"
        } else {
            "SRAM+Flash"
        }
    }
}

pub const NODE_CLASSES: [NodeClass; 4] = [
    NodeClass {
        name: "SensorNode",
        type_code: 0,
        count: 12,
        sram_kb: 64,
        flash_kb: 512,
        mram_kb: 0,
        role: "Data acquisition + local filter",
        data_rate_bps: 1_000,
    },
    NodeClass {
        name: "ComputeNode",
        type_code: 1,
        count: 2,
        sram_kb: 256,
        flash_kb: 2048,
        mram_kb: 4096,
        role: "Processing + inference",
        data_rate_bps: 100_000,
    },
    NodeClass {
        name: "PowerNode",
        type_code: 2,
        count: 4,
        sram_kb: 16,
        flash_kb: 128,
        mram_kb: 0,
        role: "Energy management + logging",
        data_rate_bps: 100,
    },
    NodeClass {
        name: "MeshRouter",
        type_code: 3,
        count: 6,
        sram_kb: 128,
        flash_kb: 512,
        mram_kb: 0,
        role: "Routing + buffering",
        data_rate_bps: 250_000,
    },
];

/// Fleet-wide memory totals (KB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetTotals {
    pub nodes: u32,
    pub sram_kb: u32,
    pub flash_kb: u32,
    pub mram_kb: u32,
    /// Aggregate raw data rate (bit/s)
    pub data_rate_bps: u64,
}

impl FleetTotals {
    pub fn total_kb(&self) -> u32 {
        self.sram_kb + self.flash_kb + self.mram_kb
    }
}

pub fn fleet_totals(classes: &[NodeClass]) -> FleetTotals {
    classes.iter().fold(FleetTotals::default(), |acc, c| FleetTotals {
        nodes: acc.nodes + c.count,
        sram_kb: acc.sram_kb + c.sram_kb * c.count,
        flash_kb: acc.flash_kb + c.flash_kb * c.count,
        mram_kb: acc.mram_kb + c.mram_kb * c.count,
        data_rate_bps: acc.data_rate_bps + u64::from(c.data_rate_bps) * u64::from(c.count),
    })
}

fn kb_label(kb: u32) -> String {
    if kb >= 1024 {
        format!("{:.2}MB", f64::from(kb) / 1024.0)
    } else {
        format!("{}KB", kb)
    }
}

/// Sensor-to-report pipeline (stage, node, operation, size).
pub const PIPELINE: [(&str, &str, &str, &str); 7] = [
    ("1. Sense", "SensorNode", "ADC sample → local SRAM buffer", "16 bytes/sample"),
    ("2. Filter", "SensorNode", "Moving average in SRAM", "1KB working set"),
    ("3. Compress", "SensorNode", "Delta encode → Flash log", "4:1 compression"),
    ("4. Transfer", "MeshRouter", "BLE packet → router SRAM buffer", "20 bytes/packet"),
    ("5. Aggregate", "ComputeNode", "Collect from 12 sensors → MRAM", "240 bytes/cycle"),
    ("6. Infer", "ComputeNode", "TinyML model in Flash, state in SRAM", "32KB model"),
    ("7. Report", "MeshRouter", "Result → BLE → phone/cloud", "50 bytes/report"),
];

/// Energy per bit of memory and radio operations (name, fJ, note).
pub const ENERGY_PER_BIT: [(&str, f64, &str); 7] = [
    ("SRAM read", 5.0, "Fastest, volatile"),
    ("SRAM write", 5.0, "Same as read"),
    ("Flash read", 50.0, "Non-volatile, slow write"),
    ("Flash write", 10_000.0, "Page erase needed"),
    ("MRAM read", 100.0, "Non-volatile, fast"),
    ("MRAM write", 200.0, "Spin-transfer torque"),
    ("BLE transmit", 50_000.0, "Over-the-air per bit"),
];

/// Harvest budget for the bandwidth comparison (µW).
pub const HARVEST_BUDGET_UW: f64 = 200.0;

/// Bits per microjoule at `femtojoules` per bit.
pub fn bits_per_microjoule(femtojoules: f64) -> Result<f64> {
    Ok(1e9 / ensure_positive("energy per bit", femtojoules)?)
}

/// Bits per second a continuous `power_uw` can pay for.
pub fn affordable_bit_rate(power_uw: f64, femtojoules: f64) -> Result<f64> {
    // 1 µW = 1e9 fJ/s
    Ok(power_uw * bits_per_microjoule(femtojoules)?)
}

/// Build the memory map report.
pub fn report() -> Result<Report> {
    let mut report = Report::new("Distributed RAM Memory Map — Wearable Mesh");

    let mut nodes = Table::new(&[
        ("Node", 14),
        ("#", 4),
        ("SRAM", 10),
        ("Flash", 10),
        ("MRAM", 10),
        ("Total/node", 12),
        ("Role", 0),
    ]);
    for c in &NODE_CLASSES {
        nodes.row([
            c.name.to_string(),
            c.count.to_string(),
            format!("{}KB", c.sram_kb),
            format!("{}KB", c.flash_kb),
            format!("{}KB", c.mram_kb),
            format!("{}KB", c.per_node_kb()),
            c.role.to_string(),
        ]);
    }
    let totals = fleet_totals(&NODE_CLASSES);
    let mb = |kb: u32| format!("{:.1}MB", f64::from(kb) / 1024.0);
    nodes.row([
        "TOTAL".to_string(),
        totals.nodes.to_string(),
        format!("{}KB", totals.sram_kb),
        format!("{}KB", totals.flash_kb),
        format!("{}KB", totals.mram_kb),
        format!("{}KB", totals.total_kb()),
    ]);
    nodes.row([
        String::new(),
        String::new(),
        mb(totals.sram_kb),
        mb(totals.flash_kb),
        mb(totals.mram_kb),
        mb(totals.total_kb()),
    ]);
    report
        .section("NODE MEMORY SPECIFICATIONS")
        .table(nodes)
        .text("")
        .text(format!("Aggregate raw data rate: {} bit/s", totals.data_rate_bps));

    let mut map = Table::new(&[
        ("Addr Range", 22),
        ("Node", 16),
        ("Memory Type", 16),
        ("Size", 0),
    ]);
    for c in &NODE_CLASSES {
        for id in 0..c.count {
            let id = u8::try_from(id).unwrap_or(u8::MAX);
            let (start, end) = MeshAddress::window(c.type_code, id)?;
            map.row([
                format!("{}-{}", start, end),
                format!("{}[{}]", c.name, id),
                c.memory_kinds().to_string(),
                kb_label(c.per_node_kb()),
            ]);
        }
    }
    report
        .section("DISTRIBUTED MEMORY MAP")
        .text("Address Format: [NodeType:4][NodeID:4][LocalAddr:16]")
        .text(format!(
            "Each node exposes a {} KB window; larger stores are banked behind it.",
            address::LOCAL_WINDOW / 1024
        ))
        .text("")
        .table(map);

    let mut flow = Table::new(&[("Stage", 14), ("Node", 14), ("Operation", 40), ("Size", 0)]);
    for (stage, node, op, size) in PIPELINE {
        flow.row([stage, node, op, size]);
    }
    report.section("DATA FLOW: SENSOR → COMPUTE → MESH → OUT").table(flow);

    let mut energy = Table::new(&[
        ("Operation", 18),
        ("Energy/bit (fJ)", 18),
        ("bits/μJ", 14),
        ("Note", 0),
    ]);
    for (name, fj, note) in ENERGY_PER_BIT {
        energy.row([
            name.to_string(),
            format!("{}", fj),
            format!("{:.0}", bits_per_microjoule(fj)?),
            note.to_string(),
        ]);
    }
    let sram = affordable_bit_rate(HARVEST_BUDGET_UW, 5.0)?;
    let flash = affordable_bit_rate(HARVEST_BUDGET_UW, 50.0)?;
    let ble = affordable_bit_rate(HARVEST_BUDGET_UW, 50_000.0)?;
    report
        .section("ENERGY-MEMORY EQUIVALENCE")
        .table(energy)
        .text("")
        .text(format!("With {} μW harvest budget:", HARVEST_BUDGET_UW))
        .text(format!("  SRAM ops/sec:    {:.2e} bits/s = {:.0} MB/s", sram, sram / 8.0 / 1e6))
        .text(format!("  Flash reads/sec: {:.2e} bits/s = {:.0} MB/s", flash, flash / 8.0 / 1e6))
        .text(format!("  BLE bits/sec:    {:.2e} bits/s = {:.0} kbps", ble, ble / 1e3))
        .text("")
        .text("Energy constrains radio bandwidth, not compute: memory access is cheap,")
        .text("communication is expensive, so process locally and report compressed.");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fleet_totals() {
        let totals = fleet_totals(&NODE_CLASSES);
        assert_eq!(totals.nodes, 24);
        assert_eq!(totals.sram_kb, 2112);
        assert_eq!(totals.flash_kb, 13824);
        assert_eq!(totals.mram_kb, 8192);
        assert_eq!(totals.total_kb(), 24128);
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(kb_label(NODE_CLASSES[0].per_node_kb()), "576KB");
        assert_eq!(kb_label(NODE_CLASSES[1].per_node_kb()), "6.25MB");
    }

    #[test]
    fn test_ble_bandwidth_from_harvest() {
        // 200 µW / 50 000 fJ per bit = 4 Mbit/s
        assert_relative_eq!(affordable_bit_rate(200.0, 50_000.0).unwrap(), 4.0e6, max_relative = 1e-12);
        assert_relative_eq!(bits_per_microjoule(5.0).unwrap(), 2e8);
        assert!(bits_per_microjoule(0.0).is_err());
    }

    #[test]
    fn test_address_map_covers_every_node() {
        let report = report().unwrap();
        let map = report
            .find_section("DISTRIBUTED MEMORY MAP")
            .and_then(|s| s.tables().next())
            .unwrap();
        assert_eq!(map.len(), 24);
        assert_eq!(map.rows[12][0], "0x10_0000-0x10_FFFF");
        assert_eq!(map.rows[12][1], "ComputeNode[0]");
    }
}
