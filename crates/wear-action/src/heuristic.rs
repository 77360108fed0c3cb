//! Static harvesting durations by tool class, with a CSV loader.
//!
//! # CSV format
//!
//! One row per designation.  `none` sets the duration for targets without
//! a designation (only `matching_ticks` is read for it).
//!
//! ```csv
//! designation,matching_ticks,other_ticks
//! pickaxe,16,32
//! shovel,10,20
//! axe,12,24
//! hoe,8,16
//! none,12,12
//! ```
//!
//! Classes absent from the file keep their built-in defaults.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wear_core::{Category, TargetInfo, ToolClass};

use crate::ActionError;

const DEFAULT_UNDESIGNATED_TICKS: u64 = 12;

// ── HeuristicTable ────────────────────────────────────────────────────────────

/// Ticks per designation: `(designated tool, any other tool)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicTable {
    by_class:     HashMap<ToolClass, (u64, u64)>,
    undesignated: u64,
}

impl Default for HeuristicTable {
    fn default() -> Self {
        let by_class = HashMap::from([
            (ToolClass::Pickaxe, (16, 32)),
            (ToolClass::Shovel, (10, 20)),
            (ToolClass::Axe, (12, 24)),
            (ToolClass::Hoe, (8, 16)),
        ]);
        Self { by_class, undesignated: DEFAULT_UNDESIGNATED_TICKS }
    }
}

impl HeuristicTable {
    pub fn set(&mut self, class: ToolClass, matching: u64, other: u64) {
        self.by_class.insert(class, (matching.max(1), other.max(1)));
    }

    pub fn set_undesignated(&mut self, ticks: u64) {
        self.undesignated = ticks.max(1);
    }

    pub fn undesignated_ticks(&self) -> u64 {
        self.undesignated
    }

    /// Ticks to work `target` with `tool`.
    pub fn ticks(&self, target: &TargetInfo, tool: &Category) -> u64 {
        let Some(class) = target.designation else {
            return self.undesignated;
        };
        match self.by_class.get(&class) {
            Some(&(matching, _)) if class.fits(tool) => matching,
            Some(&(_, other)) => other,
            None => self.undesignated,
        }
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HeuristicRecord {
    designation:    String,
    matching_ticks: u64,
    #[serde(default)]
    other_ticks:    Option<u64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a heuristic table from a CSV file over the built-in defaults.
pub fn load_heuristic_csv(path: &Path) -> Result<HeuristicTable, ActionError> {
    let file = std::fs::File::open(path).map_err(ActionError::Io)?;
    load_heuristic_reader(file)
}

/// Like [`load_heuristic_csv`] but accepts any `Read` source.
pub fn load_heuristic_reader<R: Read>(reader: R) -> Result<HeuristicTable, ActionError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = HeuristicTable::default();

    for result in csv_reader.deserialize::<HeuristicRecord>() {
        let row = result.map_err(|e| ActionError::Parse(e.to_string()))?;
        match parse_designation(&row.designation)? {
            None => table.set_undesignated(row.matching_ticks),
            Some(class) => {
                let other = row.other_ticks.ok_or_else(|| {
                    ActionError::Parse(format!("designation {class} needs other_ticks"))
                })?;
                table.set(class, row.matching_ticks, other);
            }
        }
    }

    Ok(table)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_designation(s: &str) -> Result<Option<ToolClass>, ActionError> {
    match s.trim() {
        "none" | "" => Ok(None),
        other => other
            .parse::<ToolClass>()
            .map(Some)
            .map_err(|e| ActionError::Parse(e.to_string())),
    }
}
