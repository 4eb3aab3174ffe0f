//! Plain data row written by output backends.

use seirs_agent::StatusCounts;
use seirs_core::Day;
use seirs_sim::DailyRecord;
use serde::{Deserialize, Serialize};

/// One line of a replication file.  Field names are the column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentRow {
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "S")]
    pub s:   u32,
    #[serde(rename = "E")]
    pub e:   u32,
    #[serde(rename = "I")]
    pub i:   u32,
    #[serde(rename = "R")]
    pub r:   u32,
}

impl CompartmentRow {
    pub const HEADER: [&'static str; 5] = ["Day", "S", "E", "I", "R"];
}

impl From<&DailyRecord> for CompartmentRow {
    fn from(record: &DailyRecord) -> Self {
        let (day, s, e, i, r) = record.as_row();
        Self { day, s, e, i, r }
    }
}

impl From<CompartmentRow> for DailyRecord {
    fn from(row: CompartmentRow) -> Self {
        DailyRecord {
            day:    Day(row.day),
            counts: StatusCounts {
                susceptible: row.s,
                exposed:     row.e,
                infectious:  row.i,
                recovered:   row.r,
            },
        }
    }
}
