//! Obstacle schedule loading
//!
//! The schedule is CSV text: a header line, then one row per pipe with
//! `gap_y,gap_height,time` where the gap fields are normalized to the
//! viewport height and time is in seconds. Rows that cannot be read are
//! skipped, never reported.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One pipe waiting to come due
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Milliseconds from simulation start
    pub appear_ms: f64,
    /// Gap midpoint (pixels from the ceiling)
    pub gap_y: f32,
    /// Gap height (pixels)
    pub gap_height: f32,
}

/// Parsed schedule, in source order (not necessarily chronological)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub items: Vec<ScheduleItem>,
}

impl Schedule {
    /// Parse schedule text, scaling gap fields by `canvas_height`
    pub fn parse(text: &str, canvas_height: f32) -> Self {
        let items: Vec<ScheduleItem> = text
            .lines()
            .skip(1)
            .enumerate()
            .filter_map(|(i, line)| {
                let item = parse_row(line, canvas_height);
                if item.is_none() {
                    log::debug!("Dropping schedule row {}: {:?}", i + 2, line);
                }
                item
            })
            .collect();

        log::info!("Schedule loaded: {} pipes", items.len());
        Self { items }
    }

    /// Read and parse a schedule file
    pub fn load(path: &Path, canvas_height: f32) -> Result<Self, ScheduleError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text, canvas_height))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appear time of the latest pipe (0 for an empty schedule)
    pub fn last_appear_ms(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.appear_ms)
            .fold(0.0, f64::max)
    }
}

fn parse_row(line: &str, canvas_height: f32) -> Option<ScheduleItem> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }

    // The float parser accepts NaN and inf; those rows are unreadable too
    let gap_y = fields[0].parse::<f32>().ok().filter(|v| v.is_finite())?;
    let gap_height = fields[1].parse::<f32>().ok().filter(|v| v.is_finite())?;
    let time_secs = fields[2].parse::<f64>().ok().filter(|v| v.is_finite())?;

    Some(ScheduleItem {
        appear_ms: time_secs * 1000.0,
        gap_y: gap_y * canvas_height,
        gap_height: gap_height * canvas_height,
    })
}
