#![cfg(feature = "std")]

//! Best completion times per game mode, kept in a small JSON document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::GameMode;

/// Default location of the records document.
pub const DEFAULT_RECORDS_FILE: &str = "battleship_records.json";

/// Best time for one mode. All fields are empty until a game is won.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Wall-clock seconds from the end of fleet placement to the winning
    /// shot, pauses between computer shots included.
    pub time: Option<f64>,
    /// `DD.MM.YYYY`.
    pub date: Option<String>,
    pub player_name: Option<String>,
}

/// The whole document, one entry per mode key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub vs_computer: Record,
    #[serde(default)]
    pub vs_player: Record,
}

impl Records {
    pub fn get(&self, mode: GameMode) -> &Record {
        match mode {
            GameMode::VsComputer => &self.vs_computer,
            GameMode::VsPlayer => &self.vs_player,
        }
    }

    fn get_mut(&mut self, mode: GameMode) -> &mut Record {
        match mode {
            GameMode::VsComputer => &mut self.vs_computer,
            GameMode::VsPlayer => &mut self.vs_player,
        }
    }
}

/// Records bound to the file they are loaded from and saved to.
#[derive(Debug, Clone)]
pub struct RecordBook {
    path: PathBuf,
    records: Records,
}

impl RecordBook {
    /// Load records from `path`. A missing or unreadable file yields empty
    /// records.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match Self::read(&path) {
            Ok(Some(records)) => records,
            Ok(None) => Records::default(),
            Err(e) => {
                warn!("ignoring records file {}: {:#}", path.display(), e);
                Records::default()
            }
        };
        Self { path, records }
    }

    fn read(path: &Path) -> anyhow::Result<Option<Records>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let records = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(records))
    }

    /// Write the records back as pretty-printed JSON.
    pub fn save(&self) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn get(&self, mode: GameMode) -> &Record {
        self.records.get(mode)
    }

    /// Store `seconds` as the new record for `mode` if there is none yet or
    /// it beats the current one, then save. Returns whether it was stored.
    pub fn check_and_update(
        &mut self,
        mode: GameMode,
        seconds: f64,
        player_name: &str,
        date: &str,
    ) -> anyhow::Result<bool> {
        let current = self.records.get(mode);
        if current.time.is_some_and(|best| seconds >= best) {
            return Ok(false);
        }
        *self.records.get_mut(mode) = Record {
            time: Some(seconds),
            date: Some(date.to_string()),
            player_name: Some(player_name.to_string()),
        };
        info!(
            "new {} record: {} by {}",
            mode.record_key(),
            format_duration(seconds),
            player_name
        );
        self.save()?;
        Ok(true)
    }

    /// One-line description of the record, or `None` when there is none.
    pub fn record_text(&self, mode: GameMode) -> Option<String> {
        let record = self.get(mode);
        let time = record.time?;
        let label = match mode {
            GameMode::VsComputer => "vs computer",
            GameMode::VsPlayer => "two players",
        };
        Some(format!(
            "Record {}: {} - {} ({})",
            label,
            format_duration(time),
            record.player_name.as_deref().unwrap_or("?"),
            record.date.as_deref().unwrap_or("?"),
        ))
    }
}

/// `M:SS`, seconds truncated.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Today's date as `DD.MM.YYYY`.
///
/// The date is taken in UTC, so a game won shortly after local midnight can
/// be stored under the previous or next day.
pub fn today() -> String {
    let days = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() / 86_400)
        .unwrap_or(0);
    let (year, month, day) = civil_from_days(days as i64);
    format!("{:02}.{:02}.{}", day, month, year)
}

/// Proleptic Gregorian date for a count of days since 1970-01-01.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
