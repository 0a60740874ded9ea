//! Indian Cropping Seasons
//!
//! Kharif (monsoon), Rabi (winter) and Zaid (summer). The three month ranges
//! partition the calendar year with no gap or overlap.

use chrono::{Datelike, Local};
use serde::Serialize;

use crate::error::{AdvisorError, Result};

/// Cropping season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    /// June to October
    Kharif,
    /// November to February
    Rabi,
    /// March to May
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn display_text(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }

    pub fn months_label(&self) -> &'static str {
        match self {
            Season::Kharif => "Jun – Oct",
            Season::Rabi => "Nov – Feb",
            Season::Zaid => "Mar – May",
        }
    }

    /// Member crops, in knowledge-base names
    pub fn crops(&self) -> &'static [&'static str] {
        match self {
            Season::Kharif => &["Rice", "Corn", "Cotton", "Soybean", "Sugarcane"],
            Season::Rabi => &["Wheat", "Barley", "Potato", "Onion"],
            Season::Zaid => &["Tomato", "Onion"],
        }
    }

    /// Season containing a calendar month (1 = January)
    pub fn for_month(month: u32) -> Result<Self> {
        match month {
            6..=10 => Ok(Season::Kharif),
            11 | 12 | 1 | 2 => Ok(Season::Rabi),
            3..=5 => Ok(Season::Zaid),
            _ => Err(AdvisorError::invalid(format!("month out of range: {}", month))),
        }
    }

    /// Season for today's local date
    pub fn current() -> Self {
        // Local::now().month() is always 1..=12
        Self::for_month(Local::now().month()).unwrap_or(Season::Kharif)
    }
}

/// Seasons in which a crop is grown (Onion appears in two)
pub fn seasons_for_crop(name: &str) -> Vec<Season> {
    Season::ALL
        .into_iter()
        .filter(|s| s.crops().contains(&name))
        .collect()
}
