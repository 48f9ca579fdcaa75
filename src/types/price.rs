//! Price rows, the date-keyed index, and return classification

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day's prices as served by the backend.
///
/// No row for a date means the market was closed. High/low/volume are
/// nullable pass-throughs; only open/close feed the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Calendar date (ISO "YYYY-MM-DD" on the wire)
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl PriceRow {
    /// Percentage change for the day, or `None` when the row cannot yield
    /// one (`open <= 0` guards divide-by-zero and junk prices).
    pub fn pct_change(&self) -> Option<f64> {
        if self.open <= 0.0 {
            return None;
        }
        Some((self.close - self.open) / self.open * 100.0)
    }

    /// Display label for the change: signed percentage or "Market Closed"
    pub fn pct_label(&self) -> String {
        format_pct(self.pct_change())
    }
}

/// Signed percentage label used by the tooltip and report output
pub fn format_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p > 0.0 => format!("+{:.2}%", p),
        Some(p) => format!("{:.2}%", p),
        None => "Market Closed".to_string(),
    }
}

/// Date-keyed lookup over one fetch result.
///
/// Rebuilt wholesale whenever the (symbol, year) selection changes; lookup
/// is O(1) and the last row wins on duplicate dates.
#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    by_date: HashMap<NaiveDate, PriceRow>,
}

impl PriceIndex {
    /// Index a fetch result by date
    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        let mut by_date = HashMap::with_capacity(rows.len());
        for row in rows {
            by_date.insert(row.date, row);
        }
        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PriceRow> {
        self.by_date.get(&date)
    }

    /// Classify the return for a date; absent rows yield [`ChangeBucket::NoData`]
    pub fn bucket_for(&self, date: NaiveDate) -> ChangeBucket {
        ChangeBucket::from_pct(self.get(date).and_then(PriceRow::pct_change))
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Discrete return bucket for a day cell.
///
/// Seven legend steps plus an out-of-band no-data class. `SoftLoss` is the
/// classifier's fallthrough and absorbs `(-1, 0]` including exactly 0, so
/// its label reads "<= 0%" rather than the strict "< 0%". `Flat` is the
/// neutral/closed step of the legend scale; the classifier never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeBucket {
    /// pct <= -3
    StrongLoss,
    /// pct <= -1
    Loss,
    /// -1 < pct <= 0 (fallthrough, includes unchanged days)
    SoftLoss,
    /// Neutral/closed legend step (not produced by classification)
    Flat,
    /// 0 < pct < 1
    SoftGain,
    /// pct >= 1
    Gain,
    /// pct >= 3
    StrongGain,
    /// No row for the date, or open <= 0
    NoData,
}

impl ChangeBucket {
    /// Map a percentage change to its bucket.
    ///
    /// Total over all f64 values and the no-data sentinel. Order matters:
    /// ties at exact boundaries resolve to the higher-magnitude bucket
    /// (3.0 is StrongGain, -1.0 is Loss). NaN fails every comparison and
    /// lands in the fallthrough.
    pub fn from_pct(pct: Option<f64>) -> Self {
        let Some(p) = pct else {
            return Self::NoData;
        };
        if p >= 3.0 {
            Self::StrongGain
        } else if p >= 1.0 {
            Self::Gain
        } else if p > 0.0 {
            Self::SoftGain
        } else if p <= -3.0 {
            Self::StrongLoss
        } else if p <= -1.0 {
            Self::Loss
        } else {
            Self::SoftLoss
        }
    }

    /// The seven legend steps in display order (losses to gains)
    pub fn scale() -> [ChangeBucket; 7] {
        [
            Self::StrongLoss,
            Self::Loss,
            Self::SoftLoss,
            Self::Flat,
            Self::SoftGain,
            Self::Gain,
            Self::StrongGain,
        ]
    }

    /// Legend label for this bucket
    pub fn label(self) -> &'static str {
        match self {
            Self::StrongLoss => "≤ -3%",
            Self::Loss => "-1%",
            Self::SoftLoss => "≤ 0%",
            Self::Flat => "0%",
            Self::SoftGain => "> 0%",
            Self::Gain => "+1%",
            Self::StrongGain => "≥ +3%",
            Self::NoData => "n/a",
        }
    }
}
