//! The forecast engine.
//!
//! [`recompute`] is a pure function of the overview cost series and window
//! bounds: given the same cache state it always produces the same derived
//! columns, which is what makes it safe to re-derive the whole set after
//! every edit instead of patching incrementally. Windows are capped around
//! 24 months, so the O(window) recompute per edit is cheap.

use std::collections::HashMap;

use pence_domain::{format_pence_abbrev, Category, YearMonth};

use crate::overview::OverviewData;

/// Largest value per visible column, used only for colour intensity
/// scaling. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMaxima {
    pub income: i64,
    pub out: i64,
    pub predicted: i64,
}

/// Columns derived from the overview cache. Not server-stored; recomputed
/// in full whenever any series changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedOverview {
    /// Effective per-category series: actuals up to and including the
    /// present index, with lumpy categories' future months replaced by a
    /// single forecast average.
    pub series: HashMap<Category, Vec<i64>>,
    /// Total spend per month, summed over the spending categories.
    pub out: Vec<i64>,
    /// Recorded balance up to the present, then a running forecast of
    /// `previous + income - out`.
    pub predicted: Vec<i64>,
    pub present_index: usize,
    pub maxima: ColumnMaxima,
}

/// Derives all overview columns from the loaded cache state.
pub fn recompute(data: &OverviewData) -> DerivedOverview {
    let len = data.len();
    let present = data.present_index();

    // Forecast substitution: lumpy categories get a single representative
    // median of their actuals in every strictly-future month, so one large
    // one-off doesn't distort the running forecast. The present month is
    // always treated as actual, even part-way through.
    let mut series: HashMap<Category, Vec<i64>> = HashMap::new();
    for category in Category::ALL {
        let mut values = data.series(category).to_vec();
        if Category::LUMPY.contains(&category) {
            let forecast = median(&values[..=present]);
            for value in values.iter_mut().skip(present + 1) {
                *value = forecast;
            }
        }
        series.insert(category, values);
    }

    let mut out = vec![0i64; len];
    for category in Category::SPENDING {
        for (j, value) in series[&category].iter().enumerate() {
            out[j] += value;
        }
    }

    let income = &series[&Category::Income];
    let balance = data.balance();
    let mut predicted = vec![0i64; len];
    for j in 0..len {
        if j > present {
            predicted[j] = predicted[j - 1] + income[j] - out[j];
        } else {
            predicted[j] = balance[j];
        }
    }

    let maxima = ColumnMaxima {
        income: max_value(income),
        out: max_value(&out),
        predicted: max_value(&predicted),
    };

    DerivedOverview {
        series,
        out,
        predicted,
        present_index: present,
        maxima,
    }
}

/// Rounded median of a slice; the average of the two middle values when the
/// length is even. Zero for an empty slice.
pub fn median(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    if sorted.len() % 2 == 1 {
        sorted[(sorted.len() - 1) / 2]
    } else {
        let key = sorted.len() / 2 - 1;
        (sorted[key] + sorted[key + 1]) / 2
    }
}

fn max_value(values: &[i64]) -> i64 {
    values.iter().fold(0, |max, v| max.max(*v))
}

/// Whether a month is behind, at, or ahead of the current calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStatus {
    Past,
    Present,
    Future,
}

pub fn month_status(current: YearMonth, month: YearMonth) -> MonthStatus {
    if month.is_equal(current) {
        MonthStatus::Present
    } else if month.is_after(current) {
        MonthStatus::Future
    } else {
        MonthStatus::Past
    }
}

/// One rendered cell: the raw value, its abbreviated text, and its colour
/// intensity relative to the column maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCell {
    pub pence: i64,
    pub text: String,
    pub score: f64,
}

fn cell(pence: i64, max: i64) -> OverviewCell {
    let score = if max > 0 {
        pence as f64 / max as f64
    } else {
        0.0
    };
    OverviewCell {
        pence,
        text: format_pence_abbrev(pence),
        score,
    }
}

/// One month of the overview table.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewRow {
    pub month: YearMonth,
    pub label: String,
    pub status: MonthStatus,
    pub income: OverviewCell,
    pub out: OverviewCell,
    pub predicted: OverviewCell,
}

/// Projects the derived columns into display rows, keeping `old_months`
/// past months visible. The offset only trims rendered rows; forecasts and
/// maxima are always computed over the full window.
pub fn rows(data: &OverviewData, derived: &DerivedOverview, old_months: usize) -> Vec<OverviewRow> {
    let len = data.len();
    let present = derived.present_index as i64;
    let old_months = old_months as i64;

    let start_offset = (24 - old_months)
        .min(present - old_months + 1)
        .clamp(0, len as i64) as usize;

    let income = &derived.series[&Category::Income];
    (start_offset..len)
        .map(|j| {
            let month = data.month_at(j);
            OverviewRow {
                month,
                label: month.short_label(),
                status: month_status(data.current(), month),
                income: cell(income[j], derived.maxima.income),
                out: cell(derived.out[j], derived.maxima.out),
                predicted: cell(derived.predicted[j], derived.maxima.predicted),
            }
        })
        .collect()
}
