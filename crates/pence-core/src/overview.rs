//! The overview cache: per-category monthly cost series over a contiguous
//! month window, plus the per-month balance series.

use std::collections::HashMap;

use pence_domain::{Category, YearMonth};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Bulk overview data as produced by a sync, before normalisation.
#[derive(Debug, Clone, Default)]
pub struct OverviewSnapshot {
    pub cost: HashMap<Category, Vec<i64>>,
    pub balance: Vec<i64>,
    pub start: YearMonth,
    pub end: YearMonth,
    pub current: YearMonth,
}

/// Normalised overview state: every series is exactly window length, index
/// `j` in every series is the month `start + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    cost: HashMap<Category, Vec<i64>>,
    balance: Vec<i64>,
    start: YearMonth,
    end: YearMonth,
    current: YearMonth,
}

impl OverviewData {
    /// Number of months in the window.
    pub fn len(&self) -> usize {
        (self.end.month_index(self.start) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    pub fn current(&self) -> YearMonth {
        self.current
    }

    /// Index of the present month, clamped into the window. When `current`
    /// falls before the window the first index acts as the present; when it
    /// falls after, the last index does, so every month reads as actual.
    pub fn present_index(&self) -> usize {
        let raw = self.current.month_index(self.start);
        raw.clamp(0, self.len() as i64 - 1) as usize
    }

    /// Monthly costs for a category. Categories never seen in a sync read
    /// as all zero.
    pub fn series(&self, category: Category) -> &[i64] {
        self.cost
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY)
    }

    pub fn balance(&self) -> &[i64] {
        &self.balance
    }

    /// Calendar month at a window index.
    pub fn month_at(&self, index: usize) -> YearMonth {
        let mut ym = self.start;
        for _ in 0..index {
            ym = ym.next();
        }
        ym
    }
}

static EMPTY: &[i64] = &[];

/// Holder for the overview state machine: `Empty` until a bulk load, then
/// `Loaded` until an explicit [`clear`](OverviewCache::clear).
///
/// Writes come only from the sync and reconciliation layers; the forecast
/// engine reads this cache and derives from it, never mutating it.
#[derive(Debug, Clone, Default)]
pub struct OverviewCache {
    data: Option<OverviewData>,
}

impl OverviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all overview state from a sync snapshot. Every series is
    /// zero-filled or truncated to the window length, so short or missing
    /// data never fails, it just reads as zero.
    pub fn load(&mut self, snapshot: OverviewSnapshot) -> Result<()> {
        if snapshot.start.is_after(snapshot.end) {
            return Err(CoreError::InvalidInput(format!(
                "window end {} precedes start {}",
                snapshot.end, snapshot.start
            )));
        }
        let len = (snapshot.end.month_index(snapshot.start) + 1) as usize;

        let mut cost = snapshot.cost;
        for series in cost.values_mut() {
            series.resize(len, 0);
        }
        for category in Category::ALL {
            cost.entry(category).or_insert_with(|| vec![0; len]);
        }
        let mut balance = snapshot.balance;
        balance.resize(len, 0);

        self.data = Some(OverviewData {
            cost,
            balance,
            start: snapshot.start,
            end: snapshot.end,
            current: snapshot.current,
        });
        Ok(())
    }

    /// Drops all overview state, returning to `Empty` for a forced reload.
    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Result<&OverviewData> {
        self.data.as_ref().ok_or(CoreError::NotLoaded)
    }

    /// Moves a line item's contribution between months: subtracts the old
    /// cost at the old month's index and adds the new cost at the new
    /// month's. A month outside the window is silently skipped for that
    /// side, since the edit is attributed to a month the sync never covered.
    pub fn reconcile(
        &mut self,
        category: Category,
        old_month: YearMonth,
        old_cost: i64,
        new_month: YearMonth,
        new_cost: i64,
    ) -> Result<()> {
        let data = self.data.as_mut().ok_or(CoreError::NotLoaded)?;
        let len = data.len() as i64;
        let start = data.start;
        let series = data.cost.entry(category).or_insert_with(|| vec![0; len as usize]);

        for (month, delta) in [(old_month, -old_cost), (new_month, new_cost)] {
            let index = month.month_index(start);
            if (0..len).contains(&index) {
                series[index as usize] += delta;
            } else {
                debug!(%category, %month, delta, "adjustment outside window, skipped");
            }
        }
        Ok(())
    }

    /// Overwrites the recorded balance for one month. Used by the overview
    /// screen's per-month balance edit.
    pub fn set_balance(&mut self, month: YearMonth, pence: i64) -> Result<()> {
        let data = self.data.as_mut().ok_or(CoreError::NotLoaded)?;
        let index = month.month_index(data.start);
        if !(0..data.len() as i64).contains(&index) {
            return Err(CoreError::InvalidInput(format!(
                "month {month} outside the overview window"
            )));
        }
        data.balance[index as usize] = pence;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> OverviewSnapshot {
        let mut cost = HashMap::new();
        cost.insert(Category::Food, vec![100, 200, 300]);
        cost.insert(Category::Income, vec![1000]); // short, zero-filled
        OverviewSnapshot {
            cost,
            balance: vec![500, 600, 700],
            start: YearMonth::new(2024, 1),
            end: YearMonth::new(2024, 3),
            current: YearMonth::new(2024, 2),
        }
    }

    #[test]
    fn load_normalises_series_lengths() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();

        let data = cache.data().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.series(Category::Income), &[1000, 0, 0]);
        assert_eq!(data.series(Category::Social), &[0, 0, 0]);
        assert_eq!(data.present_index(), 1);
    }

    #[test]
    fn load_rejects_inverted_window() {
        let mut cache = OverviewCache::new();
        let mut snap = snapshot();
        snap.start = YearMonth::new(2025, 1);
        assert!(cache.load(snap).is_err());
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();
        cache.clear();
        assert!(!cache.is_loaded());
        assert!(matches!(cache.data(), Err(CoreError::NotLoaded)));
    }

    #[test]
    fn reconcile_moves_cost_between_months() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();

        cache
            .reconcile(
                Category::Food,
                YearMonth::new(2024, 1),
                100,
                YearMonth::new(2024, 3),
                250,
            )
            .unwrap();

        let data = cache.data().unwrap();
        assert_eq!(data.series(Category::Food), &[0, 200, 550]);
    }

    #[test]
    fn reconcile_skips_out_of_window_sides() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();

        // old month before the window: only the add applies
        cache
            .reconcile(
                Category::Food,
                YearMonth::new(2023, 6),
                100,
                YearMonth::new(2024, 2),
                50,
            )
            .unwrap();
        // new month after the window: only the subtract applies
        cache
            .reconcile(
                Category::Food,
                YearMonth::new(2024, 2),
                50,
                YearMonth::new(2025, 1),
                75,
            )
            .unwrap();

        let data = cache.data().unwrap();
        assert_eq!(data.series(Category::Food), &[100, 200, 300]);
    }

    #[test]
    fn reconcile_inverse_restores_series() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();
        let before = cache.data().unwrap().clone();

        let old = YearMonth::new(2024, 1);
        let new = YearMonth::new(2024, 2);
        cache.reconcile(Category::Food, old, 100, new, 999).unwrap();
        cache.reconcile(Category::Food, new, 999, old, 100).unwrap();

        assert_eq!(cache.data().unwrap(), &before);
    }

    #[test]
    fn present_index_clamps_outside_window() {
        let mut cache = OverviewCache::new();
        let mut snap = snapshot();
        snap.current = YearMonth::new(2030, 1);
        cache.load(snap).unwrap();
        assert_eq!(cache.data().unwrap().present_index(), 2);

        let mut snap = snapshot();
        snap.current = YearMonth::new(2020, 1);
        cache.load(snap).unwrap();
        assert_eq!(cache.data().unwrap().present_index(), 0);
    }

    #[test]
    fn set_balance_updates_one_month_only() {
        let mut cache = OverviewCache::new();
        cache.load(snapshot()).unwrap();
        cache.set_balance(YearMonth::new(2024, 2), 9999).unwrap();
        assert_eq!(cache.data().unwrap().balance(), &[500, 9999, 700]);
        assert!(cache.set_balance(YearMonth::new(2025, 2), 1).is_err());
    }
}
