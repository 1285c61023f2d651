//! End-to-end cache behaviour: bulk load, form submissions through the
//! reconciler, and the forecast columns the overview derives from them.

use std::cell::Cell;
use std::collections::HashMap;

use pence_core::{
    recompute, Caches, CoreError, FormValues, ItemPayload, Outcome, OverviewSnapshot, Reconciler,
    RemoteStore, SyncSnapshot,
};
use pence_domain::{Category, ItemAttrs, ItemId, LineItem, YearMonth, Ymd};

struct FakeRemote {
    next_id: Cell<i64>,
    creates: Cell<usize>,
    updates: Cell<usize>,
    fail: bool,
    snapshot: Option<SyncSnapshot>,
}

impl FakeRemote {
    fn new() -> Self {
        Self {
            next_id: Cell::new(100),
            creates: Cell::new(0),
            updates: Cell::new(0),
            fail: false,
            snapshot: None,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl RemoteStore for FakeRemote {
    fn fetch_all(&self) -> Result<SyncSnapshot, CoreError> {
        self.snapshot
            .clone()
            .ok_or_else(|| CoreError::Transport("no snapshot configured".into()))
    }

    fn create_item(&self, _category: Category, _item: &ItemPayload) -> Result<ItemId, CoreError> {
        if self.fail {
            return Err(CoreError::Transport("connection refused".into()));
        }
        self.creates.set(self.creates.get() + 1);
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ok(ItemId(id))
    }

    fn update_item(
        &self,
        _category: Category,
        _id: ItemId,
        _item: &ItemPayload,
    ) -> Result<(), CoreError> {
        if self.fail {
            return Err(CoreError::Transport("connection refused".into()));
        }
        self.updates.set(self.updates.get() + 1);
        Ok(())
    }
}

/// Three-month window (2024-01..2024-03, present 2024-02) with one food
/// item already cached.
fn loaded_caches() -> Caches {
    let mut cost = HashMap::new();
    cost.insert(Category::Food, vec![100, 150, 0]);
    cost.insert(Category::Income, vec![2000, 2000, 0]);

    let mut pages = HashMap::new();
    pages.insert(
        Category::Food,
        vec![LineItem::new(
            ItemId(1),
            Ymd::new(2024, 2, 10).unwrap(),
            "Groceries",
            150,
            ItemAttrs::Consumable {
                category: "Food".into(),
                shop: "Tesco".into(),
            },
        )],
    );

    let mut caches = Caches::new();
    caches
        .load(SyncSnapshot {
            overview: OverviewSnapshot {
                cost,
                balance: vec![5000, 5100, 0],
                start: YearMonth::new(2024, 1),
                end: YearMonth::new(2024, 3),
                current: YearMonth::new(2024, 2),
            },
            pages,
        })
        .unwrap();
    caches
}

fn food_submission(date: &str, cost: &str) -> FormValues {
    let mut values = FormValues::new();
    values
        .set("date", date)
        .set("item", "Groceries")
        .set("cost", cost)
        .set("category", "Food")
        .set("shop", "Tesco");
    values
}

#[test]
fn adding_an_item_adjusts_exactly_one_month() {
    let mut caches = loaded_caches();
    let remote = FakeRemote::new();
    let mut reconciler = Reconciler::new(&mut caches, &remote);

    let outcome = reconciler
        .submit(Category::Food, None, &food_submission("2024-01-05", "15.00"))
        .unwrap();

    let Outcome::Applied { id, .. } = outcome else {
        panic!("expected an applied outcome");
    };
    assert_eq!(id, ItemId(100));
    assert_eq!(remote.creates.get(), 1);

    let data = caches.overview.data().unwrap();
    assert_eq!(data.series(Category::Food), &[1600, 150, 0]);
    assert_eq!(data.series(Category::Income), &[2000, 2000, 0]);
    assert_eq!(caches.page(Category::Food).unwrap().len(), 2);
}

#[test]
fn editing_a_date_out_of_window_drops_the_contribution() {
    let mut caches = loaded_caches();
    let remote = FakeRemote::new();
    let mut reconciler = Reconciler::new(&mut caches, &remote);

    let outcome = reconciler
        .submit(
            Category::Food,
            Some(0),
            &food_submission("2025-06-10", "1.50"),
        )
        .unwrap();
    assert!(matches!(outcome, Outcome::Applied { .. }));
    assert_eq!(remote.updates.get(), 1);

    // the old month loses the old cost; the new month is outside the
    // window so the add is skipped rather than raising
    let data = caches.overview.data().unwrap();
    assert_eq!(data.series(Category::Food), &[100, 0, 0]);

    let item = caches.page(Category::Food).unwrap().get(0).unwrap();
    assert_eq!(item.date, Ymd::new(2025, 6, 10).unwrap());
}

#[test]
fn unchanged_submission_is_a_pure_no_op() {
    let mut caches = loaded_caches();
    let prefilled =
        pence_core::values_from_item(caches.page(Category::Food).unwrap().get(0).unwrap());

    let remote = FakeRemote::new();
    let mut reconciler = Reconciler::new(&mut caches, &remote);
    let outcome = reconciler
        .submit(Category::Food, Some(0), &prefilled)
        .unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(remote.creates.get(), 0);
    assert_eq!(remote.updates.get(), 0);
    assert_eq!(
        caches.overview.data().unwrap().series(Category::Food),
        &[100, 150, 0]
    );
}

#[test]
fn transport_failure_leaves_every_cache_untouched() {
    let mut caches = loaded_caches();
    let before_page = caches.page(Category::Food).unwrap().clone();
    let before_overview = caches.overview.data().unwrap().clone();

    let remote = FakeRemote::failing();
    let mut reconciler = Reconciler::new(&mut caches, &remote);
    let err = reconciler
        .submit(
            Category::Food,
            Some(0),
            &food_submission("2024-03-01", "99.00"),
        )
        .unwrap_err();

    assert!(matches!(err, CoreError::Transport(_)));
    assert_eq!(caches.page(Category::Food).unwrap(), &before_page);
    assert_eq!(caches.overview.data().unwrap(), &before_overview);
}

#[test]
fn validation_failure_precedes_the_network_call() {
    let mut caches = loaded_caches();
    let remote = FakeRemote::new();
    let mut reconciler = Reconciler::new(&mut caches, &remote);

    let err = reconciler
        .submit(Category::Food, None, &food_submission("2024-01-05", ""))
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(remote.creates.get(), 0);
}

#[test]
fn refresh_replaces_caches_and_derives_columns() {
    let mut caches = Caches::new();
    let mut remote = FakeRemote::new();

    let mut cost = HashMap::new();
    cost.insert(Category::Income, vec![1000, 1000]);
    remote.snapshot = Some(SyncSnapshot {
        overview: OverviewSnapshot {
            cost,
            balance: vec![400, 500],
            start: YearMonth::new(2024, 1),
            end: YearMonth::new(2024, 2),
            current: YearMonth::new(2024, 1),
        },
        pages: HashMap::new(),
    });

    let mut reconciler = Reconciler::new(&mut caches, &remote);
    let derived = reconciler.refresh().unwrap();

    assert_eq!(derived.predicted, vec![400, 400 + 1000]);
    assert!(caches.overview.is_loaded());
}

#[test]
fn balance_edit_feeds_the_next_recompute() {
    let mut caches = loaded_caches();
    caches
        .overview
        .set_balance(YearMonth::new(2024, 2), 7500)
        .unwrap();

    let derived = recompute(caches.overview.data().unwrap());
    assert_eq!(derived.present_index, 1);
    assert_eq!(derived.predicted[1], 7500);
    // the future month forecasts forward from the edited balance
    assert_eq!(derived.predicted[2], 7500 - derived.out[2]);
}

#[test]
fn predicted_balance_accumulates_the_forecast_month_by_month() {
    // window 2023-01..2024-06, present 2024-01 (index 12); actuals through
    // the present, nothing after
    let months = 18usize;
    let actual = |value: i64| {
        let mut series = vec![value; 13];
        series.resize(months, 0);
        series
    };

    let mut cost = HashMap::new();
    cost.insert(Category::Income, actual(2000));
    cost.insert(Category::Bills, actual(500));
    cost.insert(Category::Food, actual(300));

    let mut balance = actual(0);
    balance[12] = 5000;

    let mut caches = Caches::new();
    caches
        .load(SyncSnapshot {
            overview: OverviewSnapshot {
                cost,
                balance,
                start: YearMonth::new(2023, 1),
                end: YearMonth::new(2024, 6),
                current: YearMonth::new(2024, 1),
            },
            pages: HashMap::new(),
        })
        .unwrap();

    let derived = recompute(caches.overview.data().unwrap());
    assert_eq!(derived.present_index, 12);

    // the present month itself is never forecast
    assert_eq!(derived.predicted[12], 5000);

    // future food spending is the median of its actuals (300); bills are
    // not lumpy so their future months stay at zero; future income is zero
    let mut expected = 5000;
    for j in 13..months {
        expected += 0 - 300;
        assert_eq!(derived.predicted[j], expected, "month index {j}");
        assert_eq!(derived.out[j], 300);
    }
    assert_eq!(derived.predicted[17], 5000 - 5 * 300);
}
