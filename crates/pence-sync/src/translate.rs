//! Turns a bulk wire payload into a cache snapshot.
//!
//! Translation is all-or-nothing: any missing node or malformed value
//! aborts the whole sync before the caller touches its caches, so a bad
//! payload can never leave them half-updated.

use std::collections::HashMap;

use pence_core::{OverviewSnapshot, SyncSnapshot};
use pence_domain::{Category, ItemAttrs, ItemId, LineItem, YearMonth, Ymd};
use tracing::debug;

use crate::dto::{BulkData, ItemDto};
use crate::error::SyncError;

pub fn translate(payload: BulkData) -> Result<SyncSnapshot, SyncError> {
    let overview = translate_overview(&payload)?;

    let mut pages = HashMap::new();
    for category in Category::ALL {
        let page = payload.pages.get(category.name()).ok_or_else(|| {
            SyncError::MalformedResponse(format!("missing page node: {category}"))
        })?;

        let mut items = Vec::with_capacity(page.data.len());
        for dto in &page.data {
            items.push(translate_item(category, dto)?);
        }
        pages.insert(category, items);
    }

    debug!(
        months = overview.balance.len().max(overview.cost.values().map(Vec::len).max().unwrap_or(0)),
        pages = pages.len(),
        "bulk payload translated"
    );
    Ok(SyncSnapshot { overview, pages })
}

fn translate_overview(payload: &BulkData) -> Result<OverviewSnapshot, SyncError> {
    let dto = &payload.overview;
    let start = year_month(&dto.start_year_month, "startYearMonth")?;
    let end = year_month(&dto.end_year_month, "endYearMonth")?;
    let current = YearMonth::new(dto.current_year, dto.current_month);
    check_month(current.month, "currentMonth")?;

    let mut cost = HashMap::new();
    let mut balance = Vec::new();
    for (name, series) in &dto.cost {
        if name == "balance" {
            balance = series.clone();
        } else if let Ok(category) = name.parse::<Category>() {
            cost.insert(category, series.clone());
        } else {
            // a series we don't chart; ignore rather than fail the sync
            debug!(name, "ignoring unknown overview series");
        }
    }

    Ok(OverviewSnapshot {
        cost,
        balance,
        start,
        end,
        current,
    })
}

fn translate_item(category: Category, dto: &ItemDto) -> Result<LineItem, SyncError> {
    if dto.d.len() != 3 {
        return Err(SyncError::MalformedResponse(format!(
            "item {} in {category}: bad date triple",
            dto.id
        )));
    }
    let date = Ymd::new(dto.d[0] as i32, dto.d[1] as u32, dto.d[2] as u32).map_err(|err| {
        SyncError::MalformedResponse(format!("item {} in {category}: {err}", dto.id))
    })?;

    let attrs = match category {
        Category::Food | Category::General => ItemAttrs::Consumable {
            category: dto.k.clone().unwrap_or_default(),
            shop: dto.s.clone().unwrap_or_default(),
        },
        Category::Holiday => ItemAttrs::Holiday {
            holiday: dto.h.clone().unwrap_or_default(),
            shop: dto.s.clone().unwrap_or_default(),
        },
        Category::Social => ItemAttrs::Social {
            shop: dto.s.clone().unwrap_or_default(),
        },
        Category::Funds => ItemAttrs::Funds {
            units: dto
                .tr
                .as_ref()
                .map(|txns| txns.iter().map(|t| t.units).sum())
                .unwrap_or(0.0),
            latest_price: dto.pr.as_ref().and_then(|prices| prices.last().copied()),
        },
        Category::Income | Category::Bills => ItemAttrs::Plain,
    };

    Ok(LineItem::new(
        ItemId(dto.id),
        date,
        dto.i.clone(),
        dto.c,
        attrs,
    ))
}

fn year_month(values: &[i64], key: &str) -> Result<YearMonth, SyncError> {
    if values.len() < 2 {
        return Err(SyncError::MalformedResponse(format!("{key}: expected [year, month]")));
    }
    let ym = YearMonth::new(values[0] as i32, values[1] as u32);
    check_month(ym.month, key)?;
    Ok(ym)
}

fn check_month(month: u32, key: &str) -> Result<(), SyncError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(SyncError::MalformedResponse(format!(
            "{key}: month {month} out of range"
        )))
    }
}
