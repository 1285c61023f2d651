//! Declarative add/edit form configuration.
//!
//! One generic form serves every page: each category declares its field
//! list, and submitted string values are validated and normalised into an
//! [`ItemPayload`] here. Field kinds drive the widget and the validation
//! rule, nothing else.

use std::collections::HashMap;

use pence_domain::{parse_cost, Category, ItemAttrs, LineItem, Ymd};

use crate::error::{CoreError, Result};
use crate::remote::ItemPayload;

/// How a form field is entered and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; must be non-empty.
    Text,
    /// A currency amount; normalised through [`parse_cost`].
    Cost,
    /// A calendar date; blank defaults to today.
    Date,
}

/// One field of a category's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, title: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, title, kind }
}

const CORE_FIELDS: [FieldSpec; 3] = [
    field("date", "Date", FieldKind::Date),
    field("item", "Item", FieldKind::Text),
    field("cost", "Cost", FieldKind::Cost),
];

const CONSUMABLE_FIELDS: [FieldSpec; 5] = [
    CORE_FIELDS[0],
    CORE_FIELDS[1],
    CORE_FIELDS[2],
    field("category", "Category", FieldKind::Text),
    field("shop", "Shop", FieldKind::Text),
];

const HOLIDAY_FIELDS: [FieldSpec; 5] = [
    CORE_FIELDS[0],
    CORE_FIELDS[1],
    CORE_FIELDS[2],
    field("holiday", "Holiday", FieldKind::Text),
    field("shop", "Shop", FieldKind::Text),
];

const SOCIAL_FIELDS: [FieldSpec; 4] = [
    CORE_FIELDS[0],
    CORE_FIELDS[1],
    CORE_FIELDS[2],
    field("shop", "Shop", FieldKind::Text),
];

/// The form layout for a category.
pub fn fields_for(category: Category) -> &'static [FieldSpec] {
    match category {
        Category::Food | Category::General => &CONSUMABLE_FIELDS,
        Category::Holiday => &HOLIDAY_FIELDS,
        Category::Social => &SOCIAL_FIELDS,
        Category::Funds | Category::Income | Category::Bills => &CORE_FIELDS,
    }
}

/// Raw string values keyed by field name, as collected from the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Missing fields read as empty, matching an untouched form input.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Validates submitted values against the category's field list and builds
/// the payload to send.
///
/// `prior_attrs` supplies the attributes that the form does not edit (fund
/// holdings keep their units and price across label or cost edits).
pub fn validate(
    category: Category,
    values: &FormValues,
    prior_attrs: Option<&ItemAttrs>,
) -> Result<ItemPayload> {
    let mut date = Ymd::today();
    let mut label = String::new();
    let mut cost = 0i64;

    for spec in fields_for(category) {
        let raw = values.get(spec.name);
        match spec.kind {
            FieldKind::Date => {
                date = Ymd::deserialise(raw)?;
            }
            FieldKind::Cost => {
                cost = parse_cost(raw)
                    .map_err(|_| CoreError::Validation(format!("{}: enter an amount", spec.name)))?;
            }
            FieldKind::Text => {
                if raw.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "{}: enter a value",
                        spec.name
                    )));
                }
                if spec.name == "item" {
                    label = raw.trim().to_string();
                }
            }
        }
    }

    let attrs = match category {
        Category::Food | Category::General => ItemAttrs::Consumable {
            category: values.get("category").trim().to_string(),
            shop: values.get("shop").trim().to_string(),
        },
        Category::Holiday => ItemAttrs::Holiday {
            holiday: values.get("holiday").trim().to_string(),
            shop: values.get("shop").trim().to_string(),
        },
        Category::Social => ItemAttrs::Social {
            shop: values.get("shop").trim().to_string(),
        },
        Category::Income | Category::Bills => ItemAttrs::Plain,
        Category::Funds => prior_attrs.cloned().unwrap_or(ItemAttrs::Funds {
            units: 0.0,
            latest_price: None,
        }),
    };

    Ok(ItemPayload {
        date,
        label,
        cost,
        attrs,
    })
}

/// Prefills a form from an existing item, for the edit dialog.
pub fn values_from_item(item: &LineItem) -> FormValues {
    let mut values = FormValues::new();
    values
        .set("date", item.date.serialise())
        .set("item", item.label.clone())
        .set("cost", format!("{}.{:02}", item.cost / 100, item.cost % 100));

    match &item.attrs {
        ItemAttrs::Consumable { category, shop } => {
            values.set("category", category.clone()).set("shop", shop.clone());
        }
        ItemAttrs::Holiday { holiday, shop } => {
            values.set("holiday", holiday.clone()).set("shop", shop.clone());
        }
        ItemAttrs::Social { shop } => {
            values.set("shop", shop.clone());
        }
        ItemAttrs::Plain | ItemAttrs::Funds { .. } => {}
    }
    values
}
