// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

use crate::error::ReviewError;
use crate::ids::LineItemId;
use crate::ledger::Ledger;
use crate::model::{ItemField, LineItem, supply_amount, tax_amount};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Closed,
    Editing {
        target: LineItemId,
        draft: LineItem,
    },
}

impl EditSession {
    pub fn start_edit(&mut self, item: &LineItem) -> Result<(), ReviewError> {
        match self {
            Self::Closed => {
                *self = Self::Editing {
                    target: item.id,
                    draft: item.clone(),
                };
                Ok(())
            }
            Self::Editing { target, .. } => Err(ReviewError::EditInProgress(*target)),
        }
    }

    pub fn update_field(&mut self, field: ItemField, raw: &str) -> Result<(), ReviewError> {
        let Self::Editing { draft, .. } = self else {
            return Err(ReviewError::NoActiveEdit);
        };

        match field {
            ItemField::Name => draft.name = raw.to_owned(),
            ItemField::Standard => draft.standard = raw.to_owned(),
            ItemField::Qty => draft.qty = coerce_count(raw),
            ItemField::Price => draft.price = coerce_count(raw),
            ItemField::Lot => draft.lot = raw.to_owned(),
            ItemField::Expiry => draft.expiry = parse_expiry(raw),
            ItemField::Note => draft.note = raw.to_owned(),
        }
        Ok(())
    }

    pub fn commit(&mut self, ledger: &mut Ledger) -> Result<LineItemId, ReviewError> {
        let Self::Editing { target, draft } = self else {
            return Err(ReviewError::NoActiveEdit);
        };
        let target = *target;
        ledger.replace(target, draft.clone())?;
        *self = Self::Closed;
        Ok(target)
    }

    pub fn cancel(&mut self) -> Result<LineItemId, ReviewError> {
        match self {
            Self::Closed => Err(ReviewError::NoActiveEdit),
            Self::Editing { target, .. } => {
                let target = *target;
                *self = Self::Closed;
                Ok(target)
            }
        }
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub const fn target(&self) -> Option<LineItemId> {
        match self {
            Self::Closed => None,
            Self::Editing { target, .. } => Some(*target),
        }
    }

    pub const fn draft(&self) -> Option<&LineItem> {
        match self {
            Self::Closed => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_totals(&self) -> Option<(i64, i64)> {
        self.draft().map(|draft| {
            let amount = supply_amount(draft.qty, draft.price);
            (amount, tax_amount(amount))
        })
    }
}

fn coerce_count(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0).max(0)
}

fn parse_expiry(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), &format_description!("[year]-[month]-[day]")).ok()
}
