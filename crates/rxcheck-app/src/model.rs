// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::{InvoiceId, LineItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Analyzing,
    Completed,
    Failed,
    Pending,
}

impl InvoiceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "analyzing" => Some(Self::Analyzing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Analyzing => "AI analyzing",
            Self::Completed => "reviewed",
            Self::Failed => "unprocessed",
            Self::Pending => "waiting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub invoice_id: InvoiceId,
    pub name: String,
    pub standard: String,
    pub qty: i64,
    pub price: i64,
    pub lot: String,
    pub expiry: Option<Date>,
    pub note: String,
}

impl LineItem {
    pub const fn amount(&self) -> i64 {
        supply_amount(self.qty, self.price)
    }

    pub const fn tax(&self) -> i64 {
        tax_amount(self.amount())
    }

    pub fn lot_missing(&self) -> bool {
        self.lot.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub title: String,
    pub status: InvoiceStatus,
    pub total_amount: i64,
    pub image_name: String,
    pub page_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemField {
    Name,
    Standard,
    Qty,
    Price,
    Lot,
    Expiry,
    Note,
}

impl ItemField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Standard,
        Self::Qty,
        Self::Price,
        Self::Lot,
        Self::Expiry,
        Self::Note,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Standard => "standard",
            Self::Qty => "qty",
            Self::Price => "price",
            Self::Lot => "lot",
            Self::Expiry => "expiry",
            Self::Note => "note",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Qty | Self::Price)
    }
}

pub const fn supply_amount(qty: i64, price: i64) -> i64 {
    qty * price
}

pub const fn tax_amount(amount: i64) -> i64 {
    amount / 10
}
