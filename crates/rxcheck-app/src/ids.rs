// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineItemId(i64);

impl LineItemId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for LineItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InvoiceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvoiceId, LineItemId};

    #[test]
    fn line_item_id_round_trips_through_get() {
        let id = LineItemId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(LineItemId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn invoice_id_compares_verbatim() {
        let left = InvoiceId::new("INV-2026-001");
        let right = InvoiceId::from("INV-2026-001");
        assert_eq!(left, right);
        assert_eq!(left.as_str(), "INV-2026-001");
        assert_ne!(left, InvoiceId::new("INV-2026-002"));
    }
}
