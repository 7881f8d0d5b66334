// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::InvoiceId;

pub const DEFAULT_SCROLL_THRESHOLD: i64 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPosition {
    pub invoice_id: InvoiceId,
    pub top: i64,
}

impl HeaderPosition {
    pub fn new(invoice_id: impl Into<InvoiceId>, top: i64) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            top,
        }
    }
}

pub fn active_invoice(headers: &[HeaderPosition], threshold: i64) -> Option<&InvoiceId> {
    headers
        .iter()
        .rev()
        .find(|header| header.top <= threshold)
        .or_else(|| headers.first())
        .map(|header| &header.invoice_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSpy {
    threshold: i64,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollSpy {
    pub const fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn observe(
        &self,
        headers: &[HeaderPosition],
        current: Option<&InvoiceId>,
    ) -> Option<InvoiceId> {
        let next = active_invoice(headers, self.threshold)?;
        if Some(next) == current {
            None
        } else {
            Some(next.clone())
        }
    }
}
