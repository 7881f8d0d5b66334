// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::error::ReviewError;
use crate::ids::{InvoiceId, LineItemId};
use crate::model::{Invoice, LineItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    invoices: Vec<Invoice>,
    items: Vec<LineItem>,
}

impl Ledger {
    pub fn new(invoices: Vec<Invoice>, items: Vec<LineItem>) -> Result<Self, ReviewError> {
        let mut invoice_ids = BTreeSet::new();
        for invoice in &invoices {
            if !invoice_ids.insert(invoice.id.clone()) {
                return Err(ReviewError::DuplicateInvoice(invoice.id.clone()));
            }
        }

        let mut item_ids = BTreeSet::new();
        for item in &items {
            if !item_ids.insert(item.id) {
                return Err(ReviewError::DuplicateItem(item.id));
            }
            if !invoice_ids.contains(&item.invoice_id) {
                return Err(ReviewError::DanglingInvoice {
                    item: item.id,
                    invoice: item.invoice_id.clone(),
                });
            }
        }

        Ok(Self { invoices, items })
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == *id)
    }

    pub fn first_invoice_id(&self) -> Option<&InvoiceId> {
        self.invoices.first().map(|invoice| &invoice.id)
    }

    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items_by_invoice(&self, invoice_id: &InvoiceId) -> Vec<&LineItem> {
        self.items
            .iter()
            .filter(|item| item.invoice_id == *invoice_id)
            .collect()
    }

    pub fn groups_in_display_order(&self) -> Vec<(&Invoice, Vec<&LineItem>)> {
        self.invoices
            .iter()
            .map(|invoice| (invoice, self.items_by_invoice(&invoice.id)))
            .collect()
    }

    pub fn replace(&mut self, id: LineItemId, item: LineItem) -> Result<(), ReviewError> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(ReviewError::ItemNotFound(id))?;
        *slot = item;
        Ok(())
    }
}
