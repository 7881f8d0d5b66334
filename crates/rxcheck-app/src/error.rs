// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::ids::{InvoiceId, LineItemId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("line item {0} is not in the ledger")]
    ItemNotFound(LineItemId),

    #[error("line item {0} is already being edited")]
    EditInProgress(LineItemId),

    #[error("no edit session is active")]
    NoActiveEdit,

    #[error("line item {item} references unknown invoice {invoice}")]
    DanglingInvoice {
        item: LineItemId,
        invoice: InvoiceId,
    },

    #[error("duplicate line item id {0}")]
    DuplicateItem(LineItemId),

    #[error("duplicate invoice id {0}")]
    DuplicateInvoice(InvoiceId),
}
