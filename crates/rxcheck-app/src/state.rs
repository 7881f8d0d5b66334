// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::error::ReviewError;
use crate::ids::{InvoiceId, LineItemId};
use crate::ledger::Ledger;
use crate::model::{Invoice, ItemField, LineItem};
use crate::scrollspy::{HeaderPosition, ScrollSpy};
use crate::session::EditSession;
use crate::viewport::{ViewerMode, viewer_mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCommand {
    OnScroll(Vec<HeaderPosition>),
    ToggleViewer,
    StartEdit(LineItemId),
    UpdateDraftField(ItemField, String),
    CommitEdit,
    CancelEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    ActiveInvoiceChanged(InvoiceId),
    ViewerModeChanged(ViewerMode),
    EditStarted(LineItemId),
    DraftFieldUpdated { amount: i64, tax: i64 },
    EditCommitted(LineItemId),
    EditCancelled(LineItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    ledger: Ledger,
    session: EditSession,
    manual_visible: bool,
    spy: ScrollSpy,
    active_invoice: Option<InvoiceId>,
}

impl ReviewState {
    pub fn new(ledger: Ledger) -> Self {
        let active_invoice = ledger.first_invoice_id().cloned();
        Self {
            ledger,
            session: EditSession::default(),
            manual_visible: true,
            spy: ScrollSpy::default(),
            active_invoice,
        }
    }

    pub fn with_config(ledger: Ledger, scroll_threshold: i64, viewer_visible: bool) -> Self {
        Self {
            spy: ScrollSpy::new(scroll_threshold),
            manual_visible: viewer_visible,
            ..Self::new(ledger)
        }
    }

    pub fn dispatch(&mut self, command: ReviewCommand) -> Result<Vec<ReviewEvent>, ReviewError> {
        match command {
            ReviewCommand::OnScroll(headers) => Ok(self.on_scroll(&headers)),
            ReviewCommand::ToggleViewer => {
                self.manual_visible = !self.manual_visible;
                Ok(vec![ReviewEvent::ViewerModeChanged(self.viewer_mode())])
            }
            ReviewCommand::StartEdit(id) => self.start_edit(id),
            ReviewCommand::UpdateDraftField(field, value) => {
                self.session.update_field(field, &value)?;
                let (amount, tax) = self
                    .session
                    .draft_totals()
                    .expect("session is editing after a successful field update");
                Ok(vec![ReviewEvent::DraftFieldUpdated { amount, tax }])
            }
            ReviewCommand::CommitEdit => self.commit_edit(),
            ReviewCommand::CancelEdit => self.cancel_edit(),
        }
    }

    fn on_scroll(&mut self, headers: &[HeaderPosition]) -> Vec<ReviewEvent> {
        match self.spy.observe(headers, self.active_invoice.as_ref()) {
            Some(next) => {
                self.active_invoice = Some(next.clone());
                vec![ReviewEvent::ActiveInvoiceChanged(next)]
            }
            None => Vec::new(),
        }
    }

    fn start_edit(&mut self, id: LineItemId) -> Result<Vec<ReviewEvent>, ReviewError> {
        let item = self
            .ledger
            .item(id)
            .ok_or(ReviewError::ItemNotFound(id))?
            .clone();

        let before = self.viewer_mode();
        self.session.start_edit(&item)?;
        Ok(self.with_viewer_change(before, ReviewEvent::EditStarted(id)))
    }

    fn commit_edit(&mut self) -> Result<Vec<ReviewEvent>, ReviewError> {
        let before = self.viewer_mode();
        let target = self.session.commit(&mut self.ledger)?;
        Ok(self.with_viewer_change(before, ReviewEvent::EditCommitted(target)))
    }

    fn cancel_edit(&mut self) -> Result<Vec<ReviewEvent>, ReviewError> {
        let before = self.viewer_mode();
        let target = self.session.cancel()?;
        Ok(self.with_viewer_change(before, ReviewEvent::EditCancelled(target)))
    }

    fn with_viewer_change(&self, before: ViewerMode, event: ReviewEvent) -> Vec<ReviewEvent> {
        let mut events = vec![event];
        let after = self.viewer_mode();
        if after != before {
            events.push(ReviewEvent::ViewerModeChanged(after));
        }
        events
    }

    pub fn viewer_mode(&self) -> ViewerMode {
        viewer_mode(self.manual_visible, self.session.is_editing())
    }

    pub fn manual_visible(&self) -> bool {
        self.manual_visible
    }

    pub fn scroll_threshold(&self) -> i64 {
        self.spy.threshold()
    }

    pub fn active_invoice_id(&self) -> Option<&InvoiceId> {
        self.active_invoice.as_ref()
    }

    pub fn active_invoice(&self) -> Option<&Invoice> {
        self.active_invoice
            .as_ref()
            .and_then(|id| self.ledger.invoice(id))
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn groups_in_display_order(&self) -> Vec<(&Invoice, Vec<&LineItem>)> {
        self.ledger.groups_in_display_order()
    }
}
