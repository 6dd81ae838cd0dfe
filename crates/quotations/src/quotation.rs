use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gala_catalog::RankTable;
use gala_core::{Aggregate, AggregateRoot, DomainError, LineItemId, Money, QuotationId};

use crate::line::{LineChanges, LineItem};

/// Quotation status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
}

/// Human-facing quotation number, `BG-<year>-<seq>` (e.g. `BG-2024-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotationNumber(String);

impl QuotationNumber {
    pub fn new(year: i32, sequence: u32) -> Self {
        Self(format!("BG-{year}-{sequence:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for QuotationNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Subtotal, VAT and grand total of a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Aggregate root: Quotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotation {
    id: QuotationId,
    number: Option<QuotationNumber>,
    customer: Customer,
    status: QuotationStatus,
    created_on: Option<NaiveDate>,
    valid_until: Option<NaiveDate>,
    items: Vec<LineItem>,
    notes: String,
    rank_table: RankTable,
    rejection_reason: Option<String>,
    version: u64,
    created: bool,
}

impl Quotation {
    /// Create an empty, not-yet-created instance.
    pub fn empty(id: QuotationId) -> Self {
        Self {
            id,
            number: None,
            customer: Customer::default(),
            status: QuotationStatus::Draft,
            created_on: None,
            valid_until: None,
            items: Vec::new(),
            notes: String::new(),
            rank_table: RankTable::default(),
            rejection_reason: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> QuotationId {
        self.id
    }

    pub fn number(&self) -> Option<&QuotationNumber> {
        self.number.as_ref()
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn status(&self) -> QuotationStatus {
        self.status
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_on
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Multipliers used to re-price tiered lines when they are edited.
    pub fn rank_table(&self) -> &RankTable {
        &self.rank_table
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn line(&self, line_id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|l| l.id == line_id)
    }

    /// Whether the quotation has lapsed as of `today` (still-open ones only).
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.status, QuotationStatus::Draft | QuotationStatus::Sent)
            && self.valid_until.is_some_and(|d| d < today)
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Totals with VAT at `vat_rate_bps` (1000 = 10%).
    pub fn totals(&self, vat_rate_bps: u32) -> QuotationTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.scale_bps(vat_rate_bps);
        QuotationTotals {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

impl AggregateRoot for Quotation {
    type Id = QuotationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateQuotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuotation {
    pub quotation_id: QuotationId,
    pub number: QuotationNumber,
    pub customer: Customer,
    pub created_on: NaiveDate,
    pub valid_until: NaiveDate,
    pub notes: String,
    #[serde(default)]
    pub rank_table: RankTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationCommand {
    Create(CreateQuotation),
    AddLine(LineItem),
    UpdateLine {
        line_id: LineItemId,
        changes: LineChanges,
    },
    RemoveLine {
        line_id: LineItemId,
    },
    Send,
    Approve,
    Reject {
        reason: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationEvent {
    Created(CreateQuotation),
    LineAdded(LineItem),
    LineUpdated(LineItem),
    LineRemoved { line_id: LineItemId },
    Sent,
    Approved,
    Rejected { reason: Option<String> },
}

impl QuotationEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            QuotationEvent::Created(_) => "quotations.quotation.created",
            QuotationEvent::LineAdded(_) => "quotations.line.added",
            QuotationEvent::LineUpdated(_) => "quotations.line.updated",
            QuotationEvent::LineRemoved { .. } => "quotations.line.removed",
            QuotationEvent::Sent => "quotations.quotation.sent",
            QuotationEvent::Approved => "quotations.quotation.approved",
            QuotationEvent::Rejected { .. } => "quotations.quotation.rejected",
        }
    }
}

impl Aggregate for Quotation {
    type Command = QuotationCommand;
    type Event = QuotationEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            QuotationEvent::Created(e) => {
                self.id = e.quotation_id;
                self.number = Some(e.number.clone());
                self.customer = e.customer.clone();
                self.created_on = Some(e.created_on);
                self.valid_until = Some(e.valid_until);
                self.notes = e.notes.clone();
                self.rank_table = e.rank_table;
                self.status = QuotationStatus::Draft;
                self.created = true;
            }
            QuotationEvent::LineAdded(line) => self.items.push(line.clone()),
            QuotationEvent::LineUpdated(line) => {
                if let Some(slot) = self.items.iter_mut().find(|l| l.id == line.id) {
                    *slot = line.clone();
                }
            }
            QuotationEvent::LineRemoved { line_id } => self.items.retain(|l| l.id != *line_id),
            QuotationEvent::Sent => self.status = QuotationStatus::Sent,
            QuotationEvent::Approved => self.status = QuotationStatus::Approved,
            QuotationEvent::Rejected { reason } => {
                self.status = QuotationStatus::Rejected;
                self.rejection_reason = reason.clone();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            QuotationCommand::Create(cmd) => self.handle_create(cmd),
            QuotationCommand::AddLine(line) => self.handle_add_line(line),
            QuotationCommand::UpdateLine { line_id, changes } => {
                self.handle_update_line(*line_id, changes)
            }
            QuotationCommand::RemoveLine { line_id } => self.handle_remove_line(*line_id),
            QuotationCommand::Send => self.handle_send(),
            QuotationCommand::Approve => self.handle_decision(QuotationEvent::Approved),
            QuotationCommand::Reject { reason } => self.handle_decision(QuotationEvent::Rejected {
                reason: reason.clone(),
            }),
        }
    }
}

impl Quotation {
    fn ensure_created(&self) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_draft(&self) -> Result<(), DomainError> {
        self.ensure_created()?;
        if self.status != QuotationStatus::Draft {
            return Err(DomainError::invariant(format!(
                "lines can only change while the quotation is a draft (status: {:?})",
                self.status
            )));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateQuotation) -> Result<Vec<QuotationEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("quotation already exists"));
        }
        if cmd.customer.name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if cmd.valid_until < cmd.created_on {
            return Err(DomainError::validation(format!(
                "valid-until date {} is before creation date {}",
                cmd.valid_until, cmd.created_on
            )));
        }

        Ok(vec![QuotationEvent::Created(cmd.clone())])
    }

    fn handle_add_line(&self, line: &LineItem) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_draft()?;
        if self.line(line.id).is_some() {
            return Err(DomainError::conflict(format!("line {} already exists", line.id)));
        }
        line.validate()?;
        Ok(vec![QuotationEvent::LineAdded(line.clone())])
    }

    fn handle_update_line(
        &self,
        line_id: LineItemId,
        changes: &LineChanges,
    ) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_draft()?;
        let current = self.line(line_id).ok_or_else(DomainError::not_found)?;
        if changes.is_empty() {
            return Ok(vec![]);
        }
        let updated = changes.applied_to(current, &self.rank_table);
        updated.validate()?;
        Ok(vec![QuotationEvent::LineUpdated(updated)])
    }

    fn handle_remove_line(&self, line_id: LineItemId) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_draft()?;
        if self.line(line_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(vec![QuotationEvent::LineRemoved { line_id }])
    }

    fn handle_send(&self) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_created()?;
        if self.status != QuotationStatus::Draft {
            return Err(DomainError::conflict(format!(
                "only drafts can be sent (status: {:?})",
                self.status
            )));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("cannot send a quotation without lines"));
        }
        Ok(vec![QuotationEvent::Sent])
    }

    fn handle_decision(
        &self,
        decision: QuotationEvent,
    ) -> Result<Vec<QuotationEvent>, DomainError> {
        self.ensure_created()?;
        if self.status != QuotationStatus::Sent {
            return Err(DomainError::conflict(format!(
                "only sent quotations can be approved or rejected (status: {:?})",
                self.status
            )));
        }
        tracing::debug!(
            quotation_id = %self.id,
            decision = decision.event_type(),
            "quotation decided"
        );
        Ok(vec![decision])
    }
}
