// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::{Record, RowAction, RowId};

/// Receives row-action notifications. The engine never acts on a record
/// itself; deleting data is the sink owner's job.
pub trait ActionSink<R: Record> {
    /// Actions the render layer should offer. Empty hides the actions column.
    fn supported_actions(&self) -> &[RowAction] {
        &RowAction::ALL
    }

    fn row_action(&mut self, action: RowAction, record: &R);

    fn delete_selected(&mut self, _ids: &BTreeSet<RowId>) {}

    fn supports(&self, action: RowAction) -> bool {
        self.supported_actions().contains(&action)
    }
}

/// Sink for tables without row actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoActions;

impl<R: Record> ActionSink<R> for NoActions {
    fn supported_actions(&self) -> &[RowAction] {
        &[]
    }

    fn row_action(&mut self, _action: RowAction, _record: &R) {}
}
