// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host-side contract: graph walker, query dispatcher, mutation relay.
//!
//! The patcher document is opaque behind [`PatchDocument`]; the walker and
//! relay only use its enumerate/lookup/mutate primitives. [`MirrorDocument`]
//! implements the trait over the in-memory mirror graph and backs both the
//! standalone facade path and the tests.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::warn;

use crate::model::{aggregate_bounds, BoxNode, Patch, PatchLine, PortRef, Rect, VarName};
use crate::protocol::{BoxAttributes, BoxRecord, HostCommand, HostReply, PatchSnapshot};

/// One box as surfaced by a document, independent of how the host stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBox {
    pub varname: String,
    pub maxclass: String,
    pub rect: Rect,
    pub selected: bool,
}

/// Enumerate/lookup/mutate primitives over an opaque patcher document.
///
/// Mutations are one-way; none of them produce confirmation. Any observable
/// result is picked up only by a subsequent read.
pub trait PatchDocument {
    /// Every box, in a stable traversal order.
    fn boxes(&self) -> Vec<DocumentBox>;

    fn lookup(&self, varname: &str) -> Option<DocumentBox>;

    fn create_box_at(&mut self, varname: VarName, maxclass: &str, rect: Rect, init_args: &[String]);
    fn delete_box(&mut self, varname: &str);
    fn connect(&mut self, source: &str, outlet: u32, destination: &str, inlet: u32);
    fn disconnect(&mut self, source: &str, outlet: u32, destination: &str, inlet: u32);
    fn set_attribute(&mut self, varname: &str, name: &str, value: &Value);
    fn replace_text(&mut self, varname: &str, text: &str);
    fn deliver_message(&mut self, varname: &str, message: &str);
    fn deliver_bang(&mut self, varname: &str);
    fn set_number(&mut self, varname: &str, value: f64);
}

fn box_attributes(entry: &DocumentBox) -> BoxAttributes {
    BoxAttributes {
        maxclass: entry.maxclass.clone(),
        patching_rect: entry.rect.edges(),
        varname: entry.varname.clone(),
    }
}

/// Enumerates boxes, optionally restricted to the host's current selection.
///
/// Hosts report boxes only; the `lines` half of the snapshot stays empty on
/// this path.
pub fn objects_in_patch(doc: &dyn PatchDocument, selected_only: bool) -> PatchSnapshot {
    let boxes = doc
        .boxes()
        .iter()
        .filter(|entry| !selected_only || entry.selected)
        .map(|entry| BoxRecord { attributes: box_attributes(entry) })
        .collect();
    PatchSnapshot { boxes, lines: Vec::new() }
}

/// Attributes of one box, `None` when no box carries that varname.
pub fn object_attributes(doc: &dyn PatchDocument, varname: &str) -> Option<BoxAttributes> {
    doc.lookup(varname).map(|entry| box_attributes(&entry))
}

/// Aggregate bounding rectangle; `[0, 0, 0, 0]` for an empty document.
pub fn patch_bounds(doc: &dyn PatchDocument) -> [f64; 4] {
    aggregate_bounds(doc.boxes().into_iter().map(|entry| entry.rect))
}

/// Executes one inbound query against the document.
///
/// Returns the reply envelope tagged with the request id, or `None` for an
/// unknown action (logged; the caller is left to time out).
pub fn dispatch_query(
    doc: &dyn PatchDocument,
    request_id: &str,
    action: &str,
    args: &[Value],
) -> Option<HostReply> {
    let results = match action {
        "get_objects_in_patch" => serde_json::to_value(objects_in_patch(doc, false)),
        "get_objects_in_selected" => serde_json::to_value(objects_in_patch(doc, true)),
        "get_object_attributes" => {
            let varname = args.first().and_then(Value::as_str).unwrap_or_default();
            serde_json::to_value(object_attributes(doc, varname))
        }
        "get_avoid_rect_position" => serde_json::to_value(patch_bounds(doc)),
        other => {
            warn!(action = other, request_id, "unknown query action");
            return None;
        }
    };

    match results {
        Ok(results) => Some(HostReply { request_id: request_id.to_owned(), results }),
        Err(err) => {
            warn!(%err, action, request_id, "failed to serialize query results");
            None
        }
    }
}

/// Translates a structural edit intent into document primitives.
pub fn apply_command(doc: &mut dyn PatchDocument, command: &HostCommand) {
    match command {
        HostCommand::NewObject { varname, maxclass, rect, args } => {
            doc.create_box_at(varname.clone(), maxclass, *rect, args);
        }
        HostCommand::Delete { varname } => doc.delete_box(varname.as_str()),
        HostCommand::Connect { source, outlet, destination, inlet } => {
            doc.connect(source.as_str(), *outlet, destination.as_str(), *inlet);
        }
        HostCommand::Disconnect { source, outlet, destination, inlet } => {
            doc.disconnect(source.as_str(), *outlet, destination.as_str(), *inlet);
        }
        HostCommand::SetAttribute { varname, name, value } => {
            doc.set_attribute(varname.as_str(), name, value);
        }
        HostCommand::SetText { varname, text } => doc.replace_text(varname.as_str(), text),
        HostCommand::SendMessage { varname, message } => {
            doc.deliver_message(varname.as_str(), message);
        }
        HostCommand::SendBang { varname } => doc.deliver_bang(varname.as_str()),
        HostCommand::SetNumber { varname, value } => doc.set_number(varname.as_str(), *value),
    }
}

/// [`PatchDocument`] over the in-memory mirror graph.
///
/// The mirror tracks structure (boxes and lines) only; attribute, text,
/// value and event deliveries are host UI concerns with no mirrored state,
/// matching what a detached facade can observe.
#[derive(Debug, Default)]
pub struct MirrorDocument {
    patch: Patch,
    selected: BTreeSet<VarName>,
}

impl MirrorDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Marks a box as selected, for exercising the selection-filtered walk.
    pub fn select(&mut self, varname: VarName) {
        self.selected.insert(varname);
    }
}

impl PatchDocument for MirrorDocument {
    fn boxes(&self) -> Vec<DocumentBox> {
        self.patch
            .boxes()
            .iter()
            .map(|(varname, node)| DocumentBox {
                varname: varname.as_str().to_owned(),
                maxclass: node.maxclass().to_owned(),
                rect: node.rect(),
                selected: self.selected.contains(varname),
            })
            .collect()
    }

    fn lookup(&self, varname: &str) -> Option<DocumentBox> {
        let node = self.patch.get(varname)?;
        Some(DocumentBox {
            varname: varname.to_owned(),
            maxclass: node.maxclass().to_owned(),
            rect: node.rect(),
            selected: self.selected.contains(varname),
        })
    }

    fn create_box_at(
        &mut self,
        varname: VarName,
        maxclass: &str,
        rect: Rect,
        _init_args: &[String],
    ) {
        self.patch.insert_box(varname, BoxNode::new(maxclass, rect));
    }

    fn delete_box(&mut self, varname: &str) {
        let Ok(varname) = VarName::new(varname) else {
            return;
        };
        self.selected.remove(&varname);
        self.patch.remove_box(&varname);
    }

    fn connect(&mut self, source: &str, outlet: u32, destination: &str, inlet: u32) {
        let (Ok(source), Ok(destination)) = (VarName::new(source), VarName::new(destination))
        else {
            return;
        };
        self.patch.connect(PatchLine::new(
            PortRef::new(source, outlet),
            PortRef::new(destination, inlet),
        ));
    }

    fn disconnect(&mut self, source: &str, outlet: u32, destination: &str, inlet: u32) {
        let (Ok(source), Ok(destination)) = (VarName::new(source), VarName::new(destination))
        else {
            return;
        };
        self.patch.disconnect(&PatchLine::new(
            PortRef::new(source, outlet),
            PortRef::new(destination, inlet),
        ));
    }

    fn set_attribute(&mut self, _varname: &str, _name: &str, _value: &Value) {}

    fn replace_text(&mut self, _varname: &str, _text: &str) {}

    fn deliver_message(&mut self, _varname: &str, _message: &str) {}

    fn deliver_bang(&mut self, _varname: &str) {}

    fn set_number(&mut self, _varname: &str, _value: f64) {}
}

#[cfg(test)]
mod tests;
