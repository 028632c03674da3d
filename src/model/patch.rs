// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::VarName;
use super::rect::{aggregate_bounds, Rect};

/// One box in a patch: a type tag plus its patching rectangle.
///
/// Identity lives in the owning [`Patch`] map key; attribute, text, value and
/// event operations mutate a box in place without changing identity.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxNode {
    maxclass: String,
    rect: Rect,
}

impl BoxNode {
    pub fn new(maxclass: impl Into<String>, rect: Rect) -> Self {
        Self { maxclass: maxclass.into(), rect }
    }

    pub fn maxclass(&self) -> &str {
        &self.maxclass
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// One endpoint of a patch line: a box varname plus a port index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    varname: VarName,
    port: u32,
}

impl PortRef {
    pub fn new(varname: VarName, port: u32) -> Self {
        Self { varname, port }
    }

    pub fn varname(&self) -> &VarName {
        &self.varname
    }

    pub fn port(&self) -> u32 {
        self.port
    }
}

/// A patch line, an ordered source/destination endpoint pair.
///
/// Lines hold varnames rather than box handles; nothing enforces that the
/// endpoints reference existing boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLine {
    source: PortRef,
    destination: PortRef,
}

impl PatchLine {
    pub fn new(source: PortRef, destination: PortRef) -> Self {
        Self { source, destination }
    }

    pub fn source(&self) -> &PortRef {
        &self.source
    }

    pub fn destination(&self) -> &PortRef {
        &self.destination
    }

    fn touches(&self, varname: &VarName) -> bool {
        self.source.varname() == varname || self.destination.varname() == varname
    }
}

/// In-memory mirror of the patcher graph, used when no host is attached.
///
/// Boxes and lines are stored in owned collections keyed by varname; lines
/// reference boxes by id only, so the graph carries no pointer cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    boxes: BTreeMap<VarName, BoxNode>,
    lines: Vec<PatchLine>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxes(&self) -> &BTreeMap<VarName, BoxNode> {
        &self.boxes
    }

    pub fn lines(&self) -> &[PatchLine] {
        &self.lines
    }

    pub fn get(&self, varname: &str) -> Option<&BoxNode> {
        self.boxes.get(varname)
    }

    pub fn get_mut(&mut self, varname: &str) -> Option<&mut BoxNode> {
        self.boxes.get_mut(varname)
    }

    /// Inserts a box under `varname`. Varnames are unique per patch, so
    /// re-inserting an existing name replaces the previous box.
    pub fn insert_box(&mut self, varname: VarName, node: BoxNode) {
        self.boxes.insert(varname, node);
    }

    /// Removes a box and every line referencing it. Returns whether a box
    /// with that varname existed.
    pub fn remove_box(&mut self, varname: &VarName) -> bool {
        let existed = self.boxes.remove(varname).is_some();
        self.lines.retain(|line| !line.touches(varname));
        existed
    }

    pub fn connect(&mut self, line: PatchLine) {
        self.lines.push(line);
    }

    /// Removes lines matching the exact endpoint tuple. No-op when absent.
    pub fn disconnect(&mut self, line: &PatchLine) -> bool {
        let before = self.lines.len();
        self.lines.retain(|existing| existing != line);
        before != self.lines.len()
    }

    pub fn bounds(&self) -> [f64; 4] {
        aggregate_bounds(self.boxes.values().map(BoxNode::rect))
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.lines.is_empty()
    }
}
