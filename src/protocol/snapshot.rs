// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::{BoxNode, Patch, PatchLine, VarName};

/// Attributes of one box as reported over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAttributes {
    pub maxclass: String,
    pub patching_rect: [f64; 4],
    pub varname: String,
}

impl BoxAttributes {
    pub fn from_box(varname: &VarName, node: &BoxNode) -> Self {
        Self {
            maxclass: node.maxclass().to_owned(),
            patching_rect: node.rect().edges(),
            varname: varname.as_str().to_owned(),
        }
    }
}

/// Wrapper matching the patcher's serialized box shape (`{"box": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    #[serde(rename = "box")]
    pub attributes: BoxAttributes,
}

/// Serialized line endpoints: `(varname, port)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchLineRecord {
    pub source: (String, u32),
    pub destination: (String, u32),
}

/// Wrapper matching the patcher's serialized line shape (`{"patchline": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub patchline: PatchLineRecord,
}

impl From<&PatchLine> for LineRecord {
    fn from(line: &PatchLine) -> Self {
        Self {
            patchline: PatchLineRecord {
                source: (line.source().varname().as_str().to_owned(), line.source().port()),
                destination: (
                    line.destination().varname().as_str().to_owned(),
                    line.destination().port(),
                ),
            },
        }
    }
}

/// Full enumeration result: every box and every line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSnapshot {
    pub boxes: Vec<BoxRecord>,
    pub lines: Vec<LineRecord>,
}

impl From<&Patch> for PatchSnapshot {
    fn from(patch: &Patch) -> Self {
        Self {
            boxes: patch
                .boxes()
                .iter()
                .map(|(varname, node)| BoxRecord {
                    attributes: BoxAttributes::from_box(varname, node),
                })
                .collect(),
            lines: patch.lines().iter().map(LineRecord::from).collect(),
        }
    }
}
