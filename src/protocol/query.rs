// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use crate::model::VarName;

/// Read query sent to the host, answered out-of-band by a labeled reply.
///
/// Action labels are the host-side contract and must stay stable; the bridge
/// script running inside the patcher dispatches on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostQuery {
    /// Enumerate every box (and line, where the host reports them).
    ObjectsInPatch,
    /// Enumerate only boxes currently selected in the host UI.
    ObjectsInSelection,
    /// Type tag and rectangle of one box, `null` when absent.
    ObjectAttributes { varname: VarName },
    /// Aggregate bounding rectangle over all boxes.
    PatchBounds,
}

impl HostQuery {
    pub fn action(&self) -> &'static str {
        match self {
            Self::ObjectsInPatch => "get_objects_in_patch",
            Self::ObjectsInSelection => "get_objects_in_selected",
            Self::ObjectAttributes { .. } => "get_object_attributes",
            Self::PatchBounds => "get_avoid_rect_position",
        }
    }

    /// Ordered extra arguments appended after the action label.
    pub fn extra_args(&self) -> Vec<Value> {
        match self {
            Self::ObjectsInPatch | Self::ObjectsInSelection | Self::PatchBounds => Vec::new(),
            Self::ObjectAttributes { varname } => vec![Value::from(varname.as_str())],
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::HostQuery;
    use crate::model::VarName;

    #[test]
    fn attribute_query_carries_the_varname() {
        let query = HostQuery::ObjectAttributes {
            varname: VarName::new("osc_1").expect("varname"),
        };
        assert_eq!(query.action(), "get_object_attributes");
        assert_eq!(query.extra_args(), vec![Value::from("osc_1")]);
    }

    #[test]
    fn enumeration_queries_have_no_extra_args() {
        assert!(HostQuery::ObjectsInPatch.extra_args().is_empty());
        assert!(HostQuery::ObjectsInSelection.extra_args().is_empty());
        assert!(HostQuery::PatchBounds.extra_args().is_empty());
    }
}
