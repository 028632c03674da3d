// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mirror-graph model: boxes, lines, rectangles, typed ids.
//!
//! The patcher document proper is host-owned and opaque; this model is the
//! in-memory arena the facade falls back to when no host is attached.

pub mod ids;
pub mod patch;
pub mod rect;

pub use ids::{Id, IdError, VarName};
pub use patch::{BoxNode, Patch, PatchLine, PortRef};
pub use rect::{aggregate_bounds, Rect, DEFAULT_BOX_HEIGHT, DEFAULT_BOX_WIDTH};
