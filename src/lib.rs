// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Patchbay — REST bridge exposing a visual patcher's object graph.
//!
//! The facade serves a fixed HTTP route table; the bridge correlates queries
//! with out-of-band host replies over a fire-and-forget link. Without a host
//! the crate runs against an in-memory mirror of the patch graph.

pub mod bridge;
pub mod console;
pub mod facade;
pub mod host;
pub mod model;
pub mod protocol;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
