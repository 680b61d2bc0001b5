// SPDX-License-Identifier: MPL-2.0 OR LGPL-3.0-or-later
/*
 * pseudofs: name resolution over an in-memory pseudo-filesystem tree
 * Copyright (C) 2025-2026 The pseudofs Authors
 *
 * == MPL-2.0 ==
 *
 *  This Source Code Form is subject to the terms of the Mozilla Public
 *  License, v. 2.0. If a copy of the MPL was not distributed with this
 *  file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Alternatively, this Source Code Form may also (at your option) be used
 * under the terms of the GNU Lesser General Public License Version 3, as
 * described below:
 *
 * == LGPL-3.0-or-later ==
 *
 *  This program is free software: you can redistribute it and/or modify it
 *  under the terms of the GNU Lesser General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or (at
 *  your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful, but
 *  WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY  or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
 * Public License  for more details.
 *
 *  You should have received a copy of the GNU Lesser General Public License
 *  along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

#![forbid(unsafe_code)]

//! Flag arguments for lookup operations.

use bitflags::bitflags;

bitflags! {
    /// Flags adjusting how [`PseudoFs::lookup`] walks the tree.
    ///
    /// Both flags only affect trees that contain softlink nodes; without the
    /// `softlinks` feature they are accepted and ignored.
    ///
    /// [`PseudoFs::lookup`]: crate::PseudoFs::lookup
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LookupFlags: u32 {
        /// Do not dereference the terminal node if it is a softlink; return
        /// the raw softlink node instead. Softlinks in the middle of the path
        /// are still followed.
        const NO_FOLLOW_TRAILING = 1 << 0;

        /// Refuse to follow any softlink that would otherwise be traversed.
        /// Encountering one fails the lookup with
        /// [`ErrorKind::LinkLoop`](crate::error::ErrorKind).
        const NO_SYMLINKS = 1 << 1;
    }
}
