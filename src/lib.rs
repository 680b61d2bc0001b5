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

//! pseudofs implements name resolution over an in-memory tree of named
//! nodes, the way an embedded kernel's pseudo-filesystem layer does it:
//! sibling lists are kept sorted so a lookup can stop early, mountpoint
//! nodes absorb the walk and hand the unconsumed path suffix to whatever
//! filesystem is mounted there, and softlink nodes are chased with a
//! traversal budget so cyclic links fail in bounded time instead of hanging.
//!
//! Lookups return an outcome rather than a bare hit-or-error: a miss carries
//! the predecessor sibling and parent of the spot where the missing name
//! would live, which is exactly what [`PseudoFs::insert`] needs to splice a
//! new node into sorted position.
//!
//! # Example
//!
//! ```
//! use pseudofs::{Lookup, NodeKind, PseudoFs};
//! # use pseudofs::error::Error;
//!
//! # fn main() -> Result<(), Error> {
//! let mut fs = PseudoFs::new();
//! fs.insert("/bin/ls", NodeKind::Ordinary)?;
//! fs.insert("/bin/sh", NodeKind::Ordinary)?;
//! fs.insert("/mnt", NodeKind::Mountpoint)?;
//!
//! // A full match reports the node and its sibling context.
//! let sh = fs.search("/bin/sh")?.node().expect("/bin/sh exists");
//! assert_eq!(fs[sh].name(), "sh");
//!
//! // A mountpoint absorbs the rest of the path.
//! match fs.search("/mnt/logs/today")? {
//!     Lookup::Mountpoint { relpath, .. } => assert_eq!(relpath.as_os_str(), "logs/today"),
//!     other => panic!("expected mountpoint absorption, got {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Scope
//!
//! Path segments are opaque byte strings: there is no `.`/`..` handling, no
//! normalisation and no encoding assumptions -- bytes are compared unsigned,
//! and only absolute `/`-delimited paths are accepted. Mounting itself,
//! reference counting and file I/O belong to the layers above and below.

// Node names are handled as raw bytes via std::os::unix::ffi::OsStrExt.
#![cfg(unix)]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::all)]
#![deny(missing_debug_implementations)]

// The node tree and its structural operations.
mod tree;
#[doc(inline)]
pub use tree::*;

// The lookup walk.
mod resolve;
#[doc(inline)]
pub use resolve::*;

pub mod error;
pub mod flags;

// Internally used helpers.
mod path;
pub use path::next_name;

// Library tests.
#[cfg(test)]
mod tests;
