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

//! Byte-level path segment handling.
//!
//! Paths are treated as raw byte strings: segments are maximal runs of
//! non-`/` bytes, compared unsigned with no normalisation and no encoding
//! assumptions. A `/` and end-of-input are equivalent segment terminators,
//! which is what keeps sibling ordering consistent whether a name arrives
//! from a stored node or from the middle of a longer path.

use crate::error::{Error, ErrorImpl};

use std::{cmp::Ordering, ffi::OsStr, os::unix::ffi::OsStrExt, path::Path};

/// Advance past the current path segment.
///
/// Skips to the first `/` and one position beyond it, so the result either
/// starts at the next segment or is empty (no segments left). Consecutive
/// `/`s are not coalesced; the empty segment between them never matches any
/// node name, so `//` in a lookup path produces a miss.
///
/// ```
/// use std::ffi::OsStr;
/// use pseudofs::next_name;
///
/// assert_eq!(next_name(OsStr::new("usr/lib")), OsStr::new("lib"));
/// assert_eq!(next_name(OsStr::new("usr/")), OsStr::new(""));
/// assert_eq!(next_name(OsStr::new("usr")), OsStr::new(""));
/// ```
pub fn next_name(path: &OsStr) -> &OsStr {
    let bytes = path.as_bytes();
    OsStr::from_bytes(&bytes[next_name_offset(bytes)..])
}

/// Offset of the next segment within `path`, in bytes.
pub(crate) fn next_name_offset(path: &[u8]) -> usize {
    match memchr::memchr(b'/', path) {
        Some(idx) => idx + 1,
        None => path.len(),
    }
}

/// Three-way comparison between the leading segment of `seg` and a node name.
///
/// `seg` is terminated by `/` or end-of-input, `name` by end-of-input only;
/// both terminators compare equal. Bytes are compared unsigned, so multi-byte
/// encodings order as plain byte sequences. This is the total order that
/// sibling lists are sorted under.
pub(crate) fn compare_segment(seg: &[u8], name: &[u8]) -> Ordering {
    let mut idx = 0;
    loop {
        // A '/' in the segment counts as end-of-string.
        let s = match seg.get(idx) {
            Some(&b'/') | None => None,
            Some(&b) => Some(b),
        };
        let n = name.get(idx).copied();

        match (s, n) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(s), Some(n)) => match s.cmp(&n) {
                Ordering::Equal => idx += 1,
                ord => return ord,
            },
        }
    }
}

/// Validate a lookup path and strip the leading `/`.
///
/// Only absolute paths are accepted, and interior NUL bytes are rejected
/// (stored node names come from NUL-terminated sources, so a NUL can never
/// match anything).
pub(crate) fn strip_root(path: &Path) -> Result<&[u8], Error> {
    let bytes = path.as_os_str().as_bytes();
    if bytes.first() != Some(&b'/') {
        return Err(ErrorImpl::InvalidArgument {
            name: "path".into(),
            description: "lookup path must be absolute".into(),
        }
        .into());
    }
    if memchr::memchr(b'\0', bytes).is_some() {
        return Err(ErrorImpl::InvalidArgument {
            name: "path".into(),
            description: "lookup path contains an interior NUL byte".into(),
        }
        .into());
    }
    Ok(&bytes[1..])
}
