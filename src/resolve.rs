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

//! The lookup walk.
//!
//! Resolution is a single iterative loop over an owned byte cursor. Sibling
//! lists are sorted, so each level is scanned left-to-right until the segment
//! either matches a name (descend), orders before one (stop: the name cannot
//! exist at this level), or runs past the end of the list. Softlinks are not
//! resolved by recursing: the link target is spliced into the front of the
//! cursor and the walk restarts from the root, so a single traversal budget
//! bounds arbitrarily vicious link chains without growing the stack.

use crate::{
    error::Error,
    flags::LookupFlags,
    path,
    tree::{NodeId, PseudoFs},
};
#[cfg(feature = "softlinks")]
use crate::{error::ErrorImpl, tree::NodeKind};

use std::{cmp::Ordering, ffi::OsStr, os::unix::ffi::OsStrExt, path::PathBuf};

/// Upper bound on softlink dereferences within a single lookup.
///
/// Every softlink traversal counts against the budget, whether or not the
/// target exists, so even a cycle of perfectly valid links is cut off after
/// this many jumps with [`ErrorKind::LinkLoop`](crate::error::ErrorKind).
#[cfg(feature = "softlinks")]
pub const MAX_LINK_TRAVERSALS: usize = 40;

#[cfg(feature = "softlinks")]
static_assertions::const_assert!(MAX_LINK_TRAVERSALS >= 1);

/// Outcome of a lookup walk.
///
/// A lookup that runs to completion is not necessarily a hit: the walk also
/// reports *where* a missing name would live, which is exactly the context
/// needed to splice a new node into the sorted sibling list, and a mountpoint
/// part-way through the path absorbs the walk rather than failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The whole path was consumed and the terminal node was found.
    Complete {
        /// The node the path names.
        node: NodeId,
        /// The immediate predecessor in the node's sibling list, if any.
        peer: Option<NodeId>,
        /// The owner of the sibling list the node lives in.
        parent: Option<NodeId>,
    },

    /// A mountpoint absorbed the walk before the path was exhausted. The
    /// remainder of the path belongs to the mounted filesystem.
    Mountpoint {
        /// The mountpoint node.
        node: NodeId,
        /// Sibling context for the mountpoint. Both fields are `None` when
        /// the mountpoint was reached through a softlink jump: the walk can
        /// no longer vouch for sibling context across that boundary.
        peer: Option<NodeId>,
        /// See `peer`.
        parent: Option<NodeId>,
        /// The unconsumed path suffix (never empty), with no leading `/`.
        /// When the mountpoint was reached through a softlink, this is the
        /// unconsumed tail of the link target followed by the unconsumed
        /// caller suffix.
        relpath: PathBuf,
    },

    /// No node with this path exists.
    Miss {
        /// The highest-ordered sibling comparing less than the missing name,
        /// if any; a new node would be spliced in right after it.
        peer: Option<NodeId>,
        /// The node whose child list the missing name belongs in. The root
        /// anchor for a top-level miss.
        parent: Option<NodeId>,
        /// The unconsumed path suffix, starting at the missing segment.
        relpath: PathBuf,
    },
}

impl Lookup {
    /// The found node, if the walk landed on one.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Lookup::Complete { node, .. } | Lookup::Mountpoint { node, .. } => Some(node),
            Lookup::Miss { .. } => None,
        }
    }
}

fn owned_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(OsStr::from_bytes(bytes).to_os_string())
}

/// Walk the tree for `path`.
///
/// The cursor starts past the leading `/`; each match advances it one
/// segment. An empty cursor at a match means the current node is terminal; a
/// mountpoint with cursor left over hands the remainder off; a softlink
/// splices its target into the cursor and restarts from the root.
#[cfg_attr(not(feature = "softlinks"), allow(unused_variables))]
pub(crate) fn lookup(
    fs: &PseudoFs,
    path: &std::path::Path,
    flags: LookupFlags,
) -> Result<Lookup, Error> {
    let mut buf: Vec<u8> = path::strip_root(path)?.to_vec();
    let mut pos: usize = 0;
    // Trailing cursor bytes that still come from the caller's own path (as
    // opposed to spliced link-target bytes). A segment sitting left of this
    // tail was translated through a softlink.
    let mut caller_tail = buf.len();

    let mut node = fs.node(fs.root()).child();
    let mut above = Some(fs.root());
    let mut left: Option<NodeId> = None;
    #[cfg(feature = "softlinks")]
    let mut traversals: usize = 0;

    while let Some(cur) = node {
        let entry = fs.node(cur);

        match path::compare_segment(&buf[pos..], entry.name_bytes()) {
            // The segment orders before this sibling; the list is sorted, so
            // no match can exist at this level. `left` keeps the last lesser
            // sibling for the insertion context.
            Ordering::Less => break,

            // The match, if any, is further right.
            Ordering::Greater => {
                left = Some(cur);
                node = entry.peer();
            }

            Ordering::Equal => {
                let from_link = buf.len() - pos > caller_tail;
                pos += path::next_name_offset(&buf[pos..]);
                caller_tail = caller_tail.min(buf.len() - pos);

                if pos >= buf.len() {
                    #[cfg(feature = "softlinks")]
                    let stop =
                        !entry.is_softlink() || flags.contains(LookupFlags::NO_FOLLOW_TRAILING);
                    #[cfg(not(feature = "softlinks"))]
                    let stop = true;
                    if stop {
                        return Ok(Lookup::Complete {
                            node: cur,
                            peer: left,
                            parent: above,
                        });
                    }
                }

                #[cfg(feature = "softlinks")]
                if let NodeKind::Softlink(target) = entry.kind() {
                    if flags.contains(LookupFlags::NO_SYMLINKS) {
                        return Err(ErrorImpl::LinkLoop {
                            description: "softlink traversal disabled for this lookup".into(),
                        }
                        .into());
                    }
                    traversals += 1;
                    if traversals > MAX_LINK_TRAVERSALS {
                        return Err(ErrorImpl::LinkLoop {
                            description: "softlink traversal budget exhausted".into(),
                        }
                        .into());
                    }

                    // Splice the target in front of the unconsumed suffix and
                    // restart. Targets are absolute; neither the empty tail
                    // of a link to "/" nor a trailing slash on the target may
                    // leave a phantom empty segment in front of the suffix.
                    let target = target.as_os_str().as_bytes();
                    let mut tail = target.strip_prefix(b"/").unwrap_or(target);
                    while let Some(trimmed) = tail.strip_suffix(b"/") {
                        tail = trimmed;
                    }
                    let rest = &buf[pos..];
                    let mut next = Vec::with_capacity(tail.len() + 1 + rest.len());
                    next.extend_from_slice(tail);
                    if !tail.is_empty() && !rest.is_empty() {
                        next.push(b'/');
                    }
                    next.extend_from_slice(rest);
                    buf = next;
                    pos = 0;

                    node = fs.node(fs.root()).child();
                    above = Some(fs.root());
                    left = None;
                    continue;
                }

                if entry.is_mountpoint() {
                    // Sibling context does not survive a softlink jump onto
                    // a mountpoint.
                    let (peer, parent) = if from_link { (None, None) } else { (left, above) };
                    return Ok(Lookup::Mountpoint {
                        node: cur,
                        peer,
                        parent,
                        relpath: owned_path(&buf[pos..]),
                    });
                }

                above = Some(cur);
                left = None;
                node = entry.child();
            }
        }
    }

    Ok(Lookup::Miss {
        peer: left,
        parent: above,
        relpath: owned_path(&buf[pos..]),
    })
}

/// Chase a (possibly chained) softlink to its final target.
///
/// A non-softlink input is returned unchanged with no sibling context. Each
/// dereference runs a fresh no-follow lookup of the stored target path; the
/// chain is cut off once the traversal budget is spent.
#[cfg(feature = "softlinks")]
pub(crate) fn link_target(fs: &PseudoFs, link: NodeId) -> Result<Lookup, Error> {
    let mut node = link;
    let mut peer = None;
    let mut parent = None;
    let mut traversals: usize = 0;

    loop {
        let entry = fs.get(node).ok_or_else(|| ErrorImpl::InvalidArgument {
            name: "link".into(),
            description: "node id does not refer to a live node".into(),
        })?;
        let target = match entry.kind() {
            NodeKind::Softlink(target) => target,
            _ => return Ok(Lookup::Complete { node, peer, parent }),
        };

        traversals += 1;
        if traversals > MAX_LINK_TRAVERSALS {
            return Err(ErrorImpl::LinkLoop {
                description: "softlink chain exceeds the traversal budget".into(),
            }
            .into());
        }

        match lookup(fs, target, LookupFlags::NO_FOLLOW_TRAILING)? {
            Lookup::Complete {
                node: next,
                peer: next_peer,
                parent: next_parent,
            } => {
                node = next;
                peer = next_peer;
                parent = next_parent;
            }
            // A dangling link (miss) or a mountpoint absorbing the target
            // path both end the chase; the caller gets the sub-lookup as-is.
            other => return Ok(other),
        }
    }
}
