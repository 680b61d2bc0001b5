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

//! The node tree.
//!
//! Nodes live in an arena ([`slab::Slab`]) and refer to each other through
//! [`NodeId`] handles: `peer` points to the next sibling, `child` to the
//! first entry of the level below. Every sibling list is kept sorted by
//! byte-wise ascending name, which is what lets the lookup walk stop early
//! and report exact insertion context on a miss. The arena owns an explicit
//! root anchor whose empty name never takes part in comparisons; the root's
//! `child` chain is the top level of the filesystem.

use crate::{
    error::{Error, ErrorExt, ErrorImpl},
    flags::LookupFlags,
    resolve::{self, Lookup},
};

use std::{
    ffi::{OsStr, OsString},
    fmt,
    ops::Index,
    os::unix::ffi::OsStrExt,
    path::Path,
};
#[cfg(feature = "softlinks")]
use std::path::PathBuf;

use slab::Slab;

/// Handle to a node in a [`PseudoFs`].
///
/// Ids are small `Copy` tokens backed by arena keys. An id stays valid until
/// its node is removed; holding on to the id of a removed node and using it
/// later is caught by [`PseudoFs::get`] (which returns [`None`]) but will
/// make indexing (`fs[id]`) panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A plain entry: a pseudo-file, or a pseudo-directory once it has
    /// children.
    Ordinary,
    /// A stand-in for a mounted filesystem. Lookup stops here and hands the
    /// unconsumed remainder of the path to the caller; whatever hangs below
    /// belongs to the mounted filesystem and is invisible to pseudofs.
    Mountpoint,
    /// A softlink holding the absolute path it points at. The target is not
    /// required to resolve.
    #[cfg(feature = "softlinks")]
    Softlink(PathBuf),
}

/// A single entry in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    name: OsString,
    kind: NodeKind,
    peer: Option<NodeId>,
    child: Option<NodeId>,
}

impl Node {
    /// The node's name. Never empty, except for the root anchor.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// The node's kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node stands in for a mounted filesystem.
    pub fn is_mountpoint(&self) -> bool {
        matches!(self.kind, NodeKind::Mountpoint)
    }

    /// Whether this node is a softlink.
    #[cfg(feature = "softlinks")]
    pub fn is_softlink(&self) -> bool {
        matches!(self.kind, NodeKind::Softlink(_))
    }

    /// The softlink target, for softlink nodes.
    #[cfg(feature = "softlinks")]
    pub fn link(&self) -> Option<&Path> {
        match &self.kind {
            NodeKind::Softlink(target) => Some(target),
            _ => None,
        }
    }

    /// The next sibling in this node's (sorted) sibling list.
    pub fn peer(&self) -> Option<NodeId> {
        self.peer
    }

    /// The first child, i.e. the head of the level below.
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub(crate) fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }
}

/// An in-memory pseudo-filesystem: an arena of named nodes plus the root
/// anchor, with path lookup, insertion and removal on top.
///
/// # Locking
///
/// `PseudoFs` contains no interior mutability and takes no locks. Lookup
/// borrows `&self` and is a pure, allocation-light tree walk that never
/// blocks; insertion and removal borrow `&mut self`. To share a tree across
/// threads, wrap it in your own `Mutex` or `RwLock` -- under an `RwLock`,
/// every lookup operation is a reader.
///
/// ```
/// use pseudofs::{NodeKind, PseudoFs};
///
/// # fn main() -> Result<(), pseudofs::error::Error> {
/// let mut fs = PseudoFs::new();
/// fs.insert("/dev/null", NodeKind::Ordinary)?;
/// fs.insert("/mnt", NodeKind::Mountpoint)?;
///
/// let null = fs.search("/dev/null")?.node().expect("/dev/null exists");
/// assert_eq!(fs[null].name(), "null");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PseudoFs {
    nodes: Slab<Node>,
    root: NodeId,
}

impl PseudoFs {
    /// Create an empty tree holding only the root anchor.
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let root = NodeId(nodes.insert(Node {
            name: OsString::new(),
            kind: NodeKind::Ordinary,
            peer: None,
            child: None,
        }));
        Self { nodes, root }
    }

    /// The root anchor. Its `child` chain is the top level of the tree; the
    /// root itself is never returned by lookup.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Fetch a node, or [`None`] if the id no longer refers to a live node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Walk the tree for `path`, dereferencing a terminal softlink.
    ///
    /// Softlinks in the middle of the path are always followed; with this
    /// entry point a path naming a softlink resolves all the way to the
    /// link's final target (or reports the miss of a dangling target). Use
    /// [`search_nofollow`](Self::search_nofollow) to get the raw link node
    /// instead.
    ///
    /// A mountpoint part-way through the path absorbs the walk and yields
    /// [`Lookup::Mountpoint`] with the residual path; a missing name yields
    /// [`Lookup::Miss`] with the context needed to insert it. The only
    /// `Err` cases are malformed paths and softlink-budget exhaustion
    /// ([`ErrorKind::LinkLoop`](crate::error::ErrorKind)).
    pub fn search(&self, path: impl AsRef<Path>) -> Result<Lookup, Error> {
        self.lookup(path, LookupFlags::empty())
    }

    /// Walk the tree for `path` without dereferencing a terminal softlink.
    ///
    /// Intermediate softlinks are still followed.
    pub fn search_nofollow(&self, path: impl AsRef<Path>) -> Result<Lookup, Error> {
        self.lookup(path, LookupFlags::NO_FOLLOW_TRAILING)
    }

    /// Walk the tree for `path` with explicit [`LookupFlags`].
    pub fn lookup(&self, path: impl AsRef<Path>, flags: LookupFlags) -> Result<Lookup, Error> {
        resolve::lookup(self, path.as_ref(), flags)
    }

    /// Chase the softlink node `link` to its final target.
    ///
    /// A non-softlink `link` is returned as-is. Chains are followed link by
    /// link and cut off with [`ErrorKind::LinkLoop`](crate::error::ErrorKind)
    /// once [`MAX_LINK_TRAVERSALS`](crate::MAX_LINK_TRAVERSALS) dereferences
    /// have been spent, so a cyclic chain fails in bounded time.
    #[cfg(feature = "softlinks")]
    pub fn link_target(&self, link: NodeId) -> Result<Lookup, Error> {
        resolve::link_target(self, link)
    }

    /// Create the node named by `path`, creating missing intermediate
    /// entries as [`NodeKind::Ordinary`] nodes.
    ///
    /// Each level is spliced into its sorted sibling position using the
    /// context reported by the lookup miss. Softlinks in the middle of the
    /// path are followed, so inserting through a link lands in the link's
    /// target directory.
    ///
    /// # Errors
    ///
    /// * [`Exists`] -- `path` already names a node (of any kind).
    /// * [`MountCrossing`] -- `path` descends below a mountpoint.
    /// * [`InvalidArgument`] -- `path` is relative, contains a NUL byte or
    ///   an empty component, or a softlink `kind` carries a non-absolute
    ///   target. Intermediate nodes created before the offending component
    ///   was reached are left in place.
    ///
    /// [`Exists`]: crate::error::ErrorKind::Exists
    /// [`MountCrossing`]: crate::error::ErrorKind::MountCrossing
    /// [`InvalidArgument`]: crate::error::ErrorKind::InvalidArgument
    pub fn insert(&mut self, path: impl AsRef<Path>, kind: NodeKind) -> Result<NodeId, Error> {
        let path = path.as_ref();

        #[cfg(feature = "softlinks")]
        if let NodeKind::Softlink(target) = &kind {
            let target = target.as_os_str().as_bytes();
            if target.first() != Some(&b'/') || memchr::memchr(b'\0', target).is_some() {
                return Err(ErrorImpl::InvalidArgument {
                    name: "kind".into(),
                    description: "softlink target must be an absolute, NUL-free path".into(),
                }
                .into());
            }
        }

        loop {
            match resolve::lookup(self, path, LookupFlags::NO_FOLLOW_TRAILING)
                .wrap("resolve insertion point")?
            {
                Lookup::Complete { .. } => {
                    return Err(ErrorImpl::Exists {
                        path: path.to_path_buf(),
                    }
                    .into())
                }
                Lookup::Mountpoint { .. } => {
                    return Err(ErrorImpl::MountCrossing {
                        path: path.to_path_buf(),
                    }
                    .into())
                }
                Lookup::Miss {
                    peer,
                    parent,
                    relpath,
                } => {
                    let rel = relpath.as_os_str().as_bytes();
                    if rel.is_empty() {
                        return Err(ErrorImpl::InvalidArgument {
                            name: "path".into(),
                            description: "path names no new component".into(),
                        }
                        .into());
                    }
                    let seg_len = memchr::memchr(b'/', rel).unwrap_or(rel.len());
                    if seg_len == 0 {
                        return Err(ErrorImpl::InvalidArgument {
                            name: "path".into(),
                            description: "path has an empty component".into(),
                        }
                        .into());
                    }
                    let seg = OsStr::from_bytes(&rel[..seg_len]).to_os_string();

                    debug_assert!(
                        parent.is_some(),
                        "a miss always reports its sibling-list owner"
                    );
                    let parent = parent.unwrap_or(self.root);

                    // Only a trailing '/' may follow the final component.
                    if rel[seg_len..].len() <= 1 {
                        return Ok(self.splice(parent, peer, seg, kind));
                    }
                    self.splice(parent, peer, seg, NodeKind::Ordinary);
                }
            }
        }
    }

    /// Unlink and return the node named by `path`.
    ///
    /// The terminal node is looked up without following it, so removing a
    /// path that names a softlink removes the link itself, not its target.
    ///
    /// # Errors
    ///
    /// * [`NotFound`] -- no such node.
    /// * [`NotEmpty`] -- the node still has children.
    /// * [`MountCrossing`] -- `path` descends below a mountpoint.
    ///
    /// [`NotFound`]: crate::error::ErrorKind::NotFound
    /// [`NotEmpty`]: crate::error::ErrorKind::NotEmpty
    /// [`MountCrossing`]: crate::error::ErrorKind::MountCrossing
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Result<Node, Error> {
        let path = path.as_ref();
        match resolve::lookup(self, path, LookupFlags::NO_FOLLOW_TRAILING)
            .wrap("resolve removal target")?
        {
            Lookup::Miss { .. } => Err(ErrorImpl::NotFound {
                path: path.to_path_buf(),
            }
            .into()),
            Lookup::Mountpoint { .. } => Err(ErrorImpl::MountCrossing {
                path: path.to_path_buf(),
            }
            .into()),
            Lookup::Complete { node, peer, parent } => {
                if self.nodes[node.0].child.is_some() {
                    return Err(ErrorImpl::NotEmpty {
                        path: path.to_path_buf(),
                    }
                    .into());
                }

                let next = self.nodes[node.0].peer;
                match peer {
                    Some(prev) => self.nodes[prev.0].peer = next,
                    None => {
                        debug_assert!(
                            parent.is_some(),
                            "a found node always reports its sibling-list owner"
                        );
                        let parent = parent.unwrap_or(self.root);
                        self.nodes[parent.0].child = next;
                    }
                }

                let mut removed = self.nodes.remove(node.0);
                removed.peer = None;
                removed.child = None;
                Ok(removed)
            }
        }
    }

    /// Splice a fresh node into its sibling list, right after `peer` (or at
    /// the head of `parent`'s child list). The caller guarantees this is the
    /// sorted position.
    fn splice(
        &mut self,
        parent: NodeId,
        peer: Option<NodeId>,
        name: OsString,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.insert(Node {
            name,
            kind,
            peer: None,
            child: None,
        }));
        match peer {
            Some(prev) => {
                self.nodes[id.0].peer = self.nodes[prev.0].peer;
                self.nodes[prev.0].peer = Some(id);
            }
            None => {
                self.nodes[id.0].peer = self.nodes[parent.0].child;
                self.nodes[parent.0].child = Some(id);
            }
        }
        id
    }

    fn fmt_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        head: Option<NodeId>,
        depth: usize,
    ) -> fmt::Result {
        let mut next = head;
        while let Some(id) = next {
            let node = self.node(id);
            write!(
                f,
                "{:indent$}{}",
                "",
                node.name().to_string_lossy(),
                indent = depth * 2
            )?;
            match node.kind() {
                NodeKind::Ordinary => writeln!(f)?,
                NodeKind::Mountpoint => writeln!(f, " [mount]")?,
                #[cfg(feature = "softlinks")]
                NodeKind::Softlink(target) => writeln!(f, " -> {}", target.display())?,
            }
            self.fmt_subtree(f, node.child(), depth + 1)?;
            next = node.peer();
        }
        Ok(())
    }
}

impl Default for PseudoFs {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for PseudoFs {
    type Output = Node;

    /// Fetch a node by id.
    ///
    /// Panics if the id does not refer to a live node; use
    /// [`PseudoFs::get`] when the id may be stale.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Indented dump of the whole tree, one node per line, in sibling order.
/// Mountpoints are tagged `[mount]` and softlinks print their target.
impl fmt::Display for PseudoFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/")?;
        self.fmt_subtree(f, self.node(self.root).child(), 1)
    }
}
