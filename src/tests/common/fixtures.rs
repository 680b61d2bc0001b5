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

//! Shared test trees.

use crate::{NodeId, NodeKind, PseudoFs};

use once_cell::sync::Lazy;

/// The tree the search scenarios run against:
///
/// ```text
/// /
///   bin
///     ls
///     sh
///   dev
///     null
///   mnt [mount]
/// ```
pub(crate) struct Demo {
    pub(crate) fs: PseudoFs,
    pub(crate) bin: NodeId,
    pub(crate) ls: NodeId,
    pub(crate) sh: NodeId,
    pub(crate) dev: NodeId,
    pub(crate) null: NodeId,
    pub(crate) mnt: NodeId,
}

pub(crate) static DEMO: Lazy<Demo> = Lazy::new(|| {
    let mut fs = PseudoFs::new();
    let ls = fs.insert("/bin/ls", NodeKind::Ordinary).expect("insert /bin/ls");
    let sh = fs.insert("/bin/sh", NodeKind::Ordinary).expect("insert /bin/sh");
    let null = fs
        .insert("/dev/null", NodeKind::Ordinary)
        .expect("insert /dev/null");
    let mnt = fs.insert("/mnt", NodeKind::Mountpoint).expect("insert /mnt");

    let bin = fs[fs.root()].child().expect("root has children");
    let dev = fs[bin].peer().expect("/bin has a peer");
    Demo {
        fs,
        bin,
        ls,
        sh,
        dev,
        null,
        mnt,
    }
});

/// Softlinks into a real directory:
///
/// ```text
/// /
///   etc
///     conf -> /real/conf
///     dirlink -> /real
///   real
///     conf
/// ```
#[cfg(feature = "softlinks")]
pub(crate) struct Linked {
    pub(crate) fs: PseudoFs,
    pub(crate) etc: NodeId,
    pub(crate) conf_link: NodeId,
    pub(crate) real: NodeId,
    pub(crate) conf: NodeId,
}

#[cfg(feature = "softlinks")]
pub(crate) static LINKED: Lazy<Linked> = Lazy::new(|| {
    let mut fs = PseudoFs::new();
    let conf_link = fs
        .insert("/etc/conf", NodeKind::Softlink("/real/conf".into()))
        .expect("insert /etc/conf");
    fs.insert("/etc/dirlink", NodeKind::Softlink("/real".into()))
        .expect("insert /etc/dirlink");
    let conf = fs
        .insert("/real/conf", NodeKind::Ordinary)
        .expect("insert /real/conf");

    let etc = fs[fs.root()].child().expect("root has children");
    let real = fs[etc].peer().expect("/etc has a peer");
    Linked {
        fs,
        etc,
        conf_link,
        real,
        conf,
    }
});

/// Softlinks whose targets run into a mountpoint:
///
/// ```text
/// /
///   etc
///     conf -> /real/mnt
///     deep -> /real/mnt/sub
///   real
///     conf
///     mnt [mount]
/// ```
#[cfg(feature = "softlinks")]
pub(crate) struct MountLinked {
    pub(crate) fs: PseudoFs,
    pub(crate) conf: NodeId,
    pub(crate) mnt: NodeId,
    pub(crate) real: NodeId,
}

#[cfg(feature = "softlinks")]
pub(crate) static MOUNT_LINKED: Lazy<MountLinked> = Lazy::new(|| {
    let mut fs = PseudoFs::new();
    fs.insert("/etc/conf", NodeKind::Softlink("/real/mnt".into()))
        .expect("insert /etc/conf");
    fs.insert("/etc/deep", NodeKind::Softlink("/real/mnt/sub".into()))
        .expect("insert /etc/deep");
    let conf = fs
        .insert("/real/conf", NodeKind::Ordinary)
        .expect("insert /real/conf");
    let mnt = fs
        .insert("/real/mnt", NodeKind::Mountpoint)
        .expect("insert /real/mnt");

    let etc = fs[fs.root()].child().expect("root has children");
    let real = fs[etc].peer().expect("/etc has a peer");
    MountLinked { fs, conf, mnt, real }
});

/// `a -> /b -> /a`, plus a link pointing straight at itself.
#[cfg(feature = "softlinks")]
pub(crate) fn cyclic_fs() -> PseudoFs {
    let mut fs = PseudoFs::new();
    fs.insert("/a", NodeKind::Softlink("/b".into()))
        .expect("insert /a");
    fs.insert("/b", NodeKind::Softlink("/a".into()))
        .expect("insert /b");
    fs.insert("/me", NodeKind::Softlink("/me".into()))
        .expect("insert /me");
    fs
}

/// A straight chain of `links` softlinks ending in an ordinary node named
/// `end`: `l00 -> /l01 -> ... -> /end`.
#[cfg(feature = "softlinks")]
pub(crate) fn chain_fs(links: usize) -> PseudoFs {
    let mut fs = PseudoFs::new();
    for i in 0..links {
        let target = if i + 1 == links {
            "/end".to_string()
        } else {
            format!("/l{:02}", i + 1)
        };
        fs.insert(format!("/l{i:02}"), NodeKind::Softlink(target.into()))
            .expect("insert chain link");
    }
    fs.insert("/end", NodeKind::Ordinary).expect("insert /end");
    fs
}
