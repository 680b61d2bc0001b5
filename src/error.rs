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

//! Error types for pseudofs.
//!
//! Lookup misses are not errors (they are [`Lookup::Miss`] outcomes carrying
//! insertion context); an [`Error`] means the request itself could not be
//! carried out -- a malformed path, an exhausted link-traversal budget, or a
//! structural operation that cannot be applied.
//!
//! [`Lookup::Miss`]: crate::Lookup

use std::{borrow::Cow, path::PathBuf};

/// Opaque error type for pseudofs.
///
/// If you wish to do non-trivial error handling with pseudofs errors, use
/// [`Error::kind`] to get an [`ErrorKind`] you can handle programmatically.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] Box<ErrorImpl>);

impl<E: Into<ErrorImpl>> From<E> for Error {
    #[doc(hidden)]
    fn from(err: E) -> Self {
        Self(Box::new(err.into()))
    }
}

impl Error {
    /// Get the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    /// Shorthand for [`.kind().errno()`](ErrorKind::errno).
    pub fn errno(&self) -> i32 {
        self.0.kind().errno()
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ErrorImpl {
    #[error("invalid {name} argument: {description}")]
    InvalidArgument {
        name: Cow<'static, str>,
        description: Cow<'static, str>,
    },

    #[cfg(feature = "softlinks")]
    #[error("too many levels of softlinks: {description}")]
    LinkLoop { description: Cow<'static, str> },

    #[error("no such node: {path:?}")]
    NotFound { path: PathBuf },

    #[error("node already exists: {path:?}")]
    Exists { path: PathBuf },

    #[error("node still has children: {path:?}")]
    NotEmpty { path: PathBuf },

    #[error("path is absorbed by a mountpoint: {path:?}")]
    MountCrossing { path: PathBuf },

    #[error("{context}")]
    Wrapped {
        context: Cow<'static, str>,
        source: Box<ErrorImpl>,
    },
}

/// Underlying error class for pseudofs errors.
///
/// This is similar in concept to [`std::io::ErrorKind`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The provided arguments to pseudofs were invalid.
    InvalidArgument,
    /// A chain of softlinks exceeded the traversal budget
    /// ([`MAX_LINK_TRAVERSALS`]), or softlink traversal was disabled for the
    /// lookup and a softlink was encountered anyway.
    ///
    /// [`MAX_LINK_TRAVERSALS`]: crate::MAX_LINK_TRAVERSALS
    #[cfg(feature = "softlinks")]
    LinkLoop,
    /// The named node does not exist.
    NotFound,
    /// A node with the requested name already exists.
    Exists,
    /// The node cannot be removed because it still has children.
    NotEmpty,
    /// The path descends into territory owned by a mounted filesystem, which
    /// pseudofs cannot modify.
    MountCrossing,
}

impl ErrorImpl {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            #[cfg(feature = "softlinks")]
            Self::LinkLoop { .. } => ErrorKind::LinkLoop,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Exists { .. } => ErrorKind::Exists,
            Self::NotEmpty { .. } => ErrorKind::NotEmpty,
            Self::MountCrossing { .. } => ErrorKind::MountCrossing,
            Self::Wrapped { source, .. } => source.kind(),
        }
    }
}

impl ErrorKind {
    /// Return a C-like errno for the [`ErrorKind`].
    ///
    /// Callers embedding pseudofs behind a POSIX-flavoured interface can use
    /// this to translate errors into the classic error numbers.
    pub fn errno(&self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => libc::EINVAL,
            #[cfg(feature = "softlinks")]
            ErrorKind::LinkLoop => libc::ELOOP,
            ErrorKind::NotFound => libc::ENOENT,
            ErrorKind::Exists => libc::EEXIST,
            ErrorKind::NotEmpty => libc::ENOTEMPTY,
            ErrorKind::MountCrossing => libc::EXDEV,
        }
    }
}

// Private trait necessary to work around the "orphan trait" restriction.
pub(crate) trait ErrorExt: Sized {
    /// Wrap a `Result<..., Error>` with an additional context string.
    fn wrap<S: Into<String>>(self, context: S) -> Self {
        self.with_wrap(|| context.into())
    }

    /// Wrap a `Result<..., Error>` with an additional context string created by
    /// a closure.
    fn with_wrap<F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> String;
}

impl ErrorExt for ErrorImpl {
    fn with_wrap<F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> String,
    {
        Self::Wrapped {
            context: context_fn().into(),
            source: self.into(),
        }
    }
}

impl ErrorExt for Error {
    fn with_wrap<F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.0.with_wrap(context_fn).into()
    }
}

impl<T, E: ErrorExt> ErrorExt for Result<T, E> {
    fn with_wrap<F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| err.with_wrap(context_fn))
    }
}
