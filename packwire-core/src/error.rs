// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error type shared by every read and write path.
//!
//! Constructors are `#[cold]` and `#[track_caller]`: they sit on the error edge
//! of every buffer access, and keeping them out of line lets the successful
//! path stay small enough to inline.

use std::borrow::Cow;

use thiserror::Error;

/// Set `PACKWIRE_PANIC_ON_ERROR=1` at compile time to panic where an error is built.
pub const PANIC_ON_ERROR: bool = option_env!("PACKWIRE_PANIC_ON_ERROR").is_some();

#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for packwire serialization and deserialization.
///
/// Always build errors through the constructor functions ([`Error::invalid_payload`],
/// [`Error::out_of_data`], ...) rather than the variants, so the
/// `PACKWIRE_PANIC_ON_ERROR` switch applies uniformly.
///
/// ```bash
/// RUST_BACKTRACE=1 PACKWIRE_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A value that cannot be represented on the wire, or a payload whose
    /// content is not a valid encoding of the requested type.
    #[error("{0}")]
    InvalidPayload(Cow<'static, str>),

    /// Structurally unsupported input, such as a multi-dimensional array.
    #[error("{0}")]
    UnsupportedShape(Cow<'static, str>),

    /// The reader ran out of input: `offset + wanted > len`.
    #[error("Out of data: {0} + {1} > {2}")]
    OutOfData(usize, usize, usize),

    /// A tag or marker value outside the closed set the reader understands.
    #[error("Unknown {0}: {1}")]
    UnknownTag(&'static str, u32),

    /// Mutation of a read-only buffer.
    #[error("{0}")]
    InvalidOperation(Cow<'static, str>),

    /// An enum discriminant that matches no variant.
    #[error("{0}")]
    UnknownEnum(Cow<'static, str>),

    /// Dynamic nesting deeper than the configured maximum.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// A type or codec name that was never registered.
    #[error("{0}")]
    NotRegistered(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::InvalidPayload`].
    ///
    /// ```
    /// use packwire_core::error::Error;
    ///
    /// let err = Error::invalid_payload(format!("string is too long, len: {}", 70_000));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_payload<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidPayload(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnsupportedShape`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported_shape<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnsupportedShape(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::OutOfData`] with the cursor, the wanted byte
    /// count and the length of the input.
    ///
    /// ```
    /// use packwire_core::error::Error;
    ///
    /// let err = Error::out_of_data(10, 4, 12);
    /// assert_eq!(err.to_string(), "Out of data: 10 + 4 > 12");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn out_of_data(offset: usize, wanted: usize, len: usize) -> Self {
        let err = Error::OutOfData(offset, wanted, len);
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownTag`]; `kind` names the closed set
    /// (`"compress type"`, `"type marker"`, ...).
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_tag(kind: &'static str, value: u32) -> Self {
        let err = Error::UnknownTag(kind, value);
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidOperation`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_operation<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidOperation(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownEnum`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_enum<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnknownEnum(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::NotRegistered`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn not_registered<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::NotRegistered(s.into());
        if PANIC_ON_ERROR {
            panic!("PACKWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns the given [`enum@Error`]
/// or an [`Error::InvalidPayload`] built from a message.
///
/// ```
/// use packwire_core::ensure;
/// use packwire_core::error::Error;
///
/// fn check_len(n: usize) -> Result<(), Error> {
///     ensure!(n <= u16::MAX as usize, "length {} too large", n);
///     ensure!(n > 0, Error::invalid_payload("empty"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::invalid_payload($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::invalid_payload(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::InvalidPayload`].
///
/// ```
/// use packwire_core::bail;
/// use packwire_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("corrupted stream");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_payload($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_payload(format!($fmt, $($arg)*)))
    };
}
