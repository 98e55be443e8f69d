// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
///
/// The lenient parse and lookup functions never fail. Errors are only
/// produced by [crate::Settings::strict] parsing and by
/// [crate::ArgStore::try_get_int].
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Parse errors (strict mode only)
    //------------------------------
    /// User specified an argument that looks like an option
    /// but doesn't have a name (`-` or `-=value`).
    #[error("missing option name")]
    MissingOptName,

    /// Option names may be introduced by one or two dashes, not more.
    #[error("too many leading dashes in option {0:?}")]
    TooManyDashes(String),

    //------------------------------
    // Lookup errors
    //------------------------------
    /// Option value could not be parsed as a base-10 integer.
    #[error("invalid integer value {value:?} for option {name}")]
    InvalidInt {
        /// Canonical option name.
        name: String,
        /// The value as specified on the command-line.
        value: String,
    },
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
