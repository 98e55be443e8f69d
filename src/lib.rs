// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Simple crate for looking up command-line options by name.
//!
//! Rather than declaring the options a program supports up-front, the
//! command-line is parsed into a store that can be queried for any option
//! name, with typed lookups and default values.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Quickstart](#quickstart)
//! * [Details](#details)
//! * [Option syntax](#option-syntax)
//! * [Lookups](#lookups)
//! * [Negated options](#negated-options)
//! * [Settings](#settings)
//! * [Logging](#logging)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Quickstart
//!
//! 1. Parse the command-line:
//!
//!    ```rust
//!    use getarg::parse_parameters;
//!
//!    // Normally you'd call `ArgStore::from_env()`.
//!    let store = parse_parameters(vec!["-threads=4", "--verbose", "-nocolor"]);
//!    ```
//!
//! 1. Query the store:
//!
//!    ```rust
//!    # use getarg::parse_parameters;
//!    #
//!    # let store = parse_parameters(vec!["-threads=4", "--verbose", "-nocolor"]);
//!    #
//!    assert_eq!(store.get_int("-threads", 1), 4);
//!    assert_eq!(store.get_str("-datadir", "/tmp"), "/tmp");
//!    assert!(store.get_bool("-verbose"));
//!    assert!(!store.get_bool_or("-color", true));
//!    ```
//!
//! # Details
//!
//! ## Option syntax
//!
//! - An option is an argument starting with a dash. One or two dashes may
//!   be used: `-foo` and `--foo` are the same option.
//! - An option may be given a value by appending `=` and the value:
//!   `-foo=bar`. Only the first `=` is significant, so `-foo=a=b` has the
//!   value `a=b`.
//! - `-foo=` gives the option an empty value, which is distinct from the
//!   option not being specified at all.
//! - Options can be specified multiple times. The last value wins, but all
//!   values are available (see [ArgStore::get_all()]).
//! - Arguments that do not start with a dash are ignored.
//! - The special argument `--` ends option parsing: all arguments that
//!   follow it are ignored.
//!
//! ## Lookups
//!
//! Lookups never fail: if an option was not specified, the default value
//! given by the caller is returned.
//!
//! | Method | Option not specified | `-foo` | `-foo=` | `-foo=0` | `-foo=12` | `-foo=bar` |
//! |-|-|-|-|-|-|-|
//! | [ArgStore::get_str()] | default | `""` | `""` | `"0"` | `"12"` | `"bar"` |
//! | [ArgStore::get_int()] | default | `0` | `0` | `0` | `12` | `0` |
//! | [ArgStore::get_bool_or()] | default | `true` | `true` | `false` | `true` | `true` |
//!
//! > **Note:** A malformed integer value returns `0`, **not** the default.
//! > Use [ArgStore::try_get_int()] to detect this.
//!
//! ## Negated options
//!
//! A boolean option `-foo` can be turned off with `-nofoo`:
//!
//! ```rust
//! # use getarg::parse_parameters;
//! #
//! let store = parse_parameters(vec!["-nofoo"]);
//! assert!(!store.get_bool_or("-foo", true));
//!
//! // -nofoo=0 means "do not negate".
//! let store = parse_parameters(vec!["-nofoo=0"]);
//! assert!(store.get_bool_or("-foo", false));
//! ```
//!
//! If both forms are specified, the direct form always wins, whatever the
//! order:
//!
//! ```rust
//! # use getarg::parse_parameters;
//! #
//! let store = parse_parameters(vec!["-foo", "-nofoo"]);
//! assert!(store.get_bool("-foo"));
//!
//! let store = parse_parameters(vec!["-nofoo", "-foo"]);
//! assert!(store.get_bool("-foo"));
//! ```
//!
//! Negation only affects boolean lookups: `-nofoo` does not give `-foo` a
//! string or integer value.
//!
//! ## Settings
//!
//! [parse_parameters_with()] accepts a [Settings] value to change the
//! parsers behaviour:
//!
//! ```rust
//! use getarg::{parse_parameters_with, Error, Settings};
//!
//! let settings = Settings::new().strict();
//!
//! let result = parse_parameters_with(vec!["-a", "---b"], &settings);
//! assert_eq!(result, Err(Error::TooManyDashes("---b".into())));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://crates.io/crates/tracing) events at
//! `debug` and `trace` level. No subscriber is installed.
//!
//! # Limitations
//!
//! - Option values must be attached with `=`: `-foo bar` is the flag `-foo`
//!   followed by the (ignored) positional argument `bar`.
//! - Option bundling is not supported: `-abc` is the option `abc`.
//! - Option names are case sensitive.
//! - Positional arguments are not recorded.

mod args;
mod error;
mod store;

pub use error::{Error, Result};

pub use args::{get_args, tokenize, tokenize_with, ParsedOption, Settings, DEFAULT_NEGATION_PREFIX};

pub use store::{interpret_boolean, parse_parameters, parse_parameters_with, ArgStore};
