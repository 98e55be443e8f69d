// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::args::{
    canonical_name, get_args, tokenize, tokenize_with, ParsedOption, Settings, OPT_PREFIX,
};
use crate::error::{Error, Result};

/// The only option value that is considered to be "false".
const FALSE_VALUE: &str = "0";

/// Convert an option value into a boolean.
///
/// An option that is specified with no value (`-foo`), or with any value
/// other than `0` (including the empty string, as in `-foo=`), is `true`.
/// Only `-foo=0` is `false`.
pub fn interpret_boolean(value: Option<&str>) -> bool {
    value != Some(FALSE_VALUE)
}

/// If the option name is a negated option, return the canonical name of the
/// option it negates (`-nofoo` returns `-foo`).
fn negated_base(name: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }

    // "-no-color" negates "-color", not "--color".
    name.trim_start_matches(OPT_PREFIX)
        .strip_prefix(prefix)
        .and_then(canonical_name)
        .map(Cow::into_owned)
}

/// The parsed command-line options.
///
/// The store is created by [parse_parameters()] (or one of the other
/// constructors) and cannot be modified afterwards. To handle a different
/// command-line, create a new store.
///
/// # Notes
///
/// - Option names passed to the lookup methods may be specified with one
///   or two leading dashes (or none): `"-foo"`, `"--foo"` and `"foo"` all
///   refer to the same option.
/// - None of the lookup methods fail: if an option was not specified, the
///   specified default value is returned.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArgStore {
    /// Value of the last occurrence of each option.
    ///
    /// - name: canonical option name.
    /// - value: option value (empty if the option was specified without
    ///   a value).
    last_value: HashMap<String, String>,

    /// Every value specified for each option, in command-line order.
    all_values: HashMap<String, Vec<String>>,

    /// Options affected by a negated option.
    ///
    /// - name: canonical name of the option being negated.
    /// - value: `true` if the option should be considered `false`.
    negated: HashMap<String, bool>,
}

impl ArgStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ArgStore::default()
    }

    /// Create a store from a list of options using the default negation
    /// prefix.
    pub fn build<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ParsedOption>,
    {
        ArgStore::build_with(options, &Settings::default())
    }

    /// Create a store from a list of options.
    pub fn build_with<I>(options: I, settings: &Settings) -> Self
    where
        I: IntoIterator<Item = ParsedOption>,
    {
        let mut store = ArgStore::new();

        for option in options {
            if let Some(base) = negated_base(&option.name, settings.negation()) {
                let negate = interpret_boolean(option.value.as_deref());

                trace!(option = %option.name, base = %base, negate, "negated option");

                store.negated.insert(base, negate);
            }

            let value = option.value.unwrap_or_default();

            trace!(option = %option.name, value = %value, "recording option");

            store
                .all_values
                .entry(option.name.clone())
                .or_default()
                .push(value.clone());

            store.last_value.insert(option.name, value);
        }

        // A direct option always overrides its negated form,
        // irrespective of the order they were specified in.
        let last_value = &store.last_value;

        store.negated.retain(|base, _| {
            let overridden = last_value.contains_key(base);

            if overridden {
                debug!(option = %base, "direct option overrides negated form");
            }

            !overridden
        });

        store
    }

    /// Create a store from the command-line arguments of the current
    /// process.
    pub fn from_env() -> Self {
        parse_parameters(get_args())
    }

    /// Returns the number of distinct options specified.
    pub fn len(&self) -> usize {
        self.last_value.len()
    }

    /// Returns `true` if no options were specified.
    pub fn is_empty(&self) -> bool {
        self.last_value.is_empty()
    }

    /// Returns the canonical names of all options specified, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.last_value.keys().map(String::as_str).collect();

        names.sort_unstable();

        names
    }

    /// Returns the value of the last occurrence of the option.
    fn value(&self, name: &str) -> Option<&str> {
        let key = canonical_name(name)?;

        self.last_value.get(&*key).map(String::as_str)
    }

    /// Determine if the option was specified (directly, not in negated form).
    pub fn is_set(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Returns the value of the option, or `default` if it was not specified.
    ///
    /// An option specified without a value (`-foo`) or with an empty value
    /// (`-foo=`) returns an empty string, not `default`.
    pub fn get_str(&self, name: &str, default: &str) -> String {
        self.value(name).unwrap_or(default).into()
    }

    /// Returns every value specified for the option, in the order they were
    /// specified. Options specified without a value are recorded as an empty
    /// string.
    pub fn get_all(&self, name: &str) -> &[String] {
        canonical_name(name)
            .and_then(|key| self.all_values.get(&*key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the value of the option as a base-10 integer.
    ///
    /// # Return value
    ///
    /// - `Ok(None)` if the option was not specified.
    /// - `Ok(Some(value))` if the option was specified with a valid integer.
    /// - [Error::InvalidInt] if the option value is not a valid integer.
    pub fn try_get_int(&self, name: &str) -> Result<Option<i64>> {
        let value = match self.value(name) {
            Some(value) => value,
            None => return Ok(None),
        };

        value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::InvalidInt {
                name: canonical_name(name).unwrap_or_default().into_owned(),
                value: value.into(),
            })
    }

    /// Returns the value of the option as a base-10 integer, or `default`
    /// if the option was not specified.
    ///
    /// # Note
    ///
    /// If the option was specified but the value is not a valid integer
    /// (including `-foo` and `-foo=`), `0` is returned, **not** `default`.
    ///
    /// Values are parsed strictly: an optional sign followed only by decimal
    /// digits. Leading or trailing whitespace, trailing characters (`12abc`)
    /// and values outside the `i64` range are all malformed.
    pub fn get_int(&self, name: &str, default: i64) -> i64 {
        match self.try_get_int(name) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                debug!(error = %e, "using zero for malformed integer");
                0
            }
        }
    }

    /// Returns the value of the option as a boolean, defaulting to `false`.
    ///
    /// Equivalent to `get_bool_or(name, false)`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_bool_or(name, false)
    }

    /// Returns the value of the option as a boolean.
    ///
    /// The value is determined as follows:
    ///
    /// 1. If the option was specified directly, it is `true` unless the
    ///    value is `0` (see [interpret_boolean()]).
    /// 1. Otherwise, if the negated option (`-nofoo` for `-foo`) was
    ///    specified, it is `false` unless the negated option's value is `0`.
    /// 1. Otherwise, `default` is returned.
    pub fn get_bool_or(&self, name: &str, default: bool) -> bool {
        let key = match canonical_name(name) {
            Some(key) => key,
            None => return default,
        };

        if let Some(value) = self.last_value.get(&*key) {
            return interpret_boolean(Some(value.as_str()));
        }

        match self.negated.get(&*key) {
            Some(negate) => !negate,
            None => default,
        }
    }
}

/// Parse a list of command-line arguments (without the program name).
///
/// This never fails: arguments that are not options are ignored.
pub fn parse_parameters<I>(cli_args: I) -> ArgStore
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ArgStore::build(tokenize(cli_args))
}

/// Parse a list of command-line arguments (without the program name)
/// according to the specified [Settings].
///
/// # Errors
///
/// Only fails if [Settings::strict] is set, see that method for details.
pub fn parse_parameters_with<I>(cli_args: I, settings: &Settings) -> Result<ArgStore>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let options = tokenize_with(cli_args, settings)?;

    Ok(ArgStore::build_with(options, settings))
}
