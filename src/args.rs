// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::borrow::Cow;
use std::env;
use std::ffi::OsString;

use tracing::debug;

use crate::error::{Error, Result};

pub(crate) const OPT_PREFIX: char = '-';

/// Separates an option name from its value (`-name=value`).
const VALUE_SEPARATOR: char = '=';

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are ignored (even if they start
/// with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";

/// Maximum number of leading dashes accepted by [Settings::strict] parsing.
const MAX_OPT_DASHES: usize = 2;

/// Default prefix that turns an option into the negated form of another
/// (`-noverbose` negates `-verbose`).
pub const DEFAULT_NEGATION_PREFIX: &str = "no";

/// Settings used to control the parsers behaviour.
#[derive(Clone, Debug, Eq, Ord, PartialOrd, PartialEq)]
pub struct Settings {
    /// If set, malformed option arguments are reported as errors rather
    /// than being silently ignored.
    strict: bool,

    /// If set, stop scanning at the first positional (non-option) argument.
    stop_at_positional: bool,

    /// Literal prefix that marks a negated option.
    negation_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            strict: false,
            stop_at_positional: false,
            negation_prefix: DEFAULT_NEGATION_PREFIX.into(),
        }
    }
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify that malformed options should generate an error.
    ///
    /// By default, an argument that looks like an option but has no name
    /// (`-`, `-=foo`) is skipped and any number of leading dashes is
    /// accepted. With this setting:
    ///
    /// - A nameless option fails with [Error::MissingOptName].
    /// - An option with more than two leading dashes (`---foo`) fails with
    ///   [Error::TooManyDashes].
    pub fn strict(self) -> Self {
        Settings {
            strict: true,
            ..self
        }
    }

    /// Stop parsing at the first argument that does not start with a dash.
    ///
    /// By default positional arguments are skipped and the options that
    /// follow them are still recorded.
    ///
    /// # Example
    ///
    /// For the command-line `-a file -b`:
    ///
    /// - By default, both `-a` and `-b` are recorded.
    /// - With this setting, only `-a` is recorded.
    pub fn stop_at_positional(self) -> Self {
        Settings {
            stop_at_positional: true,
            ..self
        }
    }

    /// Specify the prefix used to negate a boolean option.
    ///
    /// An empty prefix disables negation handling entirely.
    pub fn negation_prefix(self, prefix: &str) -> Self {
        Settings {
            negation_prefix: prefix.into(),
            ..self
        }
    }

    pub(crate) fn negation(&self) -> &str {
        &self.negation_prefix
    }
}

/// A single option found on the command-line.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct ParsedOption {
    /// Canonical option name: the name with exactly one leading dash.
    pub name: String,

    /// Value specified after the first `=`.
    ///
    /// # Notes
    ///
    /// - This will be [None] if no `=` was specified (`-foo`).
    /// - This will be an empty string for `-foo=`.
    pub value: Option<String>,
}

impl ParsedOption {
    /// Create a new option. The name is canonicalised.
    pub fn new(name: &str, value: Option<&str>) -> Self {
        ParsedOption {
            name: format!("{}{}", OPT_PREFIX, name.trim_start_matches(OPT_PREFIX)),
            value: value.map(String::from),
        }
    }
}

/// How a single command-line argument was interpreted.
#[derive(Debug, PartialEq)]
enum Token {
    Option(ParsedOption),
    /// Option introduced by more dashes than [MAX_OPT_DASHES].
    Overdashed(ParsedOption),
    /// Looks like an option, but has no name.
    Nameless,
    Positional,
    EndOfOptions,
}

fn classify(arg: &str) -> Token {
    if !arg.starts_with(OPT_PREFIX) {
        return Token::Positional;
    }

    if arg == END_OF_OPTIONS {
        return Token::EndOfOptions;
    }

    // Only the first separator counts: "-a=b=c" has the value "b=c".
    let (lhs, value) = match arg.split_once(VALUE_SEPARATOR) {
        Some((lhs, value)) => (lhs, Some(value)),
        None => (arg, None),
    };

    let name = lhs.trim_start_matches(OPT_PREFIX);

    if name.is_empty() {
        return Token::Nameless;
    }

    let option = ParsedOption::new(name, value);

    if lhs.len() - name.len() > MAX_OPT_DASHES {
        Token::Overdashed(option)
    } else {
        Token::Option(option)
    }
}

/// Convert an option name into the form used as a key: exactly one
/// leading dash. Returns [None] if the name is empty once the dashes
/// are removed.
pub(crate) fn canonical_name(name: &str) -> Option<Cow<'_, str>> {
    let bare = name.trim_start_matches(OPT_PREFIX);

    if bare.is_empty() {
        None
    } else if name.len() - bare.len() == 1 {
        Some(Cow::Borrowed(name))
    } else {
        Some(Cow::Owned(format!("{}{}", OPT_PREFIX, bare)))
    }
}

/// Extract the options from a list of command-line arguments
/// (without the program name).
///
/// Positional arguments and nameless options are skipped; the special
/// `--` argument ends the scan.
pub fn tokenize<I>(cli_args: I) -> Vec<ParsedOption>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut options = Vec::new();

    for cli_arg in cli_args {
        let cli_arg = cli_arg.as_ref();

        match classify(cli_arg) {
            Token::Option(option) | Token::Overdashed(option) => options.push(option),
            Token::EndOfOptions => break,
            Token::Nameless | Token::Positional => {
                debug!(arg = cli_arg, "ignoring non-option argument")
            }
        }
    }

    options
}

/// Like [tokenize()], but honouring the specified [Settings].
///
/// # Errors
///
/// Only fails when [Settings::strict] is set, see that method for details.
pub fn tokenize_with<I>(cli_args: I, settings: &Settings) -> Result<Vec<ParsedOption>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut options = Vec::new();

    for cli_arg in cli_args {
        let cli_arg = cli_arg.as_ref();

        match classify(cli_arg) {
            Token::Option(option) => options.push(option),
            Token::Overdashed(_) if settings.strict => {
                return Err(Error::TooManyDashes(cli_arg.into()))
            }
            Token::Overdashed(option) => options.push(option),
            Token::Nameless if settings.strict => return Err(Error::MissingOptName),
            Token::Nameless => debug!(arg = cli_arg, "ignoring nameless option"),
            Token::Positional if settings.stop_at_positional => {
                debug!(arg = cli_arg, "stopping at positional argument");
                break;
            }
            Token::Positional => debug!(arg = cli_arg, "ignoring positional argument"),
            Token::EndOfOptions => break,
        }
    }

    Ok(options)
}

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
///
/// # Note
///
/// Arguments that are not valid UTF-8 are converted lossily: invalid
/// sequences are replaced with `U+FFFD`.
pub fn get_args() -> Vec<String> {
    lossy_args(env::args_os().skip(1))
}

fn lossy_args<I>(os_args: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    os_args
        .into_iter()
        .map(|os_arg| match os_arg.into_string() {
            Ok(arg) => arg,
            Err(os_arg) => {
                let arg = os_arg.to_string_lossy().into_owned();

                debug!(arg = %arg, "replaced invalid UTF-8 in argument");

                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(name: &str, value: Option<&str>) -> ParsedOption {
        ParsedOption {
            name: name.into(),
            value: value.map(String::from),
        }
    }

    #[test]
    fn test_settings() {
        let new_settings = Settings::new();
        let def_settings = Settings::default();

        assert_eq!(new_settings.strict, false);
        assert_eq!(new_settings.stop_at_positional, false);
        assert_eq!(new_settings.negation(), DEFAULT_NEGATION_PREFIX);
        assert_eq!(new_settings, def_settings);

        let settings = Settings::new()
            .strict()
            .stop_at_positional()
            .negation_prefix("without-");

        assert_eq!(settings.strict, true);
        assert_eq!(settings.stop_at_positional, true);
        assert_eq!(settings.negation(), "without-");
    }

    #[test]
    fn test_parsed_option() {
        assert_eq!(ParsedOption::new("foo", None), opt("-foo", None));
        assert_eq!(ParsedOption::new("-foo", Some("")), opt("-foo", Some("")));
        assert_eq!(ParsedOption::new("--foo", Some("1")), opt("-foo", Some("1")));
        assert_eq!(ParsedOption::default().value, None);
    }

    #[test]
    fn test_canonical_name() {
        let tests = &[
            ("", None),
            ("-", None),
            ("--", None),
            ("a", Some("-a")),
            ("-a", Some("-a")),
            ("--a", Some("-a")),
            ("---a", Some("-a")),
            ("-foo-bar", Some("-foo-bar")),
        ];

        for (i, (name, expected)) in tests.iter().enumerate() {
            let msg = format!("test[{}]: name: {:?}", i, name);

            let result = canonical_name(name);

            assert_eq!(result.as_deref(), *expected, "{}", msg);
        }

        assert!(matches!(canonical_name("-a"), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_classify() {
        let tests = &[
            ("foo", Token::Positional),
            ("", Token::Positional),
            ("=1", Token::Positional),
            ("--", Token::EndOfOptions),
            ("-", Token::Nameless),
            ("-=1", Token::Nameless),
            ("--=", Token::Nameless),
            ("-a", Token::Option(opt("-a", None))),
            ("--a", Token::Option(opt("-a", None))),
            ("-a=", Token::Option(opt("-a", Some("")))),
            ("-a=b=c", Token::Option(opt("-a", Some("b=c")))),
            ("---a=1", Token::Overdashed(opt("-a", Some("1")))),
            ("-a-b", Token::Option(opt("-a-b", None))),
            ("-a =1", Token::Option(opt("-a ", Some("1")))),
        ];

        for (i, (arg, expected)) in tests.iter().enumerate() {
            let msg = format!("test[{}]: arg: {:?}", i, arg);

            assert_eq!(classify(arg), *expected, "{}", msg);
        }
    }

    #[test]
    fn test_tokenize() {
        #[derive(Debug)]
        struct TestData<'a> {
            cli_args: Vec<&'a str>,
            result: Vec<ParsedOption>,
        }

        let tests = &[
            TestData {
                cli_args: vec![],
                result: vec![],
            },
            TestData {
                cli_args: vec!["-JLC"],
                result: vec![opt("-JLC", None)],
            },
            TestData {
                cli_args: vec!["-JLC="],
                result: vec![opt("-JLC", Some(""))],
            },
            TestData {
                cli_args: vec!["--JLC=verbose", "--bar=1"],
                result: vec![opt("-JLC", Some("verbose")), opt("-bar", Some("1"))],
            },
            TestData {
                cli_args: vec!["-JLC=11", "-JLC=12"],
                result: vec![opt("-JLC", Some("11")), opt("-JLC", Some("12"))],
            },
            TestData {
                cli_args: vec!["posn", "-a", "another posn", "-b=2"],
                result: vec![opt("-a", None), opt("-b", Some("2"))],
            },
            TestData {
                cli_args: vec!["-a", "-", "-=x", "-b"],
                result: vec![opt("-a", None), opt("-b", None)],
            },
            TestData {
                cli_args: vec!["-a", "--", "-b"],
                result: vec![opt("-a", None)],
            },
            TestData {
                cli_args: vec!["---a"],
                result: vec![opt("-a", None)],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = tokenize(&d.cli_args);

            let msg = format!("{}, result: {:?}", msg, result);

            assert_eq!(result, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_tokenize_with() {
        #[derive(Debug)]
        struct TestData<'a> {
            cli_args: Vec<&'a str>,
            settings: Settings,
            result: Result<Vec<ParsedOption>>,
        }

        let tests = &[
            TestData {
                cli_args: vec!["-a", "posn", "-b"],
                settings: Settings::new(),
                result: Ok(vec![opt("-a", None), opt("-b", None)]),
            },
            TestData {
                cli_args: vec!["-a", "posn", "-b"],
                settings: Settings::new().stop_at_positional(),
                result: Ok(vec![opt("-a", None)]),
            },
            TestData {
                cli_args: vec!["posn", "-a"],
                settings: Settings::new().stop_at_positional(),
                result: Ok(vec![]),
            },
            TestData {
                cli_args: vec!["-a", "-"],
                settings: Settings::new(),
                result: Ok(vec![opt("-a", None)]),
            },
            TestData {
                cli_args: vec!["-a", "-"],
                settings: Settings::new().strict(),
                result: Err(Error::MissingOptName),
            },
            TestData {
                cli_args: vec!["--=1"],
                settings: Settings::new().strict(),
                result: Err(Error::MissingOptName),
            },
            TestData {
                cli_args: vec!["---a=1"],
                settings: Settings::new(),
                result: Ok(vec![opt("-a", Some("1"))]),
            },
            TestData {
                cli_args: vec!["---a=1"],
                settings: Settings::new().strict(),
                result: Err(Error::TooManyDashes("---a=1".into())),
            },
            TestData {
                cli_args: vec!["--a=1", "posn", "-b"],
                settings: Settings::new().strict(),
                result: Ok(vec![opt("-a", Some("1")), opt("-b", None)]),
            },
            TestData {
                // Malformed arguments after the end of options are not seen.
                cli_args: vec!["-a", "--", "-", "---b"],
                settings: Settings::new().strict(),
                result: Ok(vec![opt("-a", None)]),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = tokenize_with(&d.cli_args, &d.settings);

            let msg = format!("{}, result: {:?}", msg, result);

            assert_eq!(result, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_lossy_args() {
        let os_args: Vec<OsString> = vec!["-a=1".into(), "posn".into(), "--b".into()];

        assert_eq!(lossy_args(os_args), vec!["-a=1", "posn", "--b"]);
        assert!(lossy_args(Vec::new()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_lossy_args_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let os_args = vec![
            OsString::from("-a=1"),
            OsString::from_vec(b"-b=\xff".to_vec()),
            OsString::from_vec(b"-\xfe=2".to_vec()),
        ];

        let cli_args = lossy_args(os_args);

        assert_eq!(cli_args, vec!["-a=1", "-b=\u{FFFD}", "-\u{FFFD}=2"]);

        assert_eq!(
            tokenize(&cli_args),
            vec![
                opt("-a", Some("1")),
                opt("-b", Some("\u{FFFD}")),
                opt("-\u{FFFD}", Some("2")),
            ]
        );
    }

    #[test]
    fn test_tokenize_accepts_owned_strings() {
        let cli_args: Vec<String> = vec!["-a=1".into(), "--b".into()];

        assert_eq!(
            tokenize(cli_args),
            vec![opt("-a", Some("1")), opt("-b", None)]
        );
    }
}
