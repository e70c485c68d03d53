//! Conversion between an argument vector and a single shell-safe string.
//!
//! [`to_string`] and [`split_quoted`] are inverses:
//!
//! ```
//! use basis_platform::quote::{split_quoted, to_string};
//!
//! let args = ["a b", "c\"d", "", "plain"];
//! let line = to_string(args);
//! assert_eq!(line, r#""a b" "c\"d" "" plain"#);
//! assert_eq!(split_quoted(&line), args);
//! ```

use std::iter::Peekable;
use std::str::Chars;

const DOUBLE_QUOTE: char = '"';
const SINGLE_QUOTE: char = '\'';
const ESCAPE: char = '\\';

/// Join `args` into one command line.
///
/// Arguments that are empty, contain whitespace, or contain a quote character
/// are wrapped in double quotes with `\` and `"` escaped. Everything else is
/// emitted verbatim.
pub fn to_string<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        push_quoted(&mut line, arg.as_ref());
    }
    line
}

/// Quote a single argument the way [`to_string`] does.
pub fn quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    push_quoted(&mut out, arg);
    out
}

fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || c == DOUBLE_QUOTE || c == SINGLE_QUOTE)
}

fn push_quoted(out: &mut String, arg: &str) {
    if !needs_quoting(arg) {
        out.push_str(arg);
        return;
    }

    out.push(DOUBLE_QUOTE);
    for c in arg.chars() {
        if c == DOUBLE_QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(DOUBLE_QUOTE);
}

/// Split a command line into its arguments.
///
/// Single- and double-quoted runs are atomic and may be glued to unquoted
/// characters of the same argument. Inside a quoted run only the escapes
/// `\<quote>` and `\\` are recognised. Outside quotes a backslash is literal
/// and any run of whitespace separates two arguments.
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    // `""` must still produce an (empty) argument.
    let mut in_arg = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            DOUBLE_QUOTE | SINGLE_QUOTE => {
                in_arg = true;
                read_quoted(c, &mut chars, &mut current);
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }

    if in_arg {
        args.push(current);
    }
    args
}

// An unterminated run consumes the rest of the input.
fn read_quoted(quote: char, chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        if c == quote {
            return;
        }
        if c == ESCAPE {
            match chars.peek() {
                Some(&next) if next == quote || next == ESCAPE => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(ESCAPE),
            }
            continue;
        }
        out.push(c);
    }
}
