//! `{}` placeholder substitution
//!
//! Placeholders are filled left to right. Surplus arguments are ignored and
//! surplus placeholders stay literal. `\{}` produces a literal `{}` without
//! consuming an argument, and `\\{}` produces one backslash followed by the
//! next argument. A trailing error argument is never substituted; it is
//! returned separately as the record's error candidate.

use super::error_chain::ErrorChain;
use super::log_arg::LogArg;
use std::sync::Arc;

const DELIM: &str = "{}";
const ESCAPE: u8 = b'\\';

/// The substituted message and any error split off the arguments.
pub struct FormattedMessage {
    pub message: String,
    pub error: Option<Arc<dyn ErrorChain>>,
}

/// Substitute `args` into `template`.
pub fn format_message(template: &str, args: &[LogArg]) -> FormattedMessage {
    let (args, error) = match args.split_last() {
        Some((LogArg::Error(error), rest)) => (rest, Some(Arc::clone(error))),
        _ => (args, None),
    };

    FormattedMessage {
        message: substitute(template, args),
        error,
    }
}

fn substitute(template: &str, args: &[LogArg]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut i = 0;
    let mut arg_index = 0;

    while arg_index < args.len() {
        let Some(offset) = template[i..].find(DELIM) else {
            break;
        };
        let j = i + offset;

        let escaped = j >= 1 && bytes[j - 1] == ESCAPE;
        let double_escaped = j >= 2 && bytes[j - 2] == ESCAPE;

        if escaped && !double_escaped {
            // Drop the escape, keep `{` and continue scanning after it.
            out.push_str(&template[i..j - 1]);
            out.push('{');
            i = j + 1;
        } else if escaped {
            // `\\{}`: the first backslash escapes the second.
            out.push_str(&template[i..j - 1]);
            args[arg_index].render_into(&mut out);
            arg_index += 1;
            i = j + DELIM.len();
        } else {
            out.push_str(&template[i..j]);
            args[arg_index].render_into(&mut out);
            arg_index += 1;
            i = j + DELIM.len();
        }
    }

    out.push_str(&template[i..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_chain::ErrorRecord;

    fn fmt(template: &str, args: &[LogArg]) -> String {
        format_message(template, args).message
    }

    #[test]
    fn test_sequential_substitution() {
        assert_eq!(
            fmt("testing:{},{}", &["test log".into(), "format".into()]),
            "testing:test log,format"
        );
    }

    #[test]
    fn test_missing_and_extra_arguments() {
        assert_eq!(fmt("a={} b={}", &[1.into()]), "a=1 b={}");
        assert_eq!(fmt("a={}", &[1.into(), 2.into()]), "a=1");
        assert_eq!(fmt("no placeholders", &[1.into()]), "no placeholders");
        assert_eq!(fmt("{}", &[]), "{}");
    }

    #[test]
    fn test_escaped_placeholders() {
        assert_eq!(fmt("set \\{} to {}", &["x".into()]), "set {} to x");
        assert_eq!(fmt("path C:\\\\{}", &["dir".into()]), "path C:\\dir");
    }

    #[test]
    fn test_adjacent_and_unicode() {
        assert_eq!(fmt("{}{}", &["a".into(), "b".into()]), "ab");
        assert_eq!(fmt("ünï {} ç", &["ø".into()]), "ünï ø ç");
    }

    #[test]
    fn test_trailing_error_is_split_off() {
        let error = LogArg::from(ErrorRecord::new("boom"));
        let formatted = format_message("failed {} {}", &["step".into(), error]);
        assert_eq!(formatted.message, "failed step {}");
        assert_eq!(formatted.error.unwrap().description(), "boom");
    }

    #[test]
    fn test_non_trailing_error_is_substituted() {
        let error = LogArg::from(ErrorRecord::new("boom"));
        let formatted = format_message("{} then {}", &[error, "ok".into()]);
        assert_eq!(formatted.message, "boom then ok");
        assert!(formatted.error.is_none());
    }
}
