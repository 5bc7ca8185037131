//! Arguments substituted into message templates
//!
//! Every argument is converted once, at the call site, into a [`LogArg`]:
//! a plain value, a list, a mapping, or an error. The formatter then renders
//! each kind without inspecting types at runtime.

use super::error_chain::{ErrorChain, ErrorRecord};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub enum LogArg {
    /// Renders as `null`
    Null,
    /// Any already-rendered value
    Value(String),
    /// Renders as `[a, b, c]`
    List(Vec<LogArg>),
    /// Renders as `{k=v, k2=v2}` in insertion order
    Map(Vec<(LogArg, LogArg)>),
    /// Renders as the error description. As the final argument it is taken
    /// as the record's error chain instead.
    Error(Arc<dyn ErrorChain>),
}

impl LogArg {
    /// Wrap anything displayable.
    pub fn display(value: impl fmt::Display) -> Self {
        LogArg::Value(value.to_string())
    }

    /// Snapshot a standard error and its sources.
    pub fn error(error: &(dyn std::error::Error + 'static)) -> Self {
        LogArg::Error(ErrorRecord::from_error(error))
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LogArg>,
    {
        LogArg::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<LogArg>,
        V: Into<LogArg>,
    {
        LogArg::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LogArg::Error(_))
    }

    pub fn as_error(&self) -> Option<&Arc<dyn ErrorChain>> {
        match self {
            LogArg::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Append the rendered form to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            LogArg::Null => out.push_str("null"),
            LogArg::Value(value) => out.push_str(value),
            LogArg::List(items) => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    item.render_into(out);
                }
                out.push(']');
            }
            LogArg::Map(entries) => {
                out.push('{');
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    key.render_into(out);
                    out.push('=');
                    value.render_into(out);
                }
                out.push('}');
            }
            LogArg::Error(error) => out.push_str(&error.description()),
        }
    }
}

impl fmt::Display for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Null => f.write_str("Null"),
            LogArg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            LogArg::List(items) => f.debug_tuple("List").field(items).finish(),
            LogArg::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            LogArg::Error(error) => f.debug_tuple("Error").field(&error.description()).finish(),
        }
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    LogArg::Value(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    &str, String, &String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, f32, f64,
);

impl<T: Into<LogArg>> From<Option<T>> for LogArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogArg::Null, Into::into)
    }
}

impl<T: Into<LogArg>> From<Vec<T>> for LogArg {
    fn from(items: Vec<T>) -> Self {
        LogArg::list(items)
    }
}

impl From<Arc<dyn ErrorChain>> for LogArg {
    fn from(error: Arc<dyn ErrorChain>) -> Self {
        LogArg::Error(error)
    }
}

impl From<Arc<ErrorRecord>> for LogArg {
    fn from(error: Arc<ErrorRecord>) -> Self {
        LogArg::Error(error)
    }
}

impl From<ErrorRecord> for LogArg {
    fn from(error: ErrorRecord) -> Self {
        LogArg::Error(Arc::new(error))
    }
}
