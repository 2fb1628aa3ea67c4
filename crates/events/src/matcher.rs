//! Subscription keys.

use std::borrow::Cow;

/// Selects which event names a subscription receives.
///
/// Either one exact name, or a family of names sharing a prefix and a suffix
/// (`order.` + anything + `:change`). Per-field form events are the only
/// names routed as families.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Matcher {
    Exact(Cow<'static, str>),
    Family {
        prefix: Cow<'static, str>,
        suffix: Cow<'static, str>,
    },
}

impl Matcher {
    pub fn exact(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Exact(name.into())
    }

    /// Family matcher: names starting with `prefix` and ending with `suffix`.
    ///
    /// The part in between may be empty, but prefix and suffix may not
    /// overlap (`order.:change` matches `order.` / `:change`,
    /// `order:change` does not).
    pub fn family(
        prefix: impl Into<Cow<'static, str>>,
        suffix: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Family {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(exact) => exact == name,
            Matcher::Family { prefix, suffix } => {
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix.as_ref())
                    && name.ends_with(suffix.as_ref())
            }
        }
    }
}

impl From<&'static str> for Matcher {
    fn from(name: &'static str) -> Self {
        Self::exact(name)
    }
}

impl From<String> for Matcher {
    fn from(name: String) -> Self {
        Self::exact(name)
    }
}

impl core::fmt::Display for Matcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Matcher::Exact(name) => f.write_str(name),
            Matcher::Family { prefix, suffix } => write!(f, "{prefix}*{suffix}"),
        }
    }
}
