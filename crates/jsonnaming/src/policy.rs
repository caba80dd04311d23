//! Naming policies: rules that turn an identifier into its serialized
//! property name.
//!
//! A policy is either *plain*, converting owned strings only, or
//! *span-capable*, additionally able to rewrite a fixed-length `[char]` or
//! UTF-8 buffer in place. The built-in [`CamelCase`] and [`Identity`] policies
//! are span-capable; custom rules implement [`ConvertName`] (any
//! `Fn(&str) -> String` does) or [`ConvertSpan`].

use core::fmt;
use std::sync::{Arc, LazyLock};

use crate::{
    case::{camel_case_chars, camel_case_string, camel_case_utf8},
    error::NamingError,
};

/// String-to-string name conversion.
pub trait ConvertName: Send + Sync {
    /// Converts `name`, allocating the result.
    fn convert_name(&self, name: &str) -> String;
}

impl<F> ConvertName for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert_name(&self, name: &str) -> String {
        self(name)
    }
}

/// In-place conversion over fixed-length buffers.
///
/// Implementations must return the same region they were given and must not
/// change its length; a conversion that cannot keep the length fails instead.
pub trait ConvertSpan: ConvertName {
    /// Converts `chars` in place.
    ///
    /// # Errors
    ///
    /// Fails when the conversion cannot be expressed in place.
    fn convert_chars<'a>(&self, chars: &'a mut [char]) -> Result<&'a mut [char], NamingError>;

    /// Converts UTF-8 encoded `utf8` in place.
    ///
    /// # Errors
    ///
    /// Fails on malformed UTF-8 or when the conversion would change the byte
    /// length.
    fn convert_utf8<'a>(&self, utf8: &'a mut [u8]) -> Result<&'a mut [u8], NamingError>;
}

/// Acronym-aware camelCase: `"HTTPServer"` becomes `"httpServer"`.
///
/// The UTF-8 path only lowercases the first code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CamelCase;

impl ConvertName for CamelCase {
    fn convert_name(&self, name: &str) -> String {
        camel_case_string(name)
    }
}

impl ConvertSpan for CamelCase {
    fn convert_chars<'a>(&self, chars: &'a mut [char]) -> Result<&'a mut [char], NamingError> {
        Ok(camel_case_chars(chars))
    }

    fn convert_utf8<'a>(&self, utf8: &'a mut [u8]) -> Result<&'a mut [u8], NamingError> {
        Ok(camel_case_utf8(utf8)?)
    }
}

/// Leaves names unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl ConvertName for Identity {
    fn convert_name(&self, name: &str) -> String {
        name.into()
    }
}

impl ConvertSpan for Identity {
    fn convert_chars<'a>(&self, chars: &'a mut [char]) -> Result<&'a mut [char], NamingError> {
        Ok(chars)
    }

    fn convert_utf8<'a>(&self, utf8: &'a mut [u8]) -> Result<&'a mut [u8], NamingError> {
        Ok(utf8)
    }
}

static CAMEL_CASE_POLICY: LazyLock<NamingPolicy> =
    LazyLock::new(|| NamingPolicy::Span(Arc::new(CamelCase)));
static IDENTITY_POLICY: LazyLock<NamingPolicy> =
    LazyLock::new(|| NamingPolicy::Span(Arc::new(Identity)));

/// A configured naming policy.
#[derive(Clone)]
pub enum NamingPolicy {
    /// Converts owned strings only; every conversion allocates.
    Plain(Arc<dyn ConvertName>),
    /// Converts in place over fixed-length buffers.
    Span(Arc<dyn ConvertSpan>),
}

impl NamingPolicy {
    /// The acronym-aware camelCase policy.
    ///
    /// Every call shares one process-wide instance.
    #[must_use]
    pub fn camel_case() -> Self {
        CAMEL_CASE_POLICY.clone()
    }

    /// The policy that leaves names unchanged.
    ///
    /// Every call shares one process-wide instance.
    #[must_use]
    pub fn identity() -> Self {
        IDENTITY_POLICY.clone()
    }

    /// Wraps a string-only conversion.
    ///
    /// ```
    /// use jsonnaming::NamingPolicy;
    ///
    /// let upper = NamingPolicy::plain(|name: &str| name.to_uppercase());
    /// assert_eq!(upper.convert_name("id"), "ID");
    /// assert!(!upper.is_span_capable());
    /// ```
    pub fn plain(policy: impl ConvertName + 'static) -> Self {
        Self::Plain(Arc::new(policy))
    }

    /// Wraps an in-place conversion.
    pub fn span(policy: impl ConvertSpan + 'static) -> Self {
        Self::Span(Arc::new(policy))
    }

    /// Returns `true` if the policy can convert in place.
    #[must_use]
    pub fn is_span_capable(&self) -> bool {
        matches!(self, Self::Span(..))
    }

    /// The in-place capability, if the policy has one.
    #[must_use]
    pub fn as_span(&self) -> Option<&dyn ConvertSpan> {
        match self {
            Self::Span(policy) => Some(policy.as_ref()),
            Self::Plain(..) => None,
        }
    }

    /// Converts `name` through the string path.
    #[must_use]
    pub fn convert_name(&self, name: &str) -> String {
        match self {
            Self::Plain(policy) => policy.convert_name(name),
            Self::Span(policy) => policy.convert_name(name),
        }
    }
}

impl fmt::Debug for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(..) => f.write_str("NamingPolicy::Plain(..)"),
            Self::Span(..) => f.write_str("NamingPolicy::Span(..)"),
        }
    }
}

impl From<NamingConvention> for NamingPolicy {
    fn from(convention: NamingConvention) -> Self {
        match convention {
            NamingConvention::Identity => Self::identity(),
            NamingConvention::CamelCase => Self::camel_case(),
        }
    }
}

/// The built-in conventions, nameable from configuration.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamingConvention {
    #[default]
    Identity,
    CamelCase,
}
