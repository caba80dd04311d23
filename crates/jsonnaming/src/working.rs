//! Binds a naming policy to its serializer options and picks, per call, how a
//! property name gets converted:
//!
//! 1. no policy: the name is written unchanged;
//! 2. span-capable policy: the name is copied into scratch memory from the
//!    [`arena`](crate::arena) and converted in place, without allocating a
//!    string;
//! 3. plain policy: the name is materialized as an owned `String` and
//!    converted through [`ConvertName`](crate::ConvertName). This is the one
//!    path that always allocates.
//!
//! Conversion failures are returned to the caller; nothing is written for a
//! name that failed to convert.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::{
    arena::with_scratch,
    error::NamingError,
    options::SerializerOptions,
    policy::{ConvertSpan, NamingPolicy},
    writer::JsonWrite,
};

/// A naming policy ready to write property names.
///
/// Whether a policy is present, and whether it converts in place, is decided
/// once in [`WorkingPolicy::new`].
#[derive(Debug, Clone, Default)]
pub struct WorkingPolicy {
    options: Option<SerializerOptions>,
    policy: Option<NamingPolicy>,
    has_policy: bool,
    is_span_capable: bool,
    clear_buffers: bool,
}

impl WorkingPolicy {
    /// Reads the naming policy from `options`.
    #[must_use]
    pub fn new(options: Option<&SerializerOptions>) -> Self {
        let policy = options.and_then(|o| o.naming_policy.clone());
        Self {
            has_policy: policy.is_some(),
            is_span_capable: policy.as_ref().is_some_and(NamingPolicy::is_span_capable),
            clear_buffers: options.is_some_and(|o| o.clear_buffers),
            options: options.cloned(),
            policy,
        }
    }

    #[must_use]
    pub fn has_policy(&self) -> bool {
        self.has_policy
    }

    #[must_use]
    pub fn is_span_capable(&self) -> bool {
        self.is_span_capable
    }

    #[must_use]
    pub fn policy(&self) -> Option<&NamingPolicy> {
        self.policy.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> Option<&SerializerOptions> {
        self.options.as_ref()
    }

    /// A copy of this policy, with name conversion switched off when
    /// `disable` is set. The options are kept either way.
    #[must_use]
    pub fn overridden(&self, disable: bool) -> Self {
        if !disable {
            return self.clone();
        }
        Self {
            policy: None,
            has_policy: false,
            is_span_capable: false,
            ..self.clone()
        }
    }

    fn span(&self) -> Option<&dyn ConvertSpan> {
        self.policy.as_ref().and_then(NamingPolicy::as_span)
    }

    /// Converts `name` through the string path; borrows it back when there is
    /// no policy.
    #[must_use]
    pub fn convert_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match &self.policy {
            Some(policy) => Cow::Owned(policy.convert_name(name)),
            None => Cow::Borrowed(name),
        }
    }

    /// Converts `name` into `destination` in place.
    ///
    /// Returns the number of chars written, or `None` when the policy cannot
    /// convert in place, `name` is blank, or `destination` is too short.
    ///
    /// # Errors
    ///
    /// Propagates conversion failures.
    pub fn try_convert_name(
        &self,
        name: &str,
        destination: &mut [char],
    ) -> Result<Option<usize>, NamingError> {
        let Some(span) = self.span() else {
            return Ok(None);
        };
        if name.trim().is_empty() {
            return Ok(None);
        }
        let len = name.chars().count();
        let Some(destination) = destination.get_mut(..len) else {
            return Ok(None);
        };
        for (slot, c) in destination.iter_mut().zip(name.chars()) {
            *slot = c;
        }
        span.convert_chars(destination)?;
        Ok(Some(len))
    }

    /// Like [`try_convert_name`](Self::try_convert_name) for a `[char]` name.
    ///
    /// # Errors
    ///
    /// Propagates conversion failures.
    pub fn try_convert_chars(
        &self,
        name: &[char],
        destination: &mut [char],
    ) -> Result<Option<usize>, NamingError> {
        let Some(span) = self.span() else {
            return Ok(None);
        };
        let Some(destination) = destination.get_mut(..name.len()) else {
            return Ok(None);
        };
        destination.copy_from_slice(name);
        span.convert_chars(destination)?;
        Ok(Some(name.len()))
    }

    /// Like [`try_convert_name`](Self::try_convert_name) for a UTF-8 name.
    ///
    /// # Errors
    ///
    /// Propagates conversion failures.
    pub fn try_convert_utf8(
        &self,
        name: &[u8],
        destination: &mut [u8],
    ) -> Result<Option<usize>, NamingError> {
        let Some(span) = self.span() else {
            return Ok(None);
        };
        let Some(destination) = destination.get_mut(..name.len()) else {
            return Ok(None);
        };
        destination.copy_from_slice(name);
        span.convert_utf8(destination)?;
        Ok(Some(name.len()))
    }

    /// Converts a UTF-8 `name`, preferring `buffer` as the destination.
    ///
    /// Without a policy `name` is borrowed back unchanged. A span-capable
    /// policy converts in `buffer` when `name` fits. Otherwise the name goes
    /// through the string path, and the result is copied into `buffer` if it
    /// fits or returned owned if it does not.
    ///
    /// # Errors
    ///
    /// Fails on malformed UTF-8 and propagates conversion failures.
    pub fn convert_name_utf8<'a>(
        &self,
        name: &'a [u8],
        buffer: &'a mut [u8],
    ) -> Result<Cow<'a, [u8]>, NamingError> {
        let Some(policy) = &self.policy else {
            return Ok(Cow::Borrowed(name));
        };

        if let Some(span) = policy.as_span() {
            if name.len() <= buffer.len() {
                let destination = &mut buffer[..name.len()];
                destination.copy_from_slice(name);
                return Ok(Cow::Borrowed(span.convert_utf8(destination)?));
            }
        }

        let name = core::str::from_utf8(name)?;
        debug!(name, "name does not fit in place; converting through an owned string");
        let converted = policy.convert_name(name);

        if converted.len() <= buffer.len() {
            let destination = &mut buffer[..converted.len()];
            destination.copy_from_slice(converted.as_bytes());
            return Ok(Cow::Borrowed(destination));
        }
        Ok(Cow::Owned(converted.into_bytes()))
    }

    /// Writes `name`, converted, as the next property name.
    ///
    /// # Errors
    ///
    /// - [`NamingError::InvalidArgument`] for an empty or whitespace-only name.
    /// - Conversion and writer failures are propagated.
    pub fn write_property_name<W>(&self, writer: &mut W, name: &str) -> Result<(), NamingError>
    where
        W: JsonWrite + ?Sized,
    {
        if name.trim().is_empty() {
            return Err(NamingError::InvalidArgument("property_name"));
        }

        match &self.policy {
            None => writer.write_property_name(name),
            Some(NamingPolicy::Span(span)) => {
                let len = name.chars().count();
                trace!(len, "converting property name in place");
                with_scratch(len, self.clear_buffers, |buf: &mut [char]| {
                    for (slot, c) in buf.iter_mut().zip(name.chars()) {
                        *slot = c;
                    }
                    let converted = span.convert_chars(buf)?;
                    writer.write_property_name_chars(converted)
                })
            }
            Some(NamingPolicy::Plain(plain)) => {
                debug!(name, "plain naming policy; allocating converted name");
                writer.write_property_name(&plain.convert_name(name))
            }
        }
    }

    /// Writes a `[char]` name, converted, as the next property name.
    ///
    /// # Errors
    ///
    /// Conversion and writer failures are propagated.
    pub fn write_property_name_chars<W>(
        &self,
        writer: &mut W,
        name: &[char],
    ) -> Result<(), NamingError>
    where
        W: JsonWrite + ?Sized,
    {
        match &self.policy {
            None => writer.write_property_name_chars(name),
            Some(NamingPolicy::Span(span)) => {
                trace!(len = name.len(), "converting property name in place");
                with_scratch(name.len(), self.clear_buffers, |buf: &mut [char]| {
                    buf.copy_from_slice(name);
                    let converted = span.convert_chars(buf)?;
                    writer.write_property_name_chars(converted)
                })
            }
            Some(NamingPolicy::Plain(plain)) => {
                let owned: String = name.iter().collect();
                debug!(name = %owned, "plain naming policy; allocating converted name");
                writer.write_property_name(&plain.convert_name(&owned))
            }
        }
    }

    /// Writes a UTF-8 name, converted, as the next property name.
    ///
    /// # Errors
    ///
    /// Fails on malformed UTF-8 and propagates conversion and writer failures.
    pub fn write_property_name_utf8<W>(
        &self,
        writer: &mut W,
        name: &[u8],
    ) -> Result<(), NamingError>
    where
        W: JsonWrite + ?Sized,
    {
        match &self.policy {
            None => writer.write_property_name_utf8(name),
            Some(NamingPolicy::Span(span)) => {
                trace!(len = name.len(), "converting UTF-8 property name in place");
                with_scratch(name.len(), self.clear_buffers, |buf: &mut [u8]| {
                    buf.copy_from_slice(name);
                    let converted = span.convert_utf8(buf)?;
                    writer.write_property_name_utf8(converted)
                })
            }
            Some(NamingPolicy::Plain(plain)) => {
                let name = core::str::from_utf8(name)?;
                debug!(name, "plain naming policy; allocating converted name");
                writer.write_property_name(&plain.convert_name(name))
            }
        }
    }
}

impl From<&SerializerOptions> for WorkingPolicy {
    fn from(options: &SerializerOptions) -> Self {
        Self::new(Some(options))
    }
}
