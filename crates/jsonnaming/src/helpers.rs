//! Property writers layered over [`JsonWrite`]: each writes a converted name
//! followed by its value.

use core::fmt::{self, Write as _};

use crate::{
    arena::with_scratch,
    error::{FormatError, NamingError},
    number::JsonNumber,
    working::WorkingPolicy,
    writer::JsonWrite,
};

/// A value that can follow a property name.
pub trait PropertyValue {
    /// Writes `self` as the next value.
    ///
    /// # Errors
    ///
    /// Propagates writer failures.
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError>;
}

impl<T: PropertyValue + ?Sized> PropertyValue for &T {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        (**self).write_value(writer)
    }
}

impl PropertyValue for str {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        writer.write_string_value(self)
    }
}

impl PropertyValue for String {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        writer.write_string_value(self)
    }
}

impl PropertyValue for bool {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        writer.write_boolean_value(*self)
    }
}

/// `None` is written as `null`.
impl<T: PropertyValue> PropertyValue for Option<T> {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        match self {
            Some(value) => value.write_value(writer),
            None => writer.write_null_value(),
        }
    }
}

impl PropertyValue for JsonNumber {
    fn write_value<W: JsonWrite + ?Sized>(&self, writer: &mut W) -> Result<(), NamingError> {
        writer.write_number_value(*self)
    }
}

macro_rules! impl_property_value_for_numbers {
    ($($t:ty),*) => {
        $(
            impl PropertyValue for $t {
                fn write_value<W: JsonWrite + ?Sized>(
                    &self,
                    writer: &mut W,
                ) -> Result<(), NamingError> {
                    writer.write_number_value(JsonNumber::from(*self))
                }
            }
        )*
    };
}

impl_property_value_for_numbers!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

/// Name-then-value writes through a [`WorkingPolicy`].
///
/// Implemented for every [`JsonWrite`].
pub trait JsonWriteExt: JsonWrite {
    /// Writes `name`, converted by `policy`, followed by `value`.
    ///
    /// # Errors
    ///
    /// See [`WorkingPolicy::write_property_name`]; writer failures are
    /// propagated.
    fn write_property<V>(
        &mut self,
        policy: &WorkingPolicy,
        name: &str,
        value: &V,
    ) -> Result<(), NamingError>
    where
        V: PropertyValue + ?Sized,
    {
        policy.write_property_name(self, name)?;
        value.write_value(self)
    }

    /// Like [`write_property`](Self::write_property) for a UTF-8 name.
    ///
    /// # Errors
    ///
    /// See [`WorkingPolicy::write_property_name_utf8`].
    fn write_property_utf8<V>(
        &mut self,
        policy: &WorkingPolicy,
        name: &[u8],
        value: &V,
    ) -> Result<(), NamingError>
    where
        V: PropertyValue + ?Sized,
    {
        policy.write_property_name_utf8(self, name)?;
        value.write_value(self)
    }

    /// Writes `value`'s [`Display`](fmt::Display) text as a string property.
    ///
    /// The text is measured against `max_length`, then formatted into scratch
    /// memory sized to the text, before anything is written. A value that
    /// does not fit leaves the writer untouched.
    ///
    /// # Errors
    ///
    /// - [`NamingError::Format`] when the text exceeds `max_length` bytes or
    ///   the `Display` impl fails.
    /// - See [`WorkingPolicy::write_property_name`].
    fn write_display_property<T>(
        &mut self,
        policy: &WorkingPolicy,
        name: &str,
        value: &T,
        max_length: usize,
    ) -> Result<(), NamingError>
    where
        T: fmt::Display + ?Sized,
    {
        let mut measured = MeasuredFmt::new(max_length);
        write!(measured, "{value}").map_err(|_| FormatError { max_length })?;

        with_scratch(measured.len, false, |buf: &mut [u8]| {
            let mut out = BoundedFmt::new(buf);
            write!(out, "{value}").map_err(|_| FormatError { max_length })?;
            let text = out.as_str()?;
            policy.write_property_name(self, name)?;
            self.write_string_value(text)
        })
    }

    /// Writes `name` followed by `[]`.
    ///
    /// # Errors
    ///
    /// See [`WorkingPolicy::write_property_name`].
    fn write_empty_array(&mut self, policy: &WorkingPolicy, name: &str) -> Result<(), NamingError> {
        policy.write_property_name(self, name)?;
        self.write_start_array()?;
        self.write_end_array()
    }

    /// Writes `name` followed by `{}`.
    ///
    /// # Errors
    ///
    /// See [`WorkingPolicy::write_property_name`].
    fn write_empty_object(
        &mut self,
        policy: &WorkingPolicy,
        name: &str,
    ) -> Result<(), NamingError> {
        policy.write_property_name(self, name)?;
        self.write_start_object()?;
        self.write_end_object()
    }
}

impl<W: JsonWrite + ?Sized> JsonWriteExt for W {}

/// Writes a property named after the expression that produced its value.
///
/// `property!(writer, policy, config.MaxRetries)` writes the value of
/// `config.MaxRetries` under the name `MaxRetries`, converted by `policy`.
/// The name comes from [`resolve_default_name`](crate::resolve_default_name)
/// applied to the expression's source text.
///
/// ```
/// use jsonnaming::{JsonWrite, JsonWriter, NamingConvention, SerializerOptions, WorkingPolicy, property};
///
/// struct Settings {
///     retries: u32,
/// }
///
/// let settings = Settings { retries: 3 };
/// let policy = WorkingPolicy::new(Some(&SerializerOptions::with_convention(
///     NamingConvention::CamelCase,
/// )));
/// let mut writer = JsonWriter::new();
/// writer.write_start_object()?;
/// property!(&mut writer, &policy, settings.retries)?;
/// writer.write_end_object()?;
/// assert_eq!(writer.as_str(), r#"{"retries":3}"#);
/// # Ok::<(), jsonnaming::NamingError>(())
/// ```
#[macro_export]
macro_rules! property {
    ($writer:expr, $policy:expr, $value:expr) => {
        $crate::JsonWriteExt::write_property(
            $writer,
            $policy,
            $crate::resolve_default_name(stringify!($value)),
            &$value,
        )
    };
}

/// Counts formatted bytes, failing once they exceed `limit`.
struct MeasuredFmt {
    len: usize,
    limit: usize,
}

impl MeasuredFmt {
    fn new(limit: usize) -> Self {
        Self { len: 0, limit }
    }
}

impl fmt::Write for MeasuredFmt {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len = self
            .len
            .checked_add(s.len())
            .filter(|&len| len <= self.limit)
            .ok_or(fmt::Error)?;
        Ok(())
    }
}

/// A `fmt::Write` sink over a borrowed byte buffer that fails, rather than
/// truncates, when the buffer is full.
struct BoundedFmt<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BoundedFmt<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn as_str(&self) -> Result<&str, NamingError> {
        Ok(core::str::from_utf8(&self.buf[..self.pos])?)
    }
}

impl fmt::Write for BoundedFmt<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos.checked_add(s.len()).ok_or(fmt::Error)?;
        let dest = self.buf.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}
