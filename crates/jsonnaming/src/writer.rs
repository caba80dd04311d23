//! The streaming writer capability consumed by the naming layer, and a
//! compact in-memory implementation of it.

use core::fmt::Write as _;

use crate::{error::NamingError, number::JsonNumber};

/// A forward-only JSON emitter.
///
/// Property names arrive either as `&str`, as a `[char]` buffer, or as
/// UTF-8 bytes, matching the three forms a [`WorkingPolicy`] can produce.
///
/// # Errors
///
/// [`JsonWriter`] fails only for input JSON cannot represent. An
/// implementation writing to fallible I/O reports its failures through the
/// same [`NamingError`].
///
/// [`WorkingPolicy`]: crate::WorkingPolicy
pub trait JsonWrite {
    /// Writes `name` as the next property name. The value follows.
    fn write_property_name(&mut self, name: &str) -> Result<(), NamingError>;

    /// Writes a `[char]` name as the next property name.
    fn write_property_name_chars(&mut self, name: &[char]) -> Result<(), NamingError>;

    /// Writes a UTF-8 encoded name as the next property name.
    ///
    /// # Errors
    ///
    /// Fails when `name` is not valid UTF-8.
    fn write_property_name_utf8(&mut self, name: &[u8]) -> Result<(), NamingError>;

    /// Writes `value` as an escaped JSON string.
    fn write_string_value(&mut self, value: &str) -> Result<(), NamingError>;

    /// Writes `value` as a JSON number.
    ///
    /// # Errors
    ///
    /// Fails for NaN and infinities.
    fn write_number_value(&mut self, value: JsonNumber) -> Result<(), NamingError>;

    /// Writes `true` or `false`.
    fn write_boolean_value(&mut self, value: bool) -> Result<(), NamingError>;

    /// Writes `null`.
    fn write_null_value(&mut self) -> Result<(), NamingError>;

    /// Opens an object (`{`).
    fn write_start_object(&mut self) -> Result<(), NamingError>;

    /// Closes the innermost object (`}`).
    fn write_end_object(&mut self) -> Result<(), NamingError>;

    /// Opens an array (`[`).
    fn write_start_array(&mut self) -> Result<(), NamingError>;

    /// Closes the innermost array (`]`).
    fn write_end_array(&mut self) -> Result<(), NamingError>;
}

/// Compact JSON written into an in-memory `String`.
///
/// The writer inserts separators but does not validate document structure;
/// callers are trusted to pair starts with ends and names with values.
#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    /// One entry per open container: whether it already holds an item.
    has_items: Vec<bool>,
    after_name: bool,
}

impl JsonWriter {
    /// An empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose output buffer holds `capacity` bytes before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Output written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer, returning everything written.
    ///
    /// ```
    /// use jsonnaming::{JsonWrite, JsonWriter};
    ///
    /// let mut writer = JsonWriter::new();
    /// writer.write_start_array()?;
    /// writer.write_boolean_value(true)?;
    /// writer.write_null_value()?;
    /// writer.write_end_array()?;
    /// assert_eq!(writer.into_string(), "[true,null]");
    /// # Ok::<(), jsonnaming::NamingError>(())
    /// ```
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Depth of currently open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.has_items.len()
    }

    fn begin_item(&mut self) {
        if core::mem::take(&mut self.after_name) {
            return;
        }
        if let Some(has_items) = self.has_items.last_mut() {
            if *has_items {
                self.out.push(',');
            }
            *has_items = true;
        }
    }

    fn write_name(&mut self, name: impl IntoIterator<Item = char>) {
        self.begin_item();
        self.out.push('"');
        write_escaped_chars(name, &mut self.out);
        self.out.push_str("\":");
        self.after_name = true;
    }

    fn open(&mut self, token: char) {
        self.begin_item();
        self.out.push(token);
        self.has_items.push(false);
    }

    fn close(&mut self, token: char) {
        self.has_items.pop();
        self.out.push(token);
    }
}

impl JsonWrite for JsonWriter {
    fn write_property_name(&mut self, name: &str) -> Result<(), NamingError> {
        self.write_name(name.chars());
        Ok(())
    }

    fn write_property_name_chars(&mut self, name: &[char]) -> Result<(), NamingError> {
        self.write_name(name.iter().copied());
        Ok(())
    }

    fn write_property_name_utf8(&mut self, name: &[u8]) -> Result<(), NamingError> {
        let name = core::str::from_utf8(name)?;
        self.write_name(name.chars());
        Ok(())
    }

    fn write_string_value(&mut self, value: &str) -> Result<(), NamingError> {
        self.begin_item();
        self.out.push('"');
        write_escaped_chars(value.chars(), &mut self.out);
        self.out.push('"');
        Ok(())
    }

    fn write_number_value(&mut self, value: JsonNumber) -> Result<(), NamingError> {
        if !value.is_finite() {
            return Err(NamingError::InvalidArgument("value"));
        }
        self.begin_item();
        // Writing into a `String` cannot fail.
        let _ = write!(self.out, "{value}");
        Ok(())
    }

    fn write_boolean_value(&mut self, value: bool) -> Result<(), NamingError> {
        self.begin_item();
        self.out.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<(), NamingError> {
        self.begin_item();
        self.out.push_str("null");
        Ok(())
    }

    fn write_start_object(&mut self) -> Result<(), NamingError> {
        self.open('{');
        Ok(())
    }

    fn write_end_object(&mut self) -> Result<(), NamingError> {
        self.close('}');
        Ok(())
    }

    fn write_start_array(&mut self) -> Result<(), NamingError> {
        self.open('[');
        Ok(())
    }

    fn write_end_array(&mut self) -> Result<(), NamingError> {
        self.close(']');
        Ok(())
    }
}

/// Escapes quotes, backslashes, control characters (<= U+001F and the other
/// BMP controls) and the Unicode line separators.
fn write_escaped_chars(src: impl IntoIterator<Item = char>, out: &mut String) {
    for c in src {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Line separators break pre-ES2019 parsers.
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            _ => out.push(c),
        }
    }
}
