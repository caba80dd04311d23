//! In-place camelCase conversion over fixed-size buffers.
//!
//! Both converters rewrite a region without changing its length:
//!
//! - [`camel_case_chars`] lowercases the leading acronym run of a `[char]`
//!   buffer, handing off to the following word (`"HTTPServer"` becomes
//!   `"httpServer"`).
//! - [`camel_case_utf8`] lowercases only the first code point of a UTF-8
//!   buffer, and refuses when the lowercase form would need a different
//!   number of bytes.

use bstr::decode_utf8;

use crate::error::EncodingError;

/// Simple (one-to-one) lowercase mapping of `c`.
///
/// `char::to_lowercase` can expand to several chars (only `'İ'` does so
/// unconditionally); the first char of the expansion is the simple mapping.
#[inline]
pub(crate) fn simple_lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Rewrites the leading uppercase run of `chars` to camelCase, in place.
///
/// ```
/// use jsonnaming::case::camel_case_chars;
///
/// let mut name: Vec<char> = "XMLParser".chars().collect();
/// camel_case_chars(&mut name);
/// assert_eq!(name.iter().collect::<String>(), "xmlParser");
/// ```
pub fn camel_case_chars(chars: &mut [char]) -> &mut [char] {
    for i in 0..chars.len() {
        if !fix_char_case(chars, i) {
            break;
        }
    }
    chars
}

/// Handles position `i`; returns `false` once the leading run has ended.
fn fix_char_case(chars: &mut [char], i: usize) -> bool {
    let current = chars[i];

    if i == 0 && !current.is_uppercase() {
        return false;
    }

    // A single leading capital ("Xml") only lowers the first char. A space
    // separates words and keeps the run going ("A B").
    if i == 1 && !current.is_uppercase() && current != ' ' {
        return false;
    }

    if i > 0 {
        if let Some(&next) = chars.get(i + 1) {
            if !next.is_uppercase() {
                if next == ' ' {
                    chars[i] = simple_lowercase(current);
                }
                return false;
            }
        }
    }

    chars[i] = simple_lowercase(current);
    true
}

/// Lowercases the first code point of `utf8`, in place.
///
/// # Errors
///
/// - [`EncodingError::InvalidUtf8`] when the buffer does not start with a
///   valid UTF-8 sequence.
/// - [`EncodingError::LengthChanged`] when the lowercase form of the first
///   code point has a different UTF-8 length; the buffer is left untouched.
pub fn camel_case_utf8(utf8: &mut [u8]) -> Result<&mut [u8], EncodingError> {
    if utf8.is_empty() {
        return Ok(utf8);
    }

    let (Some(first), width) = decode_utf8(&*utf8) else {
        return Err(EncodingError::InvalidUtf8 { valid_up_to: 0 });
    };

    let lowered = simple_lowercase(first);
    if lowered == first {
        return Ok(utf8);
    }

    if lowered.len_utf8() != width {
        return Err(EncodingError::LengthChanged {
            original: first,
            lowered,
        });
    }

    lowered.encode_utf8(&mut utf8[..width]);
    Ok(utf8)
}

/// Allocating camelCase conversion of a whole string, built on
/// [`camel_case_chars`].
pub(crate) fn camel_case_string(name: &str) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    camel_case_chars(&mut chars);
    chars.into_iter().collect()
}
