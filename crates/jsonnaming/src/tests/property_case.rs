use quickcheck::{QuickCheck, TestResult};

use crate::{
    case::{camel_case_chars, camel_case_utf8, simple_lowercase},
    error::EncodingError,
};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

fn camel(name: &str) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    camel_case_chars(&mut chars).iter().collect()
}

/// Property: converting an already converted ASCII name changes nothing.
#[test]
fn camel_case_is_idempotent_on_ascii() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(name: String) -> bool {
        let name: String = name.chars().filter(char::is_ascii).collect();
        let once = camel(&name);
        camel(&once) == once
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: the char path only lowers a leading run of uppercase letters and
/// spaces, never changes the length, and leaves everything after that run
/// alone.
#[test]
fn camel_case_only_lowers_a_prefix() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(name: String) -> bool {
        let original: Vec<char> = name.chars().collect();
        let mut converted = original.clone();
        camel_case_chars(&mut converted);

        if converted.len() != original.len() {
            return false;
        }
        let prefix = original
            .iter()
            .zip(&converted)
            .take_while(|&(o, c)| o != c || o.is_uppercase() || *o == ' ')
            .count();
        original
            .iter()
            .zip(&converted)
            .take(prefix)
            .all(|(&o, &c)| c == o || c == simple_lowercase(o))
            && original[prefix..] == converted[prefix..]
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: for an ASCII name starting with an uppercase letter, the byte
/// path lowers exactly the first byte.
#[test]
fn utf8_lowers_leading_ascii_letter_only() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(lead: u8, rest: String) -> bool {
        let lead = b'A' + lead % 26;
        let mut bytes = vec![lead];
        bytes.extend(rest.bytes().filter(u8::is_ascii));
        let expected: Vec<u8> = core::iter::once(lead.to_ascii_lowercase())
            .chain(bytes[1..].iter().copied())
            .collect();

        let len = bytes.len();
        match camel_case_utf8(&mut bytes) {
            Ok(converted) => converted.len() == len && *converted == expected[..],
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u8, String) -> bool);
}

/// Property: on any well-formed name the byte path either keeps the byte
/// length or reports the code point whose lowercase form would change it.
#[test]
fn utf8_never_changes_length() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(name: String) -> TestResult {
        if name.is_empty() {
            return TestResult::discard();
        }
        let mut bytes = name.clone().into_bytes();
        let first = name.chars().next().unwrap_or_default();
        match camel_case_utf8(&mut bytes) {
            Ok(converted) => TestResult::from_bool(
                converted.len() == name.len()
                    && core::str::from_utf8(converted).is_ok_and(|s| {
                        s.chars().next() == Some(simple_lowercase(first))
                            && s[first.len_utf8()..] == name[first.len_utf8()..]
                    }),
            ),
            Err(EncodingError::LengthChanged { original, lowered }) => TestResult::from_bool(
                original == first && original.len_utf8() != lowered.len_utf8(),
            ),
            Err(EncodingError::InvalidUtf8 { .. }) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> TestResult);
}
