#![no_main]
use arbitrary::Arbitrary;
use jsonnaming::{
    EncodingError, JsonWrite, JsonWriter, NamingConvention, NamingError, SerializerOptions,
    WorkingPolicy,
    case::{camel_case_chars, camel_case_utf8},
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    name: Vec<u8>,
    camel: bool,
    clear_buffers: bool,
    buffer_len: u16,
}

fuzz_target!(|input: Input| {
    // In-place byte conversion keeps the length, and leaves the buffer alone
    // when it refuses.
    let mut bytes = input.name.clone();
    match camel_case_utf8(&mut bytes) {
        Ok(converted) => assert_eq!(converted.len(), input.name.len()),
        Err(EncodingError::LengthChanged { original, lowered }) => {
            assert_ne!(original.len_utf8(), lowered.len_utf8());
            assert_eq!(bytes, input.name);
        }
        Err(EncodingError::InvalidUtf8 { .. }) => assert_eq!(bytes, input.name),
    }

    let Ok(text) = std::str::from_utf8(&input.name) else {
        return;
    };

    let mut chars: Vec<char> = text.chars().collect();
    let count = chars.len();
    assert_eq!(camel_case_chars(&mut chars).len(), count);

    let convention = if input.camel {
        NamingConvention::CamelCase
    } else {
        NamingConvention::Identity
    };
    let options = SerializerOptions {
        clear_buffers: input.clear_buffers,
        ..SerializerOptions::with_convention(convention)
    };
    let policy = WorkingPolicy::new(Some(&options));

    let mut writer = JsonWriter::new();
    writer.write_start_object().unwrap();
    match policy.write_property_name(&mut writer, text) {
        Ok(()) => assert!(writer.as_str().len() > 2),
        Err(NamingError::InvalidArgument(_)) => assert!(text.trim().is_empty()),
        Err(err) => panic!("string names always convert in place: {err}"),
    }

    let mut buffer = vec![0u8; usize::from(input.buffer_len)];
    if let Ok(converted) = policy.convert_name_utf8(&input.name, &mut buffer) {
        assert!(std::str::from_utf8(&converted).is_ok());
    }
});
