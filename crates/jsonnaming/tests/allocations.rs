//! Counts heap allocations made by the calling thread while names are
//! converted and written.
//!
//! Kept in its own test binary: the counting allocator is process-wide and
//! the pool warm-up below must not race other tests.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use jsonnaming::{
    JsonNumber, JsonWrite, JsonWriter, NamingConvention, NamingError, SerializerOptions,
    WorkingPolicy, arena::STACK_THRESHOLD,
};

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn record() {
    let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
}

struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record();
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record();
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record();
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations_during(f: impl FnOnce() -> Result<(), NamingError>) -> usize {
    let before = ALLOCATIONS.with(Cell::get);
    f().unwrap();
    ALLOCATIONS.with(Cell::get) - before
}

#[test]
fn span_policy_writes_without_allocating() {
    let policy = WorkingPolicy::new(Some(&SerializerOptions::with_convention(
        NamingConvention::CamelCase,
    )));
    let long_name = format!("X{}", "y".repeat(STACK_THRESHOLD * 2));
    let mut writer = JsonWriter::with_capacity(4096);
    writer.write_start_object().unwrap();

    // Warm up: first use of each log callsite and the first pool miss may
    // allocate. The long name runs twice to hit both the miss and the reuse.
    policy.write_property_name(&mut writer, "MinRetries").unwrap();
    writer.write_number_value(JsonNumber::from(1)).unwrap();
    policy.write_property_name_utf8(&mut writer, b"Warm").unwrap();
    writer.write_null_value().unwrap();
    policy.write_property_name_chars(&mut writer, &['U', 'p']).unwrap();
    writer.write_null_value().unwrap();
    for _ in 0..2 {
        policy.write_property_name(&mut writer, &long_name).unwrap();
        writer.write_null_value().unwrap();
    }

    let allocations = allocations_during(|| {
        policy.write_property_name(&mut writer, "MaxRetries")?;
        writer.write_number_value(JsonNumber::from(5))?;
        policy.write_property_name_utf8(&mut writer, b"TimeoutMs")?;
        writer.write_number_value(JsonNumber::from(250_u64))?;
        policy.write_property_name_chars(&mut writer, &['I', 'D'])?;
        writer.write_boolean_value(true)?;
        policy.write_property_name(&mut writer, &long_name)?;
        writer.write_null_value()
    });
    assert_eq!(allocations, 0);

    writer.write_end_object().unwrap();
    let out = writer.into_string();
    assert!(out.starts_with(r#"{"minRetries":1,"warm":null,"up":null,"#));
    assert!(out.contains(r#""maxRetries":5,"timeoutMs":250,"id":true,"#));
}

#[test]
fn plain_policy_allocates() {
    let policy = WorkingPolicy::new(Some(&SerializerOptions::with_policy(
        jsonnaming::NamingPolicy::plain(|name: &str| name.to_ascii_lowercase()),
    )));
    let mut writer = JsonWriter::with_capacity(256);
    writer.write_start_object().unwrap();
    policy.write_property_name(&mut writer, "Warm").unwrap();
    writer.write_null_value().unwrap();

    let allocations = allocations_during(|| {
        policy.write_property_name(&mut writer, "MaxRetries")?;
        writer.write_null_value()
    });
    assert!(allocations > 0);
}
