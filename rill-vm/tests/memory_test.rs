// rill-vm - Growth buffer tests
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Tests for the capacity-doubling growth policy.

use rill_vm::memory::{grow_capacity, GrowBuffer};

#[test]
fn grow_capacity_floor_is_eight() {
    assert_eq!(grow_capacity(0), 8);
    assert_eq!(grow_capacity(1), 8);
    assert_eq!(grow_capacity(7), 8);
}

#[test]
fn grow_capacity_doubles_above_floor() {
    assert_eq!(grow_capacity(8), 16);
    assert_eq!(grow_capacity(16), 32);
    assert_eq!(grow_capacity(32), 64);
    assert_eq!(grow_capacity(1024), 2048);
}

#[test]
fn new_buffer_has_no_capacity() {
    let buf: GrowBuffer<u8> = GrowBuffer::new();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
    assert!(buf.is_empty());
}

#[test]
fn capacity_follows_doubling_sequence() {
    let mut buf = GrowBuffer::new();
    for i in 0..100u32 {
        buf.write(i);
        let len = buf.len();
        let expected = match len {
            1..=8 => 8,
            9..=16 => 16,
            17..=32 => 32,
            33..=64 => 64,
            _ => 128,
        };
        assert_eq!(buf.capacity(), expected, "after {} writes", len);
        assert!(buf.capacity() >= len);
    }
}

#[test]
fn elements_survive_growth() {
    let mut buf = GrowBuffer::new();
    for i in 0..50u32 {
        buf.write(i);
    }
    for i in 0..50u32 {
        assert_eq!(buf[i as usize], i);
    }
}

#[test]
fn free_resets_length_and_capacity() {
    let mut buf = GrowBuffer::new();
    for i in 0..20u32 {
        buf.write(i);
    }
    buf.free();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
    assert!(buf.get(0).is_none());
}

#[test]
fn write_after_free_regrows_from_floor() {
    let mut buf = GrowBuffer::new();
    for i in 0..20u32 {
        buf.write(i);
    }
    buf.free();
    buf.write(7);
    assert_eq!(buf.len(), 1);
    assert_eq!(buf.capacity(), 8);
    assert_eq!(buf[0], 7);
}

#[test]
fn truncate_keeps_capacity() {
    let mut buf = GrowBuffer::new();
    for i in 0..10u32 {
        buf.write(i);
    }
    assert_eq!(buf.capacity(), 16);
    buf.truncate(0);
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 16);
}

#[test]
fn pop_returns_in_lifo_order() {
    let mut buf = GrowBuffer::new();
    buf.write("a");
    buf.write("b");
    assert_eq!(buf.pop(), Some("b"));
    assert_eq!(buf.pop(), Some("a"));
    assert_eq!(buf.pop(), None);
}

#[test]
fn get_past_end_is_none() {
    let mut buf = GrowBuffer::new();
    buf.write(1u8);
    assert_eq!(buf.get(0), Some(&1));
    assert!(buf.get(1).is_none());
}
