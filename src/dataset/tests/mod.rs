//! Tests for the dataset drivers

extern crate std;
