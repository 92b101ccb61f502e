//! Tests for file input and output

extern crate std;

mod image_io_tests;
