//! Tests for the pixel representations

extern crate std;

mod bgr_image_tests;
