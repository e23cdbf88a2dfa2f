#![allow(dead_code)]

mod test_app;

#[allow(unused_imports)]
pub use test_app::{TestApp, body_bytes};

pub const TEST_BUCKET: &str = "test-pdfs";
