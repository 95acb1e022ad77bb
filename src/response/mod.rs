//! Response encoding helpers

pub mod base64;
