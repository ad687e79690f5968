#![deny(unsafe_code)]

pub mod lms;
