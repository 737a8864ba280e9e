//! FRB bridge crate exposing the wellness core to Flutter.

pub mod api;
