//! External interfaces: HTTP REST API

pub mod http;
