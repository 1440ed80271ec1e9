//! Page acquisition over HTTP.

pub mod http_client;
