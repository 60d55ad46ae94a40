// src/core/mod.rs

pub mod net;
pub mod url;

pub use net::{HttpReply, HttpTransport, Transport};
pub use self::url::clean_url;
