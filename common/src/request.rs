use crate::network::target::Target;

pub const DEFAULT_PATH: &str = "/ip";

/// Builds the fixed `GET` request sent over every tunnel.
pub fn http_get(target: &Target, path: &str) -> Vec<u8> {
    format!(
        "GET {path} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target.host_header()
    )
    .into_bytes()
}
