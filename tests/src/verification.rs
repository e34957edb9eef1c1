mod scenarios;
#[cfg(target_os = "linux")]
mod loopback;
