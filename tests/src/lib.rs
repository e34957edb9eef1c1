//! Cross-crate verification scenarios.

#[cfg(test)]
mod utils;
#[cfg(test)]
mod verification;
