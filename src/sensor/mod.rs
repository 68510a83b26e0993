//! Light sensor drivers.

pub mod ltr303;

pub use ltr303::{Ltr303, Ltr303Config};

#[cfg(test)]
mod tests;
