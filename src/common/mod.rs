//! Common, shared types.

pub mod health;
pub mod layers;
pub mod lifecycle;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod tests;
