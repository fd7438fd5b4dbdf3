#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate serde;
#[macro_use]
extern crate snafu;

pub mod cmd;
pub mod error;
pub mod fusion;
pub mod helpers;
