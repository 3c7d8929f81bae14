//! Library half of the `jass` binary: table configuration, seat parsing,
//! logging setup and the game runners.

pub mod config;
pub mod logging;
pub mod runner;
pub mod seats;
