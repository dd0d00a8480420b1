#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod error;
mod log;

pub mod config;
pub mod device;
pub mod interface;
pub mod interrupt;
pub mod params;
pub mod records;
pub mod registers;

pub use crate::device::D7s;
pub use crate::error::{Error, Result};
