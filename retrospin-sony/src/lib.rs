//! Sony disc serial reader.
//!
//! The PlayStation serial lives in a file on the disc rather than at a
//! fixed sector, so this crate carries the mount handling the Sega readers
//! never need.

pub mod mount;
pub mod psx;
pub mod system_cnf;

pub use mount::{MountFacility, MountGuard, SystemMount};
pub use psx::PsxReader;

#[cfg(test)]
#[path = "tests/fake_mount.rs"]
mod fake_mount;
