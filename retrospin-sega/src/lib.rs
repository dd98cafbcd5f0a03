//! Sega disc serial readers.
//!
//! Both Sega CD-based systems keep their product code in the first logical
//! sector of the disc, so identification is a single raw read:
//!
//! - Saturn
//! - Sega CD / Mega CD

pub mod mega_cd;
pub mod saturn;

pub use mega_cd::MegaCdReader;
pub use saturn::SaturnReader;
