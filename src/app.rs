pub mod approot;
pub mod outfmt;

pub use approot::*;

// Version is of the format 0.YY.MM[.i], or 0.year.month.optional_minor_increment,
// so it's clear at a glance how recently the tool was updated.
// Major version stays at 0. None of this has been verified by a tax professional.
pub const APP_VERSION: &str = "0.26.10";
