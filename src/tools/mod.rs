//! One-shot site maintenance tools, run to completion from the CLI.

pub mod cutout;
pub mod patch;
pub mod playlist;
