//! sitekit: serving and maintenance tools for a static site.
//!
//! The site's animator page runs FFmpeg.wasm, which browsers only allow in a
//! cross-origin-isolated context, so the bundled file server stamps the
//! COOP/COEP/CORP header triplet onto every response. The remaining
//! subcommands regenerate the music playlist, repair shell-mangled asset tags
//! in the site's HTML, and knock the background out of sprite images.

pub mod cli;
pub mod config;
pub mod handler;
pub mod http;
pub mod server;
pub mod tools;
