//! Procedural artwork for a browser extension's store listing: toolbar icons,
//! screenshots and promotional tiles, written as 24-bit PNG files.

pub mod builtin_font;
pub mod canvas;
pub mod export;
pub mod font;
pub mod icon_gen;
pub mod layout;
pub mod palette;
pub mod promo_gen;
pub mod requirements;
