//! Overlay rendering for offer pages using lopdf.
//!
//! Every fixed page of an offer gets a transparent one-page PDF holding the
//! resolved texts and the dynamic graphics (logo, KPI donuts, product
//! images). The overlay is later stacked on top of the page's background
//! template by the composer.

mod canvas;
mod error;
mod fonts;
mod layout;
mod raster;
mod renderer;

pub use canvas::Canvas;
pub use error::RenderError;
pub use fonts::{StandardFont, encode_win_ansi};
pub use layout::{
    AccentTriangle, DonutLayout, LogoLayout, OverlayLayout, PageLabel, ProductImageLayout, TopLeftBox,
};
pub use raster::EmbeddedImage;
pub use renderer::{OverlayRenderer, donut_sweep_degrees};
