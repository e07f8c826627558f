//! Dashboard widgets.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` and receive the
//! target on every call, so the host decides which region each one draws into.

mod plotter;
mod status;
mod text;
mod viewport;

pub use plotter::{FrameReport, PointCloudPlotter, draw_placeholder, render_packet, scale_annotation};
pub use status::{StatusStrip, battery_label, charging_label};
pub use text::{DrawableText, clear_region};
pub use viewport::{AddOutcome, Growth, ScrollViewport, ViewportConfig};
