//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` values are `const`, so widgets never build
//! style objects while drawing. Styles whose color varies per element (log lines
//! colored by severity) are built from the exposed font references instead:
//! `MonoTextStyle::new(LOG_FONT, color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X14},
    },
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT};

use crate::colors::{BLACK, OLIVE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text on the alphabetic baseline. Used for placeholders.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Alphabetic)
    .build();

/// Left-aligned text on the alphabetic baseline. Used for log lines and annotations.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Alphabetic)
    .build();

/// Right-aligned text. Used for the charging indicator in the status strip.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Alphabetic)
    .build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Log line font (7x14 pixels, 11px ascent).
pub const LOG_FONT: &MonoFont = &FONT_7X14;

/// Small annotation font (6x10 pixels).
pub const ANNOTATION_FONT: &MonoFont = &FONT_6X10;

/// Status strip font (`ProFont` 14pt).
pub const STATUS_FONT: &MonoFont = &PROFONT_14_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Large olive text for "no data" placeholders.
pub const PLACEHOLDER_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, OLIVE);

/// Small olive text for placeholder hints.
pub const HINT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(ANNOTATION_FONT, OLIVE);

/// Small black text for the plotter scale annotation.
pub const ANNOTATION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(ANNOTATION_FONT, BLACK);
