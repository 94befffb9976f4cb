//! Geometry constants — physical page dimensions in pixel-equivalent units.
//!
//! Every comparison in the engine runs in CSS reference pixels (96 px per
//! inch) so heights read back from a render surface and page budgets derived
//! from physical paper sizes share one basis. Conversions live here and
//! nowhere else.

use serde::{Deserialize, Serialize};

use crate::models::LayoutParameters;

/// CSS reference pixel density.
pub const PX_PER_IN: f32 = 96.0;

pub const MM_PER_IN: f32 = 25.4;

/// ~3.7795 px per millimetre.
pub const PX_PER_MM: f32 = PX_PER_IN / MM_PER_IN;

/// Physical paper presets supported by the editor's templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    pub fn width_mm(&self) -> f32 {
        match self {
            PageSize::A4 => 210.0,
            PageSize::Letter => 215.9,
        }
    }

    pub fn height_mm(&self) -> f32 {
        match self {
            PageSize::A4 => 297.0,
            PageSize::Letter => 279.4,
        }
    }

    pub fn width_px(&self) -> f32 {
        mm_to_px(self.width_mm())
    }

    pub fn height_px(&self) -> f32 {
        mm_to_px(self.height_mm())
    }
}

pub fn in_to_px(inches: f32) -> f32 {
    inches * PX_PER_IN
}

pub fn mm_to_px(mm: f32) -> f32 {
    mm * PX_PER_MM
}

/// Per-page content budget: page height minus top and bottom margins, in
/// the same pixel basis as extracted measurements.
pub fn usable_height_px(layout: &LayoutParameters) -> f32 {
    layout.page_size.height_px()
        - in_to_px(layout.margin_top_in)
        - in_to_px(layout.margin_bottom_in)
}

/// Width available to content between the left and right margins. The
/// render collaborator mounts the off-screen surface at this width so
/// wrapping matches the final page exactly.
pub fn content_width_px(layout: &LayoutParameters) -> f32 {
    layout.page_size.width_px()
        - in_to_px(layout.margin_left_in)
        - in_to_px(layout.margin_right_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayoutParameters;

    #[test]
    fn test_px_per_mm_constant() {
        assert!((PX_PER_MM - 3.7795).abs() < 1e-3, "96/25.4 should be ~3.7795");
    }

    #[test]
    fn test_a4_usable_height_with_default_margins() {
        // A4 (297mm) with 0.75" top/bottom margins: ~1122.5px - 144px ≈ 978.5px.
        let layout = LayoutParameters::default_a4();
        let usable = usable_height_px(&layout);
        assert!(
            (usable - 978.5).abs() < 1.0,
            "A4 with 0.75in margins should yield ~978.5px usable, got {usable}"
        );
    }

    #[test]
    fn test_letter_shorter_than_a4() {
        assert!(PageSize::Letter.height_px() < PageSize::A4.height_px());
        assert!(PageSize::Letter.width_px() > PageSize::A4.width_px());
    }

    #[test]
    fn test_content_width_subtracts_both_side_margins() {
        let mut layout = LayoutParameters::default_a4();
        layout.margin_left_in = 1.0;
        layout.margin_right_in = 0.5;
        let width = content_width_px(&layout);
        let expected = PageSize::A4.width_px() - 144.0;
        assert!((width - expected).abs() < 1e-3);
    }
}
