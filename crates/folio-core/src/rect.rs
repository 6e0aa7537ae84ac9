/// Snapshot of an element's bounding box in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// 2D translate + scale applied with `transform-origin: top left`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl PanelTransform {
    pub const IDENTITY: PanelTransform = PanelTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Transform that makes an element laid out at `panel` appear at `target`.
    ///
    /// Degenerate panels map to identity; there is nothing to scale from.
    pub fn mapping(panel: Rect, target: Rect) -> PanelTransform {
        if panel.is_degenerate() {
            return PanelTransform::IDENTITY;
        }
        PanelTransform {
            translate_x: target.left - panel.left,
            translate_y: target.top - panel.top,
            scale_x: target.width / panel.width,
            scale_y: target.height / panel.height,
        }
    }

    /// Where `panel` ends up on screen with this transform applied.
    pub fn apply(&self, panel: Rect) -> Rect {
        Rect {
            left: panel.left + self.translate_x,
            top: panel.top + self.translate_y,
            width: panel.width * self.scale_x,
            height: panel.height * self.scale_y,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) scale({:.5}, {:.5})",
            self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_lands_panel_on_target() {
        let panel = Rect::new(320.0, 80.0, 640.0, 480.0);
        let card = Rect::new(100.0, 200.0, 300.0, 120.0);
        let t = PanelTransform::mapping(panel, card);
        assert_eq!(t.apply(panel), card);
    }

    #[test]
    fn degenerate_panel_maps_to_identity() {
        let t = PanelTransform::mapping(Rect::new(0.0, 0.0, 0.0, 10.0), Rect::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(t, PanelTransform::IDENTITY);
    }

    #[test]
    fn css_string_contains_translate_then_scale() {
        let css = PanelTransform::IDENTITY.to_css();
        assert!(css.starts_with("translate(0.000px, 0.000px)"));
        assert!(css.ends_with("scale(1.00000, 1.00000)"));
    }
}
