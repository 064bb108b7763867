//! Overlay geometry

use egui::{Pos2, Vec2};

/// Outer size of the overlay in points
pub const OVERLAY_SIZE: Vec2 = Vec2::new(400.0, 60.0);

/// Top-left position that centers `window` on a monitor of size `monitor`
///
/// Windows larger than the monitor are pinned to the top-left corner.
pub fn centered_origin(monitor: Vec2, window: Vec2) -> Pos2 {
    let offset = ((monitor - window) / 2.0).max(Vec2::ZERO);
    Pos2::new(offset.x.floor(), offset.y.floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_1080p() {
        let origin = centered_origin(Vec2::new(1920.0, 1080.0), OVERLAY_SIZE);
        assert_eq!(origin, Pos2::new(760.0, 510.0));
    }

    #[test]
    fn test_odd_sizes_round_down() {
        let origin = centered_origin(Vec2::new(1365.0, 767.0), OVERLAY_SIZE);
        assert_eq!(origin, Pos2::new(482.0, 353.0));
    }

    #[test]
    fn test_small_monitor_clamps_to_corner() {
        let origin = centered_origin(Vec2::new(300.0, 40.0), OVERLAY_SIZE);
        assert_eq!(origin, Pos2::ZERO);
    }
}
