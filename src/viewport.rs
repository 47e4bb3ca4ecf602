use bevy::{math::vec2, prelude::*};

/// Camera state in world coordinates.
///
/// World space is y-down: `pan_target` is the top-left corner of the screen and the visible
/// rectangle extends towards `+x` and `+y`. Use [`to_scene`] to get Bevy (y-up) coordinates.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_target: Vec2,
    zoom: f32,
    pub screen_size: Vec2,
}

impl Viewport {
    pub fn new(pan_target: Vec2, zoom: f32, screen_size: Vec2) -> Self {
        assert!(zoom > 0.0, "zoom must be strictly positive, got {zoom}");
        Self {
            pan_target,
            zoom,
            screen_size,
        }
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// `[pan_target, pan_target + screen_size / zoom]`, `min` is the top-left corner.
    #[inline]
    pub fn visible_world_rect(&self) -> Rect {
        Rect {
            min: self.pan_target,
            max: self.pan_target + self.screen_size / self.zoom,
        }
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pan_target) * self.zoom
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.pan_target
    }

    /// Builds the viewport seen by an orthographic camera whose projection uses one world unit
    /// per logical pixel at `scale == 1`.
    pub fn from_camera(translation: Vec2, scale: f32, screen_size: Vec2) -> Self {
        assert!(scale > 0.0, "projection scale must be strictly positive, got {scale}");
        let half = screen_size * scale * 0.5;
        let center = vec2(translation.x, -translation.y);
        Self::new(center - half, 1.0 / scale, screen_size)
    }

    /// Inverse of [`Viewport::from_camera`]: the camera translation centering this viewport.
    pub fn camera_translation(&self) -> Vec2 {
        to_scene(self.visible_world_rect().center())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0, crate::prelude::SCREEN_SIZE)
    }
}

/// world (y-down) to Bevy scene (y-up) coordinates
#[inline]
pub fn to_scene(world: Vec2) -> Vec2 {
    vec2(world.x, -world.y)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn viewport_works() {
        let vp = Viewport::new(vec2(100.0, -50.0), 2.0, vec2(800.0, 450.0));

        let rect = vp.visible_world_rect();
        assert_eq!(vec2(100.0, -50.0), rect.min);
        assert_eq!(vec2(500.0, 175.0), rect.max);

        assert_eq!(Vec2::ZERO, vp.world_to_screen(vp.pan_target));
        assert_eq!(vec2(800.0, 450.0), vp.world_to_screen(rect.max));
        let p = vec2(123.0, 45.5);
        assert_eq!(p, vp.screen_to_world(vp.world_to_screen(p)));
    }

    #[test]
    fn camera_conversion() {
        // unit zoom, camera centered on the screen's middle
        let vp = Viewport::from_camera(vec2(400.0, -225.0), 1.0, vec2(800.0, 450.0));
        assert_eq!(Vec2::ZERO, vp.pan_target);
        assert_eq!(1.0, vp.zoom());
        assert_eq!(vec2(400.0, -225.0), vp.camera_translation());

        // zoomed out twice, the visible area doubles
        let vp = Viewport::from_camera(Vec2::ZERO, 2.0, vec2(800.0, 450.0));
        assert_eq!(0.5, vp.zoom());
        assert_eq!(vec2(-800.0, -450.0), vp.pan_target);
        assert_eq!(vec2(800.0, 450.0), vp.visible_world_rect().max);
    }

    #[test]
    #[should_panic]
    fn zero_zoom_fails_fast() {
        Viewport::new(Vec2::ZERO, 0.0, vec2(800.0, 450.0));
    }

    #[test]
    #[should_panic]
    fn negative_zoom_fails_fast() {
        Viewport::new(Vec2::ZERO, -1.0, vec2(800.0, 450.0));
    }
}
