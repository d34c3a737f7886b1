//! Packed RGBA8 color with fixed-point alpha compositing.
//!
//! Alpha is stored as 0..=255 but blends with weight `a + 1` out of 256, so
//! 255 is fully opaque and 0 still carries 1/256 of its color. All blending
//! widens to u32 and shifts back down; nothing here touches floating point
//! except [`Color::from_temperature`].

/// An 8-bit per channel color with alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the result of a ray that hits nothing.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// True when nothing behind this color can show through.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Composite `self` over `under` ("over" operator).
    ///
    /// The top weighs `a + 1` (scaled by 256), the bottom weighs what the top
    /// lets through times its own weight, `(256 - a) * (under.a + 1)`. The
    /// resulting alpha is `1 - (1 - a)(1 - under.a)` in the 0..256 domain.
    /// Order matters: `x.overlay(y)` puts `x` in front.
    pub fn overlay(self, under: Color) -> Color {
        let a = self.a as u32;
        let top = (a + 1) << 8;
        let bottom = (256 - a) * (under.a as u32 + 1);
        let mix = |front: u8, back: u8| ((front as u32 * top + back as u32 * bottom) >> 16) as u8;

        Color {
            r: mix(self.r, under.r),
            g: mix(self.g, under.g),
            b: mix(self.b, under.b),
            a: ((65536 - (256 - a) * (256 - under.a as u32)) >> 8) as u8,
        }
    }

    /// Tint `self` with a reflected color.
    ///
    /// `weight` plays the role of alpha for the reflection: 0 keeps the
    /// surface color, 255 is almost entirely the reflection. The surface's
    /// own alpha is left as it is.
    pub fn overlay_reflection(self, reflected: Color, weight: u8) -> Color {
        let w = weight as u32;
        let surface = (256 - w) << 8;
        let mirror = w * (reflected.a as u32 + 1);
        let mix = |own: u8, refl: u8| ((own as u32 * surface + refl as u32 * mirror) >> 16) as u8;

        Color {
            r: mix(self.r, reflected.r),
            g: mix(self.g, reflected.g),
            b: mix(self.b, reflected.b),
            a: self.a,
        }
    }

    /// False-color ramp for a value roughly in [0, 1].
    ///
    /// Each channel is a tent centered at 0.75 (red), 0.5 (green) and 0.25
    /// (blue) with a peak of 384 and slope 1024, clamped to 0..=255. The
    /// returned color is opaque.
    pub fn from_temperature(t: f32) -> Color {
        let tent = |center: f32| (384.0 - (center - t).abs() * 1024.0) as i32;
        let clamp = |v: i32| v.clamp(0, 255) as u8;

        Color {
            r: clamp(tent(0.75)),
            g: clamp(tent(0.50)),
            b: clamp(tent(0.25)),
            a: 255,
        }
    }

    /// RGB weighted by alpha: `channel * (a + 1) >> 8`.
    pub fn premultiplied_rgb(&self) -> [u8; 3] {
        let alpha = self.a as u32 + 1;
        let scale = |c: u8| ((c as u32 * alpha) >> 8) as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }

    /// Scale RGB by `mul / 256`, keeping alpha.
    pub fn scaled(self, mul: u32) -> Color {
        let scale = |c: u8| ((c as u32 * mul) >> 8).min(255) as u8;
        Color {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}
