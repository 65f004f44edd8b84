//! Spectral palette sampling for area colors.

/// Spectral colormap anchors, evenly spaced from 0 to 1.
const SPECTRAL: [[u8; 3]; 11] = [
    [0x9e, 0x01, 0x42],
    [0xd5, 0x3e, 0x4f],
    [0xf4, 0x6d, 0x43],
    [0xfd, 0xae, 0x61],
    [0xfe, 0xe0, 0x8b],
    [0xff, 0xff, 0xbf],
    [0xe6, 0xf5, 0x98],
    [0xab, 0xdd, 0xa4],
    [0x66, 0xc2, 0xa5],
    [0x32, 0x88, 0xbd],
    [0x5e, 0x4f, 0xa2],
];

/// Color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b)
        )
    }

    /// Colormap value at `t` in `[0, 1]` (clamped).
    pub fn spectral_at(t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let segments = (SPECTRAL.len() - 1) as f64;
        let pos = t * segments;
        let lo = (pos.floor() as usize).min(SPECTRAL.len() - 2);
        let frac = pos - lo as f64;

        let a = SPECTRAL[lo];
        let b = SPECTRAL[lo + 1];
        let mix = |i: usize| {
            let (a, b) = (a[i] as f64 / 255.0, b[i] as f64 / 255.0);
            a + (b - a) * frac
        };
        Self::new(mix(0), mix(1), mix(2))
    }
}

/// Ties round to even, matching how the instrument tooling formats hex colors.
fn channel_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8
}

/// `n` colors sampled evenly across the Spectral colormap, first color at
/// the red end. A single color is taken from the violet end.
pub fn spectral_palette(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![Rgb::spectral_at(1.0)],
        _ => (0..n)
            .map(|i| Rgb::spectral_at(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(n: usize) -> Vec<String> {
        spectral_palette(n).iter().map(Rgb::to_hex).collect()
    }

    #[test]
    fn test_eleven_colors_hit_every_anchor() {
        assert_eq!(
            hexes(11),
            vec![
                "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598",
                "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2",
            ]
        );
    }

    #[test]
    fn test_small_palettes() {
        assert!(hexes(0).is_empty());
        assert_eq!(hexes(1), vec!["#5e4fa2"]);
        assert_eq!(hexes(2), vec!["#9e0142", "#5e4fa2"]);
        assert_eq!(hexes(3), vec!["#9e0142", "#ffffbf", "#5e4fa2"]);
    }

    #[test]
    fn test_midpoint_interpolation() {
        // Halfway between the first two anchors.
        let c = Rgb::spectral_at(0.05);
        assert!((c.r - (0x9e as f64 + 0xd5 as f64) / 2.0 / 255.0).abs() < common::EPSILON);
        assert!((c.b - (0x42 as f64 + 0x4f as f64) / 2.0 / 255.0).abs() < common::EPSILON);
    }

    #[test]
    fn test_palette_is_deterministic() {
        assert_eq!(spectral_palette(7), spectral_palette(7));
    }

    #[test]
    fn test_to_hex_clamps_and_pads() {
        assert_eq!(Rgb::new(0.0, 1.0, 2.0).to_hex(), "#00ffff");
        assert_eq!(Rgb::new(-1.0, 1.0 / 255.0, 0.5).to_hex(), "#000180");
    }
}
