use colorgrad::Color;
use image::Rgb;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const DARK_BLUE: Rgb<u8> = Rgb([0, 0, 139]);

/// Linear blend in RGB, `factor` clamped to [0, 1].
pub fn colour_between(start: Rgb<u8>, end: Rgb<u8>, factor: f64) -> Rgb<u8> {
    let start = Color::from_rgb_u8(start[0], start[1], start[2]);
    let end = Color::from_rgb_u8(end[0], end[1], end[2]);

    let (r, g, b, _) = start.interpolate_rgb(&end, factor.max(0.0).min(1.0)).rgba_u8();

    Rgb([r, g, b])
}

/// Logarithmic banding for escape counts, 0 for an immediate escape and 1 at the budget.
pub fn escape_factor(iterations: usize, maximum_iteration: usize) -> f64 {
    (1.0 + iterations as f64).ln() / (1.0 + maximum_iteration as f64).ln()
}

/// Channel-wise mean of the anti-aliasing samples, truncated.
pub fn mean_colour<I: IntoIterator<Item = Rgb<u8>>>(colours: I) -> Rgb<u8> {
    let mut total = [0u32; 3];
    let mut count = 0u32;

    for colour in colours {
        total[0] += colour[0] as u32;
        total[1] += colour[1] as u32;
        total[2] += colour[2] as u32;
        count += 1;
    }

    if count > 1 {
        for channel in total.iter_mut() {
            *channel /= count;
        }
    }

    Rgb([total[0] as u8, total[1] as u8, total[2] as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_end_points() {
        assert_eq!(colour_between(DARK_BLUE, WHITE, 0.0), DARK_BLUE);
        assert_eq!(colour_between(DARK_BLUE, WHITE, 1.0), WHITE);
        assert_eq!(colour_between(DARK_BLUE, WHITE, 2.0), WHITE);
    }

    #[test]
    fn blend_midpoint() {
        let Rgb([r, g, b]) = colour_between(BLACK, WHITE, 0.5);

        assert!(r == 127 || r == 128);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn escape_factor_is_logarithmic() {
        assert_eq!(escape_factor(0, 100), 0.0);
        assert!((escape_factor(100, 100) - 1.0).abs() < 1e-15);
        assert!(escape_factor(10, 100) > 10.0 / 100.0);
    }

    #[test]
    fn mean_truncates() {
        let colours = vec![Rgb([255, 0, 10]), Rgb([0, 0, 11]), Rgb([0, 1, 10]), Rgb([0, 0, 10])];

        assert_eq!(mean_colour(colours), Rgb([63, 0, 10]));
    }

    #[test]
    fn mean_of_single_or_no_sample() {
        assert_eq!(mean_colour(vec![Rgb([1, 2, 3])]), Rgb([1, 2, 3]));
        assert_eq!(mean_colour(Vec::new()), BLACK);
    }
}
