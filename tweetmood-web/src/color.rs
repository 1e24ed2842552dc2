//! Sentiment to color mapping.
//!
//! The gradient walks HSL space from pure red to web green, so the midpoint is
//! a dark yellow rather than the muddy brown a straight RGB blend would give.
use tweetmood_social::Post;

/// Number of stops in the red to green gradient.
pub const STOPS: usize = 100;

const NEUTRAL_INDEX: usize = STOPS / 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

// #ff0000
const RED: Hsl = Hsl { h: 0.0, s: 1.0, l: 0.5 };
// #008000
const GREEN: Hsl = Hsl { h: 1.0 / 3.0, s: 1.0, l: 64.0 / 255.0 };

/// Precomputed `#rrggbb` color stops, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<String>,
}

impl Gradient {
    pub fn red_to_green() -> Self {
        Self::between(RED, GREEN, STOPS)
    }

    fn between(start: Hsl, end: Hsl, count: usize) -> Self {
        let steps = count.saturating_sub(1).max(1) as f64;
        let stops = (0..count)
            .map(|i| {
                let t = i as f64 / steps;
                let hsl = Hsl {
                    h: start.h + (end.h - start.h) * t,
                    s: start.s + (end.s - start.s) * t,
                    l: start.l + (end.l - start.l) * t,
                };
                to_hex(hsl_to_rgb(hsl))
            })
            .collect();
        Self { stops }
    }

    pub fn stop(&self, index: usize) -> Option<&str> {
        self.stops.get(index).map(String::as_str)
    }

    pub fn color_for(&self, score: f64) -> &str {
        let index = gradient_index(score).min(self.stops.len().saturating_sub(1));
        self.stops.get(index).map(String::as_str).unwrap_or("#000000")
    }
}

/// Rescales a score from `[-1, 1]` onto `[0, 100]`, rounds half away from zero
/// and clamps to the last stop.
pub fn gradient_index(score: f64) -> usize {
    if !score.is_finite() {
        return NEUTRAL_INDEX;
    }
    let (old_min, old_max) = (-1.0, 1.0);
    let (new_min, new_max) = (0.0, STOPS as f64);
    let rescaled = ((score - old_min) * (new_max - new_min)) / (old_max - old_min) + new_min;
    rescaled.round().clamp(0.0, (STOPS - 1) as f64) as usize
}

/// Sets `color` on every post from its score.
pub fn add_color(posts: &mut [Post], gradient: &Gradient) {
    for post in posts.iter_mut() {
        post.color = Some(gradient.color_for(post.score).to_string());
    }
}

fn hsl_to_rgb(Hsl { h, s, l }: Hsl) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let v2 = if l < 0.5 { l * (1.0 + s) } else { (l + s) - s * l };
    let v1 = 2.0 * l - v2;
    [
        hue_to_channel(v1, v2, h + 1.0 / 3.0),
        hue_to_channel(v1, v2, h),
        hue_to_channel(v1, v2, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(v1: f64, v2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if 6.0 * hue < 1.0 {
        v1 + (v2 - v1) * 6.0 * hue
    } else if 2.0 * hue < 1.0 {
        v2
    } else if 3.0 * hue < 2.0 {
        v1 + (v2 - v1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        v1
    }
}

fn to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn post(score: f64) -> Post {
        Post {
            id: 1,
            created: date!(2020 - 01 - 06),
            reposts: 0,
            text: String::new(),
            hashtags: vec![],
            urls: vec![],
            mentions: vec![],
            score,
            color: None,
        }
    }

    #[test]
    fn gradient_runs_from_red_to_green() {
        let gradient = Gradient::red_to_green();
        assert_eq!(gradient.stop(0), Some("#ff0000"));
        assert_eq!(gradient.stop(STOPS - 1), Some("#008000"));
        assert_eq!(gradient.stop(STOPS), None);
        for i in 0..STOPS {
            let stop = gradient.stop(i).unwrap();
            assert_eq!(stop.len(), 7);
            assert!(stop.starts_with('#'));
        }
    }

    #[test]
    fn index_anchors() {
        assert_eq!(gradient_index(-1.0), 0);
        assert_eq!(gradient_index(0.0), 50);
        assert_eq!(gradient_index(1.0), 99);
        assert_eq!(gradient_index(0.5), 75);
        assert_eq!(gradient_index(-0.5), 25);
        assert_eq!(gradient_index(0.004), 50);
        assert_eq!(gradient_index(-0.1), 45);
        // 0.99 rescales past the last stop.
        assert_eq!(gradient_index(0.99), 99);
    }

    #[test]
    fn index_is_bounded_and_monotonic() {
        let mut last = 0;
        for step in 0..=2000 {
            let score = -1.0 + step as f64 / 1000.0;
            let index = gradient_index(score);
            assert!(index < STOPS);
            assert!(index >= last);
            last = index;
        }
        assert_eq!(gradient_index(5.0), 99);
        assert_eq!(gradient_index(-5.0), 0);
        assert_eq!(gradient_index(f64::NAN), 50);
    }

    #[test]
    fn add_color_annotates_each_post() {
        let gradient = Gradient::red_to_green();
        let mut posts = vec![post(-1.0), post(0.0), post(1.0)];
        add_color(&mut posts, &gradient);
        let colors: Vec<_> = posts.iter().map(|p| p.color.as_deref()).collect();
        assert_eq!(
            colors,
            [
                gradient.stop(0),
                gradient.stop(50),
                gradient.stop(99),
            ]
        );
        assert_eq!(posts[2].color.as_deref(), Some("#008000"));
    }
}
