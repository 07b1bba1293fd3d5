use std::time::Duration;

use ratatui::style::Color;

/// Tween parameters shared by every key on the stage.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationTiming {
    /// Time to fade from full opacity down to `pulse_min_alpha` (and back again).
    pub pulse_half_period: Duration,
    pub pulse_min_alpha: f64,
    /// Time to grow to `flash_scale`; shrinking back takes as long again.
    pub flash_duration: Duration,
    pub flash_scale: f64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            pulse_half_period: Duration::from_millis(500),
            pulse_min_alpha: 0.6,
            flash_duration: Duration::from_millis(100),
            flash_scale: 1.15,
        }
    }
}

/// Goes 0 -> 1 -> 0 over two half-periods, repeating.
fn triangle(elapsed: Duration, half_period: Duration) -> f64 {
    let half = half_period.as_secs_f64();
    if half <= 0.0 {
        return 0.0;
    }
    let phase = (elapsed.as_secs_f64() / half) % 2.0;
    if phase <= 1.0 { phase } else { 2.0 - phase }
}

impl AnimationTiming {
    pub fn pulse_alpha(&self, elapsed: Duration) -> f64 {
        let depth = 1.0 - self.pulse_min_alpha.clamp(0.0, 1.0);
        1.0 - depth * triangle(elapsed, self.pulse_half_period)
    }

    pub fn flash_total(&self) -> Duration {
        self.flash_duration * 2
    }

    pub fn flash_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.flash_total()
    }

    pub fn flash_scale(&self, elapsed: Duration) -> f64 {
        if self.flash_finished(elapsed) {
            return 1.0;
        }
        1.0 + (self.flash_scale - 1.0) * triangle(elapsed, self.flash_duration)
    }
}

/// Composite `fg` at `alpha` opacity over `bg`. Only RGB colors can be mixed;
/// anything else snaps to whichever side dominates.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |f: u8, b: u8| (f as f64 * alpha + b as f64 * (1.0 - alpha)).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if alpha >= 0.5 => fg,
        _ => bg,
    }
}
