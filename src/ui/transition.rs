use crate::ui::raster::{Surface, mix};

/// Fades the last frame of the previous visual state out over the new one.
#[derive(Debug, Clone)]
pub struct Crossfade {
    from: Surface,
    elapsed: f32,
    duration: f32,
}

impl Crossfade {
    pub fn new(from: Surface, duration: f32) -> Self {
        Self {
            from,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased 0..=1 progress towards the new state.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }

    /// Mixes the old frame over `surface`. A size mismatch means the viewport
    /// changed mid-fade; the new frame is left as is.
    pub fn composite(&self, surface: &mut Surface) {
        let width = surface.width();
        if self.from.width() != width || self.from.height() != surface.height() {
            return;
        }
        let alpha = 1.0 - self.progress();
        if alpha <= 0.0 {
            return;
        }
        for (y, old) in self.from.pixels().chunks_exact(width.max(1)).enumerate() {
            let Some(row) = surface.row_mut(y) else {
                break;
            };
            for (px, old) in row.iter_mut().zip(old) {
                *px = mix(*px, *old, alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visual::Rgb;

    fn filled(width: usize, height: usize, color: Rgb) -> Surface {
        let mut surface = Surface::new(width, height);
        surface.clear(color);
        surface
    }

    #[test]
    fn starts_on_the_old_frame_and_ends_on_the_new_one() {
        let white = Rgb::new(255, 255, 255);
        let mut fade = Crossfade::new(filled(4, 3, white), 0.6);

        let mut frame = Surface::new(4, 3);
        fade.composite(&mut frame);
        assert!(frame.pixels().iter().all(|px| *px == white));

        fade.advance(0.3);
        let mut frame = Surface::new(4, 3);
        fade.composite(&mut frame);
        let mid = frame.pixel(1, 1).unwrap();
        assert!(mid.r > 100 && mid.r < 155, "{mid:?}");

        fade.advance(0.3);
        assert!(fade.is_done());
        let mut frame = Surface::new(4, 3);
        fade.composite(&mut frame);
        assert!(frame.pixels().iter().all(|px| *px == Rgb::BLACK));
    }

    #[test]
    fn progress_is_eased_and_monotonic() {
        let mut fade = Crossfade::new(Surface::new(1, 1), 1.0);
        let mut last = fade.progress();
        assert!(last.abs() < f32::EPSILON);
        for _ in 0..10 {
            fade.advance(0.1);
            let next = fade.progress();
            assert!(next >= last);
            last = next;
        }
        assert!((last - 1.0).abs() < 1e-4);

        let mut early = Crossfade::new(Surface::new(1, 1), 1.0);
        early.advance(0.1);
        assert!(early.progress() < 0.1);
    }

    #[test]
    fn mismatched_sizes_are_left_alone() {
        let fade = Crossfade::new(filled(4, 3, Rgb::new(255, 0, 0)), 0.4);
        let mut frame = Surface::new(6, 3);
        fade.composite(&mut frame);
        assert!(frame.pixels().iter().all(|px| *px == Rgb::BLACK));
    }

    #[test]
    fn zero_duration_is_done_immediately() {
        let fade = Crossfade::new(Surface::new(2, 2), 0.0);
        assert!(fade.is_done());
        assert!((fade.progress() - 1.0).abs() < f32::EPSILON);
    }
}
