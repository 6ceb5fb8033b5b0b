use crate::math::curve::point2d::Point2D;
use crate::math::integrand::integrand::Integrand;

/// Samples the weighted integrand e^(−x)·f(x) on a uniform grid for
/// plotting. Purely illustrative; nothing here feeds the integrators.
pub struct WeightSampler {
    start: f64,
    end: f64,
    step: f64
}

impl WeightSampler {
    /// Grids with more points than this are refused rather than allocated.
    pub const MAX_SAMPLES: usize = 1_000_000;

    pub fn new(start: f64, end: f64, step: f64) -> Option<WeightSampler> {
        if !(step > 0.0) || !(start < end) || !start.is_finite() || !end.is_finite() {
            return None;
        }
        if (end - start) / step > Self::MAX_SAMPLES as f64 {
            return None;
        }
        Some(WeightSampler { start, end, step })
    }

    /// x ∈ [start, end): the first point is always `start`, the grid stops
    /// short of `end`.
    pub fn sample<F>(&self, f: &F) -> Vec<Point2D> where
        F: Integrand + ?Sized {
        let mut points = Vec::new();
        for i in 0..=Self::MAX_SAMPLES {
            let x = self.start + i as f64 * self.step;
            if x >= self.end {
                break;
            }
            points.push(Point2D::new(x, (-x).exp() * f.value(x)));
        }
        points
    }
}

impl Default for WeightSampler {
    fn default() -> Self {
        WeightSampler { start: 0.0, end: 10.0, step: 0.1 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_half_open() {
        let f = |_x: f64| 1.0;
        let points = WeightSampler::default().sample(&f);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], Point2D::new(0.0, 1.0));
        assert!((points[99].x() - 9.9).abs() < 1e-12);
        assert!(points.windows(2).all(|pair| pair[1].y() < pair[0].y()));
    }

    #[test]
    fn rejects_empty_grids() {
        assert!(WeightSampler::new(0.0, 10.0, 0.0).is_none());
        assert!(WeightSampler::new(1.0, 1.0, 0.1).is_none());
        assert_eq!(WeightSampler::new(0.0, 1.0, 0.25).unwrap().sample(&|x: f64| x).len(), 4);
    }

    #[test]
    fn grid_shorter_than_one_step_keeps_its_start() {
        let points = WeightSampler::new(0.0, 1e-10, 1.0).unwrap().sample(&|x: f64| x);
        assert_eq!(points, vec![Point2D::new(0.0, 0.0)]);
    }

    #[test]
    fn oversized_grids_are_refused() {
        assert!(WeightSampler::new(0.0, 10.0, 1e-12).is_none());
        let dense = WeightSampler::new(0.0, 1.0, 2.0 / WeightSampler::MAX_SAMPLES as f64).unwrap();
        let count = dense.sample(&|_x: f64| 1.0).len();
        assert!((500_000..=500_001).contains(&count), "{}", count);
    }
}
