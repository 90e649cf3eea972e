use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::OrreryLayoutError;

/// Default center of the circular region, in the layout's abstract length unit.
pub const DEFAULT_CENTER_OFFSET: f32 = 9.0;

/// Default bounds on marker diameter.
pub const DEFAULT_SIZE_RANGE: (f32, f32) = (5.0, 6.0);

/// Default bounds on marker distance from the center.
pub const DEFAULT_DISTANCE_RANGE: (f32, f32) = (5.0, 6.0);

/// Position and size of a single marker, in the same unit as the layout's
/// center offset.
///
/// `top` and `left` locate the top-left corner of the marker's bounding box,
/// placed so that the box is centered on the sampled polar coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    pub size: f32,
    pub top: f32,
    pub left: f32,
}

impl MarkerPlacement {
    /// Center of the marker's bounding box as `(top, left)` coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.top + self.size / 2.0, self.left + self.size / 2.0)
    }
}

/// A radial layout scatters markers over an annulus around a fixed center.
///
/// The circle is divided into one uniform angular slice per marker. Each
/// marker's angle is jittered within its own slice, inset from the slice
/// boundaries by a quarter-slice buffer, so markers in adjacent slices can
/// never touch. A single rotational offset is drawn per computation and
/// applied to every slice, rotating the whole ring together while preserving
/// the slice assignment.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    item_count: usize,
    size_range: (f32, f32),
    distance_range: (f32, f32),
    center_offset: f32,
}

impl RadialLayout {
    /// Creates a new radial layout for the given number of markers.
    ///
    /// # Defaults
    /// - size_range: (5.0, 6.0)
    /// - distance_range: (5.0, 6.0)
    /// - center_offset: 9.0
    pub fn try_new(item_count: usize) -> Result<Self, OrreryLayoutError> {
        if item_count == 0 {
            return Err(OrreryLayoutError::EmptyLayout);
        }
        Ok(Self {
            item_count,
            size_range: DEFAULT_SIZE_RANGE,
            distance_range: DEFAULT_DISTANCE_RANGE,
            center_offset: DEFAULT_CENTER_OFFSET,
        })
    }

    /// Sets the bounds on marker diameter as (min, max).
    ///
    /// A degenerate interval (min == max) pins every marker to that diameter.
    pub fn size_range(mut self, range: (f32, f32)) -> Result<Self, OrreryLayoutError> {
        validate_interval(range)?;
        self.size_range = range;
        Ok(self)
    }

    /// Sets the bounds on marker distance from the center as (min, max).
    ///
    /// A degenerate interval (min == max) pins every marker to that distance.
    pub fn distance_range(mut self, range: (f32, f32)) -> Result<Self, OrreryLayoutError> {
        validate_interval(range)?;
        self.distance_range = range;
        Ok(self)
    }

    /// Sets the center of the circular region.
    pub fn center_offset(mut self, center_offset: f32) -> Self {
        self.center_offset = center_offset;
        self
    }

    /// Returns the number of markers this layout places.
    pub fn get_item_count(&self) -> usize {
        self.item_count
    }

    /// Returns the bounds on marker diameter.
    pub fn get_size_range(&self) -> (f32, f32) {
        self.size_range
    }

    /// Returns the bounds on marker distance from the center.
    pub fn get_distance_range(&self) -> (f32, f32) {
        self.distance_range
    }

    /// Returns the center of the circular region.
    pub fn get_center_offset(&self) -> f32 {
        self.center_offset
    }

    /// Angular width of the slice assigned to each marker, in radians.
    pub fn slice_width(&self) -> f32 {
        TAU / self.item_count as f32
    }

    /// Angular margin kept between a marker and its slice boundaries.
    pub fn angle_buffer(&self) -> f32 {
        self.slice_width() / 4.0
    }

    /// Computes one placement per item using the process-wide random source.
    pub fn compute(&self) -> Vec<MarkerPlacement> {
        self.compute_with(&mut rand::thread_rng())
    }

    /// Computes one placement per item using the supplied random source.
    ///
    /// Placements are returned in item order. Each call is independent: the
    /// layout holds no state between computations, so callers are free to
    /// recompute whenever their item set changes.
    pub fn compute_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<MarkerPlacement> {
        let slice = self.slice_width();
        let buffer = self.angle_buffer();
        let offset = sample(rng, (0.0, slice));

        (0..self.item_count)
            .map(|i| {
                let size = sample(rng, self.size_range);
                let angle =
                    sample(rng, (0.0, slice - 2.0 * buffer)) + slice * i as f32 + buffer + offset;
                let distance = sample(rng, self.distance_range);
                MarkerPlacement {
                    size,
                    top: self.center_offset + angle.cos() * distance - size / 2.0,
                    left: self.center_offset + angle.sin() * distance - size / 2.0,
                }
            })
            .collect()
    }
}

fn validate_interval((min, max): (f32, f32)) -> Result<(), OrreryLayoutError> {
    if min > max {
        return Err(OrreryLayoutError::IntervalNotAscending { min, max });
    }
    Ok(())
}

// A degenerate interval yields its single value without consuming a draw.
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-4;

    /// Angle of the placement's center around the layout center, in [0, TAU).
    fn placement_angle(placement: &MarkerPlacement, center_offset: f32) -> f32 {
        let (top, left) = placement.center();
        (left - center_offset)
            .atan2(top - center_offset)
            .rem_euclid(TAU)
    }

    fn placement_distance(placement: &MarkerPlacement, center_offset: f32) -> f32 {
        let (top, left) = placement.center();
        (top - center_offset).hypot(left - center_offset)
    }

    /// Lifts wrapped angles back into a monotonically increasing sequence.
    fn unwrap_angles(placements: &[MarkerPlacement], center_offset: f32) -> Vec<f32> {
        let mut unwrapped: Vec<f32> = Vec::with_capacity(placements.len());
        for placement in placements {
            let mut angle = placement_angle(placement, center_offset);
            if let Some(prev) = unwrapped.last() {
                while angle < *prev {
                    angle += TAU;
                }
            }
            unwrapped.push(angle);
        }
        unwrapped
    }

    #[test]
    fn test_radial_layout_defaults() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(4)?;

        assert_eq!(layout.get_item_count(), 4);
        assert_eq!(layout.get_size_range(), (5.0, 6.0));
        assert_eq!(layout.get_distance_range(), (5.0, 6.0));
        assert_eq!(layout.get_center_offset(), 9.0);
        assert_approx_eq!(f32, layout.slice_width(), TAU / 4.0);
        assert_approx_eq!(f32, layout.angle_buffer(), TAU / 16.0);
        Ok(())
    }

    #[test]
    fn test_zero_items_rejected() {
        assert_eq!(
            RadialLayout::try_new(0).unwrap_err(),
            OrreryLayoutError::EmptyLayout
        );
    }

    #[test]
    fn test_descending_interval_rejected() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(3)?;

        assert_eq!(
            layout.clone().size_range((6.0, 5.0)).unwrap_err(),
            OrreryLayoutError::IntervalNotAscending { min: 6.0, max: 5.0 }
        );
        assert_eq!(
            layout.distance_range((2.0, 1.0)).unwrap_err(),
            OrreryLayoutError::IntervalNotAscending { min: 2.0, max: 1.0 }
        );
        Ok(())
    }

    #[test]
    fn test_marker_count_matches_items() -> Result<(), OrreryLayoutError> {
        for item_count in 1..=8 {
            let placements = RadialLayout::try_new(item_count)?.compute();
            assert_eq!(placements.len(), item_count);
        }
        Ok(())
    }

    #[test]
    fn test_angles_stay_within_slices() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(5)?;
        let slice = layout.slice_width();
        let buffer = layout.angle_buffer();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let placements = layout.compute_with(&mut rng);
            let angles = unwrap_angles(&placements, layout.get_center_offset());

            // Consecutive markers sit in consecutive slices, so their gap can
            // never shrink below twice the buffer or stretch past two slices
            // minus it.
            for pair in angles.windows(2) {
                let gap = pair[1] - pair[0];
                assert!(gap > 2.0 * buffer - EPS, "gap {gap} too small");
                assert!(gap < 2.0 * (slice - buffer) + EPS, "gap {gap} too large");
            }

            // All markers share one rotational offset, so their in-slice
            // phases spread less than the jitter span and stay inside the
            // buffered portion of the rotated slices.
            let phases: Vec<f32> = angles
                .iter()
                .enumerate()
                .map(|(i, angle)| angle - slice * i as f32)
                .collect();
            let min = phases.iter().copied().fold(f32::INFINITY, f32::min);
            let max = phases.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            assert!(min > buffer - EPS);
            assert!(max < 2.0 * slice - buffer + EPS);
            assert!(max - min < slice - 2.0 * buffer + EPS);
        }
        Ok(())
    }

    #[test]
    fn test_sizes_and_distances_within_bounds() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(6)?
            .size_range((2.0, 3.0))?
            .distance_range((4.0, 7.0))?
            .center_offset(10.0);
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..50 {
            for placement in layout.compute_with(&mut rng) {
                assert!(placement.size >= 2.0 && placement.size <= 3.0);
                let distance = placement_distance(&placement, 10.0);
                assert!(distance >= 4.0 - EPS && distance <= 7.0 + EPS);
            }
        }
        Ok(())
    }

    #[test]
    fn test_four_markers_occupy_disjoint_quarters() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(4)?
            .size_range((5.0, 5.0))?
            .distance_range((5.0, 5.0))?;
        let slice = layout.slice_width();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let placements = layout.compute_with(&mut rng);
            let angles = unwrap_angles(&placements, 9.0);

            // Relative to the shared rotation of the ring, each marker stays
            // within half a slice of its own quarter's midline.
            for (i, angle) in angles.iter().enumerate() {
                let relative = angle - angles[0];
                assert!((relative - slice * i as f32).abs() < slice / 2.0);
            }

            for placement in &placements {
                assert_approx_eq!(f32, placement.size, 5.0);
                assert_approx_eq!(f32, placement_distance(placement, 9.0), 5.0, epsilon = EPS);
            }
        }
        Ok(())
    }

    #[test]
    fn test_fixed_seed_is_deterministic() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(3)?;

        let first = layout.compute_with(&mut StdRng::seed_from_u64(7));
        let second = layout.compute_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_floor_draws_land_on_slice_starts() -> Result<(), OrreryLayoutError> {
        // A constant all-zeros source drives every uniform draw to its lower
        // bound: no ring rotation, no jitter, minimum size and distance.
        let layout = RadialLayout::try_new(4)?;
        let placements = layout.compute_with(&mut StepRng::new(0, 0));
        let slice = layout.slice_width();
        let buffer = layout.angle_buffer();

        for (i, placement) in placements.iter().enumerate() {
            assert_approx_eq!(f32, placement.size, 5.0);
            assert_approx_eq!(
                f32,
                placement_angle(placement, 9.0),
                slice * i as f32 + buffer,
                epsilon = EPS
            );
            assert_approx_eq!(f32, placement_distance(placement, 9.0), 5.0, epsilon = EPS);
        }
        Ok(())
    }

    #[test]
    fn test_single_marker_degenerate_intervals() -> Result<(), OrreryLayoutError> {
        let layout = RadialLayout::try_new(1)?
            .size_range((6.0, 6.0))?
            .distance_range((6.0, 6.0))?;
        let placements = layout.compute();

        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].size, 6.0);
        assert_approx_eq!(f32, placement_distance(&placements[0], 9.0), 6.0, epsilon = EPS);
        Ok(())
    }
}
