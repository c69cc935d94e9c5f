/// Raw detector output: center x, center y, radius, in image coordinates.
pub type Candidate = (f32, f32, f32);

/// A detected circle snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl Circle {
    pub fn new(x: u32, y: u32, radius: u32) -> Self {
        Self { x, y, radius }
    }

    /// Round a detector candidate to integer pixels.
    /// Negative values clamp to zero.
    pub fn from_candidate(candidate: Candidate) -> Self {
        let (x, y, r) = candidate;
        Self {
            x: round_to_pixel(x),
            y: round_to_pixel(y),
            radius: round_to_pixel(r),
        }
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

fn round_to_pixel(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First candidate of the first iteration that returned any.
    Found {
        circle: Circle,
        /// Mask radius in effect when detection succeeded
        mask_radius: u32,
    },
    /// The mask grew to the image height without a detection.
    NotFound { iterations: u32 },
}

impl SearchOutcome {
    pub fn circle(&self) -> Option<Circle> {
        match self {
            SearchOutcome::Found { circle, .. } => Some(*circle),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_rounds_half_away_from_zero() {
        let circle = Circle::from_candidate((249.5, 250.4, 39.6));
        assert_eq!(circle, Circle::new(250, 250, 40));
    }

    #[test]
    fn negative_candidate_clamps_to_zero() {
        let circle = Circle::from_candidate((-3.2, 10.0, f32::NAN));
        assert_eq!(circle, Circle::new(0, 10, 0));
    }
}
