use image::GrayImage;
use tracing::debug;
use crate::detection::{preprocessing, CircleDetector, HoughParams};
use crate::models::Candidate;

/// Gradient-based circular Hough transform.
///
/// Every Canny edge pixel votes along its Sobel gradient line (both ways) into a
/// center accumulator downscaled by `dp`. Accumulator peaks become center
/// candidates; each surviving center then gets the radius with the most edge
/// support.
pub struct HoughGradientDetector {
    pub params: HoughParams,
}

impl HoughGradientDetector {
    pub fn new(params: HoughParams) -> Self {
        Self { params }
    }
}

impl Default for HoughGradientDetector {
    fn default() -> Self {
        Self::new(HoughParams::default())
    }
}

struct Accumulator {
    data: Vec<u32>,
    cols: usize,
    rows: usize,
}

impl Accumulator {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            data: vec![0; cols * rows],
            cols,
            rows,
        }
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.cols + x]
    }

    #[inline]
    fn vote(&mut self, x: usize, y: usize) {
        self.data[y * self.cols + x] += 1;
    }

    /// Cells above `threshold` that beat their left/up neighbours and tie or
    /// beat their right/down neighbours, strongest first.
    fn peaks(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        let mut peaks = Vec::new();
        if self.cols < 3 || self.rows < 3 {
            return peaks;
        }

        for y in 1..self.rows - 1 {
            for x in 1..self.cols - 1 {
                let v = self.get(x, y);
                if v > threshold
                    && v > self.get(x - 1, y)
                    && v >= self.get(x + 1, y)
                    && v > self.get(x, y - 1)
                    && v >= self.get(x, y + 1)
                {
                    peaks.push((x, y, v));
                }
            }
        }

        // Stable sort keeps scan order among equal vote counts
        peaks.sort_by(|a, b| b.2.cmp(&a.2));
        peaks
    }

    /// Vote-weighted centroid of the 3x3 neighbourhood, in accumulator units
    fn refined_center(&self, x: usize, y: usize) -> (f32, f32) {
        let mut sum = 0.0f32;
        let mut sx = 0.0f32;
        let mut sy = 0.0f32;
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                let w = self.get(nx, ny) as f32;
                sum += w;
                sx += w * (nx as f32 + 0.5);
                sy += w * (ny as f32 + 0.5);
            }
        }
        if sum == 0.0 {
            return (x as f32 + 0.5, y as f32 + 0.5);
        }
        (sx / sum, sy / sum)
    }
}

impl CircleDetector for HoughGradientDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<Candidate> {
        let p = &self.params;
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let edges = preprocessing::detect_edges(gray, p.param1);
        let (dx, dy) = preprocessing::gradients(gray);

        let min_r = p.min_radius.max(1);
        let max_r = p.effective_max_radius(width, height);
        if max_r < min_r {
            return Vec::new();
        }

        let idp = 1.0 / p.dp;
        let cols = (width as f32 * idp).ceil() as usize;
        let rows = (height as f32 * idp).ceil() as usize;
        let mut acc = Accumulator::new(cols, rows);
        let mut edge_points: Vec<(f32, f32)> = Vec::new();

        // Step 1: vote for centers along gradient lines
        for (x, y, pixel) in edges.enumerate_pixels() {
            if pixel[0] == 0 {
                continue;
            }
            let vx = dx.get_pixel(x, y)[0] as f32;
            let vy = dy.get_pixel(x, y)[0] as f32;
            let mag = (vx * vx + vy * vy).sqrt();
            if mag == 0.0 {
                continue;
            }

            let (fx, fy) = (x as f32, y as f32);
            edge_points.push((fx, fy));
            let (ux, uy) = (vx / mag, vy / mag);

            for sign in [1.0f32, -1.0] {
                let mut last_cell = None;
                for r in min_r..=max_r {
                    let step = sign * r as f32;
                    let ax = (fx + ux * step) * idp;
                    let ay = (fy + uy * step) * idp;
                    if ax < 0.0 || ay < 0.0 {
                        break;
                    }
                    let (cx, cy) = (ax as usize, ay as usize);
                    if cx >= cols || cy >= rows {
                        break;
                    }
                    if last_cell == Some((cx, cy)) {
                        continue;
                    }
                    acc.vote(cx, cy);
                    last_cell = Some((cx, cy));
                }
            }
        }

        if edge_points.is_empty() {
            debug!("Hough: no edge pixels");
            return Vec::new();
        }

        // Step 2: accumulator peaks
        let peaks = acc.peaks(p.param2);
        debug!(
            edge_pixels = edge_points.len(),
            center_candidates = peaks.len(),
            "Hough: voting done"
        );

        // Step 3: radius per center, strongest first, respecting min_dist
        let min_dist_sq = p.min_dist * p.min_dist;
        let mut histogram = vec![0u32; max_r as usize + 2];
        let mut circles: Vec<Candidate> = Vec::new();

        for (x, y, votes) in peaks {
            let (ax, ay) = acc.refined_center(x, y);
            let (cx, cy) = (ax * p.dp, ay * p.dp);

            let too_close = circles.iter().any(|&(ox, oy, _)| {
                let (ddx, ddy) = (ox - cx, oy - cy);
                ddx * ddx + ddy * ddy < min_dist_sq
            });
            if too_close {
                continue;
            }

            if let Some(radius) = best_radius(&edge_points, (cx, cy), min_r, max_r, p.param2, &mut histogram) {
                debug!(x = cx, y = cy, radius, votes, "Hough: circle accepted");
                circles.push((cx, cy, radius));
            }
        }

        circles
    }
}

/// Radii this close to the best one may be merged into it
const EDGE_BAND: u32 = 5;

/// Score a neighbouring radius needs, relative to the best, to be merged
const EDGE_PEAK_RATIO: f32 = 0.8;

/// Pick the radius with the most edge support around `center`.
///
/// Support for radius `r` counts edge pixels whose rounded distance lies in
/// `r - 1..=r + 1`; the exact bin counts double when ranking. Radii within
/// `EDGE_BAND` of the best one that score at least `EDGE_PEAK_RATIO` of it are
/// merged, so the inner and outer edges of a thick ring give one radius.
/// Returns the mean distance of the merged pixels, or `None` if support for
/// the best radius is below `min_support`.
fn best_radius(
    edge_points: &[(f32, f32)],
    center: (f32, f32),
    min_r: u32,
    max_r: u32,
    min_support: u32,
    histogram: &mut [u32],
) -> Option<f32> {
    histogram.iter_mut().for_each(|h| *h = 0);

    let (cx, cy) = center;
    let lo = min_r as f32 - 1.5;
    let hi = max_r as f32 + 1.5;

    for &(ex, ey) in edge_points {
        let d = ((ex - cx).powi(2) + (ey - cy).powi(2)).sqrt();
        if d < lo || d > hi {
            continue;
        }
        let bin = d.round() as usize;
        if bin < histogram.len() {
            histogram[bin] += 1;
        }
    }

    let score_at = |r: u32| -> (u32, u32) {
        let r_idx = r as usize;
        let below = histogram[r_idx - 1];
        let at = histogram[r_idx];
        let above = histogram.get(r_idx + 1).copied().unwrap_or(0);
        (below + 2 * at + above, below + at + above)
    };

    // (radius, weighted score, support)
    let mut best = (0u32, 0u32, 0u32);
    for r in min_r..=max_r {
        let (score, support) = score_at(r);
        if score > best.1 {
            best = (r, score, support);
        }
    }

    let (r_best, best_score, support) = best;
    if support < min_support || r_best == 0 {
        return None;
    }

    let cutoff = best_score as f32 * EDGE_PEAK_RATIO;
    let band = r_best.saturating_sub(EDGE_BAND).max(min_r)..=(r_best + EDGE_BAND).min(max_r);
    let (r_lo, r_hi) = band
        .filter(|&r| score_at(r).0 as f32 >= cutoff)
        .fold((r_best, r_best), |(lo, hi), r| (lo.min(r), hi.max(r)));

    let (lo, hi) = (r_lo as f32 - 1.5, r_hi as f32 + 1.5);
    let (sum, count) = edge_points
        .iter()
        .map(|&(ex, ey)| ((ex - cx).powi(2) + (ey - cy).powi(2)).sqrt())
        .filter(|d| *d >= lo && *d < hi)
        .fold((0.0f32, 0u32), |(s, n), d| (s + d, n + 1));

    if count == 0 {
        return Some(r_best as f32);
    }
    Some(sum / count as f32)
}
