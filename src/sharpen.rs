
use crate::image::Image;

/// Post-processing applied to the final average.
///
/// Implementations must return an image with the same extent and geometry
/// as their input.
pub trait Sharpen {
    fn sharpen<const D: usize>(&self, image: &Image<D>, strength: f32) -> Image<D>;
}

/// Laplacian sharpening: `out = in - strength * ∇²in`.
///
/// The Laplacian takes the physical spacing of each axis into account and
/// replicates edge samples at the border. The result is rescaled linearly
/// back into the intensity range of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplacianSharpener;

impl Sharpen for LaplacianSharpener {
    fn sharpen<const D: usize>(&self, image: &Image<D>, strength: f32) -> Image<D> {
        let src = image.samples();
        let Some((in_min, in_max)) = min_max(src.iter().map(|&v| f64::from(v))) else {
            return image.clone();
        };

        let extent = image.extent();
        let sizes = extent.as_array();
        let strides = extent.strides();
        let weights = image.geometry().spacing.map(|s| 1.0 / (s * s));
        let strength = f64::from(strength);

        let mut sharpened = Vec::with_capacity(src.len());
        let mut offset = 0;
        for mut index in extent.rows() {
            for x in 0..sizes[0] {
                index[0] = x;
                let center = f64::from(src[offset]);
                let mut laplacian = 0.0;
                for axis in 0..D {
                    let prev = if index[axis] > 0 {
                        offset - strides[axis]
                    } else {
                        offset
                    };
                    let next = if index[axis] + 1 < sizes[axis] {
                        offset + strides[axis]
                    } else {
                        offset
                    };
                    laplacian += (f64::from(src[prev]) + f64::from(src[next]) - 2.0 * center)
                        * weights[axis];
                }
                sharpened.push(center - strength * laplacian);
                offset += 1;
            }
        }

        let samples = match min_max(sharpened.iter().copied()) {
            Some((out_min, out_max))
                if out_max > out_min && in_max > in_min && (out_min, out_max) != (in_min, in_max) =>
            {
                let ratio = (in_max - in_min) / (out_max - out_min);
                sharpened
                    .iter()
                    .map(|&v| (in_min + (v - out_min) * ratio) as f32)
                    .collect()
            }
            _ => sharpened.iter().map(|&v| v as f32).collect(),
        };

        // `samples` is built from one value per position of the input extent.
        image
            .with_samples(samples)
            .unwrap_or_else(|| image.clone())
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}
