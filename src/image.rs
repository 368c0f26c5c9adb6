#[cfg(test)]
mod tests;

use std::iter::FusedIterator;

/// Number of samples along every axis of an image.
///
/// Axis 0 is the fastest varying one: samples `[x, y, z]` and `[x + 1, y, z]`
/// are adjacent in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent<const D: usize>([usize; D]);

impl<const D: usize> Extent<D> {
    #[must_use]
    pub const fn new(sizes: [usize; D]) -> Self {
        Self(sizes)
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self([0; D])
    }

    #[must_use]
    pub const fn get(&self, axis: usize) -> usize {
        self.0[axis]
    }

    #[must_use]
    pub const fn as_array(&self) -> [usize; D] {
        self.0
    }

    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().product()
    }

    /// An extent with a zero along any axis holds no samples at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.contains(&0)
    }

    /// `true` if no axis of `self` is larger than the same axis of `other`.
    #[must_use]
    pub fn fits_within(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Distance in samples between neighbours along each axis.
    #[must_use]
    pub fn strides(&self) -> [usize; D] {
        let mut strides = [1; D];
        for axis in 1..D {
            strides[axis] = strides[axis - 1] * self.0[axis - 1];
        }
        strides
    }

    /// Position of `index` in the flat sample buffer, or `None` when out of bounds.
    #[must_use]
    pub fn linear_index(&self, index: [usize; D]) -> Option<usize> {
        if index.iter().zip(self.0.iter()).any(|(i, n)| i >= n) {
            return None;
        }
        Some(
            index
                .iter()
                .zip(self.strides())
                .map(|(i, stride)| i * stride)
                .sum(),
        )
    }

    /// Iterates over the first index of every row along axis 0,
    /// in memory order.
    #[must_use]
    pub fn rows(&self) -> Rows<D> {
        Rows {
            extent: self.0,
            next: (!self.is_empty()).then_some([0; D]),
        }
    }
}

/// See [`Extent::rows`].
#[derive(Debug, Clone)]
pub struct Rows<const D: usize> {
    extent: [usize; D],
    next: Option<[usize; D]>,
}

impl<const D: usize> Iterator for Rows<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut index = current;
        self.next = None;
        for axis in 1..D {
            index[axis] += 1;
            if index[axis] < self.extent[axis] {
                self.next = Some(index);
                break;
            }
            index[axis] = 0;
        }

        Some(current)
    }
}

impl<const D: usize> FusedIterator for Rows<D> {}

/// Placement of the sample grid in physical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry<const D: usize> {
    pub spacing: [f64; D],
    pub origin: [f64; D],
}

impl<const D: usize> Default for Geometry<D> {
    fn default() -> Self {
        Self {
            spacing: [1.0; D],
            origin: [0.0; D],
        }
    }
}

impl<const D: usize> Geometry<D> {
    #[must_use]
    pub fn index_to_physical(&self, index: [usize; D]) -> [f64; D] {
        let mut point = self.origin;
        for axis in 0..D {
            point[axis] += index[axis] as f64 * self.spacing[axis];
        }
        point
    }
}

/// A single-channel floating-point image with `D` axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<const D: usize> {
    extent: Extent<D>,
    geometry: Geometry<D>,
    samples: Vec<f32>,
}

impl<const D: usize> Image<D> {
    /// Creates an image with every sample set to zero.
    #[must_use]
    pub fn new(extent: Extent<D>, geometry: Geometry<D>) -> Self {
        Self {
            extent,
            geometry,
            samples: vec![0.0; extent.len()],
        }
    }

    /// Wraps an existing buffer. Returns `None` if `samples` does not hold
    /// exactly one value per position of `extent`.
    #[must_use]
    pub fn from_samples(extent: Extent<D>, geometry: Geometry<D>, samples: Vec<f32>) -> Option<Self> {
        (samples.len() == extent.len()).then_some(Self {
            extent,
            geometry,
            samples,
        })
    }

    /// Same shape and geometry as `self`, different samples.
    #[must_use]
    pub fn with_samples(&self, samples: Vec<f32>) -> Option<Self> {
        Self::from_samples(self.extent, self.geometry, samples)
    }

    #[must_use]
    pub const fn extent(&self) -> Extent<D> {
        self.extent
    }

    #[must_use]
    pub const fn geometry(&self) -> &Geometry<D> {
        &self.geometry
    }

    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: [usize; D]) -> Option<f32> {
        self.extent
            .linear_index(index)
            .map(|offset| self.samples[offset])
    }

    /// The full row along axis 0 that starts at `start`.
    ///
    /// # Panics
    /// Panics if `start` is out of bounds or `start[0] != 0`.
    #[must_use]
    pub fn row(&self, start: [usize; D]) -> &[f32] {
        let offset = self.row_offset(start);
        &self.samples[offset..][..self.extent.get(0)]
    }

    /// Mutable version of [`Image::row`].
    ///
    /// # Panics
    /// Panics if `start` is out of bounds or `start[0] != 0`.
    pub fn row_mut(&mut self, start: [usize; D]) -> &mut [f32] {
        let offset = self.row_offset(start);
        let width = self.extent.get(0);
        &mut self.samples[offset..][..width]
    }

    fn row_offset(&self, start: [usize; D]) -> usize {
        assert_eq!(start[0], 0, "rows start at the first sample of axis 0");
        self.extent
            .linear_index(start)
            .unwrap_or_else(|| panic!("row {:?} is outside of {:?}", start, self.extent))
    }
}
