#![allow(clippy::unwrap_used, reason = "allow in test files")]

use super::*;

#[test]
fn extent_len_and_emptiness() {
    assert_eq!(Extent::new([3, 4]).len(), 12);
    assert_eq!(Extent::new([3, 4, 5]).len(), 60);
    assert!(!Extent::new([3, 4]).is_empty());
    assert!(Extent::new([3, 0, 5]).is_empty());
    assert!(Extent::<2>::zero().is_empty());
}

#[test]
fn extent_strides_follow_axis_order() {
    assert_eq!(Extent::new([4, 3]).strides(), [1, 4]);
    assert_eq!(Extent::new([4, 3, 2]).strides(), [1, 4, 12]);
}

#[test]
fn linear_index_is_bounds_checked() {
    let extent = Extent::new([4, 3, 2]);
    assert_eq!(extent.linear_index([0, 0, 0]), Some(0));
    assert_eq!(extent.linear_index([1, 0, 0]), Some(1));
    assert_eq!(extent.linear_index([0, 1, 0]), Some(4));
    assert_eq!(extent.linear_index([3, 2, 1]), Some(23));
    assert_eq!(extent.linear_index([4, 0, 0]), None);
    assert_eq!(extent.linear_index([0, 3, 0]), None);
    assert_eq!(extent.linear_index([0, 0, 2]), None);
}

#[test]
fn fits_within_compares_every_axis() {
    let canvas = Extent::new([3, 3]);
    assert!(Extent::new([2, 2]).fits_within(&canvas));
    assert!(Extent::new([3, 3]).fits_within(&canvas));
    assert!(!Extent::new([4, 1]).fits_within(&canvas));
    assert!(!Extent::new([1, 4]).fits_within(&canvas));
}

#[test]
fn rows_visit_every_row_once_in_memory_order() {
    let rows: Vec<_> = Extent::new([5, 2, 3]).rows().collect();
    assert_eq!(
        rows,
        vec![
            [0, 0, 0],
            [0, 1, 0],
            [0, 0, 1],
            [0, 1, 1],
            [0, 0, 2],
            [0, 1, 2],
        ]
    );

    let rows: Vec<_> = Extent::new([5, 3]).rows().collect();
    assert_eq!(rows, vec![[0, 0], [0, 1], [0, 2]]);
}

#[test]
fn rows_of_empty_extent() {
    assert_eq!(Extent::new([0, 3]).rows().count(), 0);
    assert_eq!(Extent::new([3, 0]).rows().count(), 0);
    assert_eq!(Extent::new([3, 3, 0]).rows().count(), 0);
}

#[test]
fn geometry_maps_index_to_physical() {
    let geometry = Geometry {
        spacing: [0.5, 2.0, 3.0],
        origin: [10.0, -1.0, 0.0],
    };
    assert_eq!(geometry.index_to_physical([0, 0, 0]), [10.0, -1.0, 0.0]);
    assert_eq!(geometry.index_to_physical([2, 1, 4]), [11.0, 1.0, 12.0]);

    let default = Geometry::<2>::default();
    assert_eq!(default.index_to_physical([3, 7]), [3.0, 7.0]);
}

#[test]
fn new_image_is_zeroed() {
    let image = Image::new(Extent::new([3, 2]), Geometry::default());
    assert_eq!(image.len(), 6);
    assert!(image.samples().iter().all(|&s| s == 0.0));
}

#[test]
fn from_samples_checks_length() {
    let extent = Extent::new([2, 2]);
    assert!(Image::from_samples(extent, Geometry::default(), vec![1.0; 4]).is_some());
    assert!(Image::from_samples(extent, Geometry::default(), vec![1.0; 3]).is_none());
    assert!(Image::from_samples(extent, Geometry::default(), vec![1.0; 5]).is_none());
}

#[test]
fn rows_and_indexing_agree() {
    let samples: Vec<f32> = (0..24).map(|v| v as f32).collect();
    let mut image = Image::from_samples(Extent::new([4, 3, 2]), Geometry::default(), samples).unwrap();

    assert_eq!(image.row([0, 1, 1]), &[16.0, 17.0, 18.0, 19.0]);
    assert_eq!(image.get([2, 1, 1]), Some(18.0));
    assert_eq!(image.get([4, 1, 1]), None);

    image.row_mut([0, 2, 0])[3] = -1.0;
    assert_eq!(image.get([3, 2, 0]), Some(-1.0));
}

#[test]
#[should_panic(expected = "rows start at the first sample of axis 0")]
fn row_must_start_at_axis_origin() {
    let image = Image::new(Extent::new([3, 2]), Geometry::default());
    let _ = image.row([1, 0]);
}

#[test]
fn with_samples_keeps_geometry() {
    let geometry = Geometry {
        spacing: [2.0, 3.0],
        origin: [1.0, 1.0],
    };
    let image = Image::new(Extent::new([2, 1]), geometry);
    let other = image.with_samples(vec![5.0, 6.0]).unwrap();
    assert_eq!(other.geometry(), &geometry);
    assert_eq!(other.extent(), image.extent());
    assert_eq!(other.samples(), &[5.0, 6.0]);
}
