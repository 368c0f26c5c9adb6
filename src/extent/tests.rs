#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;
use crate::tests::{MemoryStore, filled};

#[test]
fn no_extents_no_selection() {
    assert_eq!(select_extent::<2, _>(Vec::new()), None);
}

#[test]
fn identical_extents_pick_the_first_input() {
    let selection = select_extent([Extent::new([4, 4]); 3]).unwrap();
    assert_eq!(selection.extent, Extent::new([4, 4]));
    assert_eq!(selection.reference, 0);
}

#[test]
fn larger_input_becomes_reference() {
    let selection = select_extent([
        Extent::new([2, 2]),
        Extent::new([2, 2]),
        Extent::new([3, 3]),
    ])
    .unwrap();
    assert_eq!(selection.extent, Extent::new([3, 3]));
    assert_eq!(selection.reference, 2);
}

#[test]
fn later_ties_do_not_displace_the_reference() {
    let selection = select_extent([
        Extent::new([2, 2]),
        Extent::new([5, 5]),
        Extent::new([5, 5]),
        Extent::new([1, 1]),
    ])
    .unwrap();
    assert_eq!(selection.extent, Extent::new([5, 5]));
    assert_eq!(selection.reference, 1);
}

#[test]
fn axes_are_maximized_independently() {
    let selection = select_extent([
        Extent::new([6, 2, 1]),
        Extent::new([3, 7, 1]),
        Extent::new([1, 1, 4]),
        Extent::new([6, 7, 4]),
    ])
    .unwrap();
    assert_eq!(selection.extent, Extent::new([6, 7, 4]));
    // The last input ties on every axis, so the third one keeps the title.
    assert_eq!(selection.reference, 2);
}

#[test]
fn degenerate_extents_are_ignored() {
    let selection = select_extent([
        Extent::new([3, 3]),
        Extent::new([10, 0]),
        Extent::new([0, 10]),
    ])
    .unwrap();
    assert_eq!(selection.extent, Extent::new([3, 3]));
    assert_eq!(selection.reference, 0);
}

#[test]
fn update_reports_new_reference() {
    let mut selection = ExtentSelection::default();
    assert!(selection.update(0, Extent::new([2, 3])));
    assert!(!selection.update(1, Extent::new([2, 3])));
    assert!(selection.update(2, Extent::new([1, 4])));
    assert_eq!(selection.extent, Extent::new([2, 4]));
    assert_eq!(selection.reference, 2);
}

#[quickcheck]
fn selected_extent_is_componentwise_max(sizes: Vec<(u8, u8, u8)>) -> TestResult {
    let extents: Vec<Extent<3>> = sizes
        .iter()
        .map(|&(x, y, z)| Extent::new([usize::from(x) + 1, usize::from(y) + 1, usize::from(z) + 1]))
        .collect();
    let Some(selection) = select_extent(extents.iter().copied()) else {
        return TestResult::from_bool(extents.is_empty());
    };

    let ok = (0..3).all(|axis| {
        let max = extents.iter().map(|e| e.get(axis)).max().unwrap();
        selection.extent.get(axis) == max
    });
    let reference = extents[selection.reference];
    let reference_ok = reference.fits_within(&selection.extent);
    TestResult::from_bool(ok && reference_ok)
}

#[test]
fn probe_inputs_reads_no_samples() {
    let store = MemoryStore::with_images([
        ("a.tif", filled([2, 2], 1.0)),
        ("b.tif", filled([3, 3], 1.0)),
    ]);

    let selection = probe_inputs(&store, &["a.tif", "b.tif"]).unwrap();

    assert_eq!(selection.extent, Extent::new([3, 3]));
    assert_eq!(selection.reference, 1);
    assert_eq!(store.probes.borrow().len(), 2);
    assert!(store.reads.borrow().is_empty());
}

#[test]
fn probe_inputs_requires_inputs() {
    let store = MemoryStore::<2>::default();
    let paths: [&str; 0] = [];
    assert!(matches!(probe_inputs(&store, &paths), Err(AverageError::NoInputs)));
}

#[test]
fn probe_failure_aborts_immediately() {
    let store = MemoryStore::with_images([("a.tif", filled([2, 2], 1.0)), ("c.tif", filled([2, 2], 1.0))]);

    let result = probe_inputs(&store, &["a.tif", "missing.tif", "c.tif"]);

    assert!(matches!(result, Err(AverageError::MetadataRead { .. })));
    assert_eq!(store.probes.borrow().len(), 2);
}
