//! File-level round-trip and rejection tests for the CSP codec.

use approx::assert_relative_eq;
use csp_lut::{
    read_csp, write_csp, write_csp_with_decimals, Domain, Lut, Lut1D, Lut3D, Lut3x1D,
    LutError, LutSequence,
};
use tempfile::tempdir;

#[test]
fn cube_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("identity.csp");

    let mut cube = Lut3D::identity(4).with_domain([-0.1, -0.2, -0.4], [1.5, 3.0, 6.0]);
    cube.name = "My LUT".into();
    cube.comments = vec!["A first comment.".into(), "A second comment.".into()];

    write_csp(&path, &Lut::Lut3D(cube.clone())).unwrap();
    let Lut::Lut3D(parsed) = read_csp(&path).unwrap() else {
        panic!("expected Lut3D");
    };

    assert_eq!(parsed.name, cube.name);
    assert_eq!(parsed.comments, cube.comments);
    assert_eq!(parsed.size, cube.size);
    assert_eq!(parsed.domain_min, cube.domain_min);
    assert_eq!(parsed.domain_max, cube.domain_max);
    for (a, b) in parsed.table.iter().zip(&cube.table) {
        for c in 0..3 {
            assert_relative_eq!(a[c], b[c], epsilon = 1e-6);
        }
    }
}

#[test]
fn three_by_one_d_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("curves.csp");

    let mut lut = Lut3x1D::linear(32, [0.0; 3], [1.0; 3]);
    for row in &mut lut.table {
        for c in 0..3 {
            row[c] = row[c].powf(1.0 / 2.2);
        }
    }
    lut.name = "Gamma Curves".into();

    write_csp(&path, &Lut::Lut3x1D(lut.clone())).unwrap();
    let Lut::Lut3x1D(parsed) = read_csp(&path).unwrap() else {
        panic!("expected Lut3x1D");
    };

    assert_eq!(parsed.name, "Gamma Curves");
    assert_eq!(parsed.size(), 32);
    for (a, b) in parsed.table.iter().zip(&lut.table) {
        for c in 0..3 {
            assert_relative_eq!(a[c], b[c], epsilon = 1e-6);
        }
    }
}

#[test]
fn one_d_writes_as_three_channels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mono.csp");

    let mut lut = Lut1D::linear(16, [0.0, 1.0]);
    for v in &mut lut.table {
        *v = v.powf(2.2);
    }
    lut.name = "Mono Gamma".into();

    write_csp(&path, &Lut::Lut1D(lut.clone())).unwrap();
    let Lut::Lut3x1D(parsed) = read_csp(&path).unwrap() else {
        panic!("expected Lut3x1D");
    };

    assert_eq!(parsed.size(), 16);
    for (row, &v) in parsed.table.iter().zip(&lut.table) {
        for c in 0..3 {
            assert_relative_eq!(row[c], v, epsilon = 1e-6);
        }
    }
}

#[test]
fn ragged_shaper_lengths_survive_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ragged.csp");

    // Channel lengths 10, 12 and 16 padded to a common width of 16.
    let lengths = [10usize, 12, 16];
    let width = 16;
    let sample = |len: usize, j: usize| j as f32 / (len - 1) as f32;
    let mut domain_rows = Vec::with_capacity(width);
    let mut table_rows = Vec::with_capacity(width);
    for j in 0..width {
        let mut pos = [f32::NAN; 3];
        let mut val = [f32::NAN; 3];
        for c in 0..3 {
            if j < lengths[c] {
                pos[c] = sample(lengths[c], j);
                val[c] = sample(lengths[c], j).powf(0.5);
            }
        }
        domain_rows.push(pos);
        table_rows.push(val);
    }
    let shaper =
        Lut3x1D::new(table_rows, "Shaper", Domain::Explicit(domain_rows)).unwrap();
    let cube = Lut3D::identity(3);

    write_csp(&path, &Lut::Sequence(LutSequence::new(shaper, cube))).unwrap();
    let Lut::Sequence(parsed) = read_csp(&path).unwrap() else {
        panic!("expected sequence");
    };
    let Lut::Lut3x1D(parsed_shaper) = &*parsed.first else {
        panic!("expected 3x1D shaper");
    };

    assert_eq!(parsed_shaper.channel_size(0), 10);
    assert_eq!(parsed_shaper.channel_size(1), 12);
    assert_eq!(parsed_shaper.channel_size(2), 16);
    // Padding must be NaN on re-read, not stretched real data.
    assert!(parsed_shaper.table[10][0].is_nan());
    assert!(parsed_shaper.table[12][1].is_nan());
    assert_relative_eq!(parsed_shaper.table[9][0], 1.0, epsilon = 1e-6);
}

#[test]
fn oversized_cube_leaves_no_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rejected.csp");

    let cube = Lut3D::from_table(vec![[0.0; 3]; 300 * 2 * 2], [300, 2, 2]).unwrap();
    let err = write_csp(&path, &Lut::Lut3D(cube)).unwrap_err();

    assert!(matches!(err, LutError::SizeBounds { what: "cube", .. }), "{err}");
    assert!(!path.exists());
}

#[test]
fn unsupported_sequence_leaves_no_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rejected.csp");

    let seq = LutSequence::new(Lut3D::identity(2), Lut3x1D::linear(2, [0.0; 3], [1.0; 3]));
    let err = write_csp(&path, &Lut::Sequence(seq)).unwrap_err();

    assert!(matches!(err, LutError::UnsupportedShape(_)), "{err}");
    assert!(!path.exists());
}

#[test]
fn decimals_control_formatting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.csp");

    let lut = Lut3x1D::linear(2, [0.0; 3], [1.0; 3]);
    write_csp_with_decimals(&path, &Lut::Lut3x1D(lut), 3).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("0.000 0.000 0.000"));
    assert!(text.contains("1.000 1.000 1.000"));
    assert!(!text.contains("0.0000000"));
}

#[test]
fn missing_file_propagates_io_error() {
    let dir = tempdir().unwrap();
    let err = read_csp(dir.path().join("nope.csp")).unwrap_err();
    assert!(matches!(err, LutError::Io(_)), "{err}");
}
