//! Cinespace (CSP) LUT file format parser and writer.
//!
//! CSP is a line-oriented text format used by Rising Sun Research
//! Cinespace. One grammar carries four structurally different LUT shapes:
//! a shared-channel 1D curve, three per-channel curves (3x1D), a dense 3D
//! cube, and a two-stage "shaper + cube" (or "pre-LUT + table") pipeline.
//! Which shape a file holds is decided by the numeric content of its
//! pre-LUT block, not by the grammar alone; the decision table lives on
//! the internal classification step below.
//!
//! # Format structure
//!
//! ```text
//! CSPLUTV100
//! 1D or 3D
//!
//! BEGIN METADATA          (optional block)
//! <title>
//! <comment lines>
//! END METADATA
//!
//! <prelut_r_count>
//! <input positions, r>
//! <output values, r>
//! <prelut_g_count>
//! <input positions, g>
//! <output values, g>
//! <prelut_b_count>
//! <input positions, b>
//! <output values, b>
//!
//! <size> (1D) or <size_r> <size_g> <size_b> (3D)
//! <r g b>
//! ...
//! ```
//!
//! 3D table rows are flattened column-major: the red axis varies fastest.
//! Per-channel pre-LUT curves may have different lengths ("ragged"); in
//! memory they share one rectangular buffer, right-padded with NaN.

use crate::lut3x1d::Domain;
use crate::rows::{format_row, linspace, parse_floats, parse_ints};
use crate::{Lut, Lut3D, Lut3x1D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const HEADER: &str = "CSPLUTV100";

const SHAPER_SIZE_MIN: usize = 2;
const SHAPER_SIZE_MAX: usize = 65536;
const CUBE_SIZE_MIN: usize = 2;
const CUBE_SIZE_MAX: usize = 256;

// ============================================================================
// Parsing
// ============================================================================

/// A CSP file parsed into sections, before shape classification.
#[derive(Debug, Clone)]
struct ParsedCsp {
    is_3d: bool,
    title: String,
    comments: Vec<String>,
    /// Six rows (input/output per channel), NaN-padded to `pre_lut_size`.
    pre_lut: [Vec<f32>; 6],
    pre_lut_size: usize,
    /// Declared per-axis sizes: one integer for 1D, three for 3D.
    size: Vec<usize>,
    /// Table rows in file order; single-value rows broadcast to three.
    table: Vec<[f32; 3]>,
}

/// Reads a CSP file.
///
/// Returns a [`Lut3x1D`], [`Lut3D`] or [`LutSequence`](crate::LutSequence)
/// variant depending on the file's pre-LUT block and kind line.
pub fn read_csp<P: AsRef<Path>>(path: P) -> LutResult<Lut> {
    let file = File::open(path.as_ref())?;
    parse_csp(BufReader::new(file))
}

/// Parses a CSP file from a reader.
pub fn parse_csp<R: BufRead>(reader: R) -> LutResult<Lut> {
    let parsed = parse_sections(reader)?;
    classify(parsed)
}

/// Tokenizes the input into non-empty, trimmed lines.
fn clean_lines<R: BufRead>(reader: R) -> LutResult<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    if lines.is_empty() {
        return Err(LutError::Parse("LUT file is empty".into()));
    }
    Ok(lines)
}

fn parse_sections<R: BufRead>(reader: R) -> LutResult<ParsedCsp> {
    let lines = clean_lines(reader)?;

    if lines[0] != HEADER {
        return Err(LutError::Parse(format!("invalid header: {}", lines[0])));
    }

    let is_3d = match lines.get(1).map(String::as_str) {
        Some("3D") => true,
        Some("1D") => false,
        Some(other) => return Err(LutError::Parse(format!("invalid kind: {other}"))),
        None => return Err(LutError::Parse("missing kind line".into())),
    };

    let (title, comments, seek) = parse_metadata(&lines)?;

    let domain_lines = lines
        .get(seek..seek + 9)
        .ok_or_else(|| LutError::Parse("domain section truncated".into()))?;
    let (pre_lut, pre_lut_size) = parse_domain(domain_lines)?;

    let (size, table) = parse_table(&lines[seek + 9..])?;

    Ok(ParsedCsp {
        is_3d,
        title,
        comments,
        pre_lut,
        pre_lut_size,
        size,
        table,
    })
}

/// Parses the optional metadata block.
///
/// Returns the title, the comment lines and the index of the first line
/// after the block. A missing block yields empty metadata and resumes at
/// the line following the kind token.
fn parse_metadata(lines: &[String]) -> LutResult<(String, Vec<String>, usize)> {
    if lines.get(2).map(String::as_str) != Some("BEGIN METADATA") {
        return Ok((String::new(), Vec::new(), 2));
    }

    let mut captured = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(3) {
        if line == "END METADATA" {
            let mut it = captured.into_iter();
            let title = it.next().unwrap_or_default();
            return Ok((title, it.collect(), i + 1));
        }
        captured.push(line.clone());
    }
    Err(LutError::Parse("unterminated metadata block".into()))
}

/// Parses the 9-line pre-LUT section into a `6 x pre_lut_size` matrix.
///
/// The lines come in per-channel triples: count, input positions, output
/// values. Channels may declare different counts; every row shorter than
/// the widest is right-padded with NaN so the six rows stay rectangular.
fn parse_domain(lines: &[String]) -> LutResult<([Vec<f32>; 6], usize)> {
    let mut counts = [0usize; 3];
    for (channel, count) in counts.iter_mut().enumerate() {
        *count = lines[channel * 3]
            .parse()
            .map_err(|_| {
                LutError::Parse(format!("invalid pre-LUT count: {}", lines[channel * 3]))
            })?;
    }
    let width = counts.into_iter().max().unwrap_or(0);

    let mut rows: [Vec<f32>; 6] = Default::default();
    for (i, row) in rows.iter_mut().enumerate() {
        // Line offsets 1, 2, 4, 5, 7, 8: the two value rows of each triple.
        let line = &lines[i / 2 * 3 + i % 2 + 1];
        let mut values = parse_floats(line)?;
        if values.len() > width {
            return Err(LutError::Parse(format!(
                "pre-LUT row has {} values, more than the declared maximum {width}",
                values.len()
            )));
        }
        values.resize(width, f32::NAN);
        *row = values;
    }

    Ok((rows, width))
}

/// Parses the table section: a size line of 1-3 integers followed by rows
/// of 1 or 3 floats.
fn parse_table(lines: &[String]) -> LutResult<(Vec<usize>, Vec<[f32; 3]>)> {
    let size_line = lines
        .first()
        .ok_or_else(|| LutError::Parse("missing table section".into()))?;
    let size = parse_ints(size_line)?;
    if size.is_empty() || size.len() > 3 {
        return Err(LutError::Parse(format!("invalid table size line: {size_line}")));
    }

    let mut table = Vec::with_capacity(lines.len() - 1);
    for line in &lines[1..] {
        let values = parse_floats(line)?;
        let row = match values[..] {
            [v] => [v, v, v],
            [r, g, b] => [r, g, b],
            _ => {
                return Err(LutError::Parse(format!(
                    "expected 1 or 3 values per table row, found {}",
                    values.len()
                )));
            }
        };
        table.push(row);
    }

    let expected: usize = size.iter().product();
    if expected != table.len() {
        return Err(LutError::Parse(format!(
            "table size mismatch: declared {expected} entries, found {}",
            table.len()
        )));
    }

    Ok((size, table))
}

// ============================================================================
// Shape classification
// ============================================================================

/// Maps a parsed file to one of the four LUT shapes.
///
/// The kind line and the pre-LUT content jointly decide the result:
///
/// | kind | pre-LUT is the unit identity | result |
/// |------|------------------------------|--------|
/// | 3D   | yes | [`Lut3D`], domain taken from the pre-LUT input rows |
/// | 1D   | yes | [`Lut3x1D`] with a `[min, max]` range domain |
/// | 3D   | no  | shaper [`Lut3x1D`] + cube [`Lut3D`] sequence |
/// | 1D   | no  | 2-row table: single rescaled [`Lut3x1D`]; otherwise pre-LUT + table sequence |
///
/// "Unit identity" means the pre-LUT is exactly two samples wide and every
/// output row is `0.0 1.0`.
fn classify(parsed: ParsedCsp) -> LutResult<Lut> {
    let unity = parsed.pre_lut_size == 2
        && [1usize, 3, 5].iter().all(|&i| parsed.pre_lut[i] == [0.0, 1.0]);

    let ParsedCsp {
        is_3d,
        title,
        comments,
        pre_lut,
        size,
        table,
        ..
    } = parsed;

    match (is_3d, unity) {
        (true, true) => {
            let (min, max) = pre_lut_bounds(&pre_lut);
            let mut cube = Lut3D::from_table(table, three_sizes(&size)?)?.with_domain(min, max);
            cube.name = title;
            cube.comments = comments;
            Ok(Lut::Lut3D(cube))
        }
        (false, true) => {
            let (min, max) = pre_lut_bounds(&pre_lut);
            let mut lut = Lut3x1D::new(table, title, Domain::Range { min, max })?;
            lut.comments = comments;
            Ok(Lut::Lut3x1D(lut))
        }
        (true, false) => {
            let pre_domain = stack_channels(&pre_lut, 0);
            let pre_table = stack_channels(&pre_lut, 1);
            let shaper = Lut3x1D::new(
                pre_table,
                format!("{title} - Shaper"),
                Domain::Explicit(pre_domain),
            )?;
            let mut cube = Lut3D::from_table(table, three_sizes(&size)?)?;
            cube.name = format!("{title} - Cube");
            cube.comments = comments;
            Ok(Lut::Sequence(crate::LutSequence::new(shaper, cube)))
        }
        (false, false) => {
            let pre_domain = stack_channels(&pre_lut, 0);
            let mut pre_table = stack_channels(&pre_lut, 1);

            if table.len() == 2 {
                // Degenerate form: the 2-row table is an output range and
                // the pre-LUT values are rescaled into it.
                let (min, max) = (table[0], table[1]);
                for row in &mut pre_table {
                    for c in 0..3 {
                        row[c] = row[c] * (max[c] - min[c]) + min[c];
                    }
                }
                let mut lut = Lut3x1D::new(pre_table, title, Domain::Explicit(pre_domain))?;
                lut.comments = comments;
                Ok(Lut::Lut3x1D(lut))
            } else {
                let pre = Lut3x1D::new(
                    pre_table,
                    format!("{title} - PreLUT"),
                    Domain::Explicit(pre_domain),
                )?;
                let mut main =
                    Lut3x1D::new(table, format!("{title} - Table"), Domain::unit())?;
                main.comments = comments;
                Ok(Lut::Sequence(crate::LutSequence::new(pre, main)))
            }
        }
    }
}

/// Per-channel `(min, max)` bounds of a two-sample-wide pre-LUT block.
fn pre_lut_bounds(pre_lut: &[Vec<f32>; 6]) -> ([f32; 3], [f32; 3]) {
    let min = [pre_lut[0][0], pre_lut[2][0], pre_lut[4][0]];
    let max = [pre_lut[0][1], pre_lut[2][1], pre_lut[4][1]];
    (min, max)
}

/// Column-stacks one row per channel (`offset` 0 for inputs, 1 for
/// outputs) into `[r, g, b]` sample rows, NaN padding included.
fn stack_channels(pre_lut: &[Vec<f32>; 6], offset: usize) -> Vec<[f32; 3]> {
    let width = pre_lut[offset].len();
    (0..width)
        .map(|j| [pre_lut[offset][j], pre_lut[offset + 2][j], pre_lut[offset + 4][j]])
        .collect()
}

fn three_sizes(size: &[usize]) -> LutResult<[usize; 3]> {
    match *size {
        [r, g, b] => Ok([r, g, b]),
        _ => Err(LutError::Parse(format!(
            "3D table needs three sizes, found {}",
            size.len()
        ))),
    }
}

// ============================================================================
// Writing
// ============================================================================

/// A LUT normalized into the two halves a CSP file can hold. A missing
/// half is written as an identity placeholder block instead of a sentinel
/// table.
enum Halves {
    ShaperOnly(Lut3x1D),
    CubeOnly(Lut3D),
    Both(Lut3x1D, Lut3D),
}

struct CspForm {
    name: String,
    comments: Vec<String>,
    halves: Halves,
}

/// Writes a LUT to a CSP file with the default 7-decimal formatting.
///
/// Accepts any [`Lut`] value; bare 1D curves are promoted to three
/// channels and sequences must pair a 1D or 3x1D shaper with a 3D cube.
/// Shape and size validation run before the file is created, so a
/// rejected write leaves nothing on disk.
pub fn write_csp<P: AsRef<Path>>(path: P, lut: &Lut) -> LutResult<()> {
    write_csp_with_decimals(path, lut, 7)
}

/// Writes a LUT to a CSP file with the given decimal precision.
pub fn write_csp_with_decimals<P: AsRef<Path>>(
    path: P,
    lut: &Lut,
    decimals: usize,
) -> LutResult<()> {
    let form = canonicalize(lut)?;
    validate(&form)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer, &form, decimals)?;
    writer.flush()?;
    Ok(())
}

/// Writes a LUT as CSP to a writer.
pub fn write_csp_to<W: Write>(writer: &mut W, lut: &Lut, decimals: usize) -> LutResult<()> {
    let form = canonicalize(lut)?;
    validate(&form)?;
    emit(writer, &form, decimals)
}

/// Normalizes any accepted LUT value to a `(shaper, cube)` form.
fn canonicalize(lut: &Lut) -> LutResult<CspForm> {
    match lut {
        Lut::Sequence(seq) => {
            let shaper = match &*seq.first {
                Lut::Lut1D(lut) => lut.to_3x1d(),
                Lut::Lut3x1D(lut) => lut.clone(),
                _ => {
                    return Err(LutError::UnsupportedShape(
                        "sequence must be (1D | 3x1D) + 3D".into(),
                    ));
                }
            };
            let cube = match &*seq.second {
                Lut::Lut3D(lut) => lut.clone(),
                _ => {
                    return Err(LutError::UnsupportedShape(
                        "sequence must be (1D | 3x1D) + 3D".into(),
                    ));
                }
            };
            let mut comments = shaper.comments.clone();
            comments.extend(cube.comments.iter().cloned());
            Ok(CspForm {
                name: format!("{} - {}", shaper.name, cube.name),
                comments,
                halves: Halves::Both(shaper, cube),
            })
        }
        Lut::Lut1D(lut) => {
            let shaper = lut.to_3x1d();
            Ok(CspForm {
                name: shaper.name.clone(),
                comments: shaper.comments.clone(),
                halves: Halves::ShaperOnly(shaper),
            })
        }
        Lut::Lut3x1D(lut) => Ok(CspForm {
            name: lut.name.clone(),
            comments: lut.comments.clone(),
            halves: Halves::ShaperOnly(lut.clone()),
        }),
        Lut::Lut3D(lut) => Ok(CspForm {
            name: lut.name.clone(),
            comments: lut.comments.clone(),
            halves: Halves::CubeOnly(lut.clone()),
        }),
    }
}

/// Pre-flight size checks; runs before any bytes are written.
fn validate(form: &CspForm) -> LutResult<()> {
    let (shaper, cube) = match &form.halves {
        Halves::ShaperOnly(shaper) => (Some(shaper), None),
        Halves::CubeOnly(cube) => (None, Some(cube)),
        Halves::Both(shaper, cube) => (Some(shaper), Some(cube)),
    };
    if let Some(shaper) = shaper {
        let size = shaper.size();
        if !(SHAPER_SIZE_MIN..=SHAPER_SIZE_MAX).contains(&size) {
            return Err(LutError::SizeBounds {
                what: "shaper",
                size,
                min: SHAPER_SIZE_MIN,
                max: SHAPER_SIZE_MAX,
            });
        }
    }
    if let Some(cube) = cube {
        for &axis in &cube.size {
            if !(CUBE_SIZE_MIN..=CUBE_SIZE_MAX).contains(&axis) {
                return Err(LutError::SizeBounds {
                    what: "cube",
                    size: axis,
                    min: CUBE_SIZE_MIN,
                    max: CUBE_SIZE_MAX,
                });
            }
        }
    }
    Ok(())
}

fn emit<W: Write>(w: &mut W, form: &CspForm, decimals: usize) -> LutResult<()> {
    writeln!(w, "{HEADER}")?;
    let is_3d = matches!(form.halves, Halves::CubeOnly(_) | Halves::Both(..));
    writeln!(w, "{}", if is_3d { "3D" } else { "1D" })?;
    writeln!(w)?;

    writeln!(w, "BEGIN METADATA")?;
    writeln!(w, "{}", form.name)?;
    for comment in &form.comments {
        writeln!(w, "{comment}")?;
    }
    writeln!(w, "END METADATA")?;
    writeln!(w)?;

    match &form.halves {
        Halves::Both(shaper, cube) => {
            emit_shaper(w, shaper, decimals)?;
            emit_cube(w, cube, decimals)?;
        }
        Halves::CubeOnly(cube) => {
            for i in 0..3 {
                writeln!(w, "2")?;
                writeln!(
                    w,
                    "{}",
                    format_row(&[cube.domain_min[i], cube.domain_max[i]], decimals)
                )?;
                writeln!(w, "{}", format_row(&[0.0, 1.0], decimals))?;
            }
            emit_cube(w, cube, decimals)?;
        }
        Halves::ShaperOnly(shaper) => {
            let (min, max) = shaper.domain.bounds();
            for i in 0..3 {
                writeln!(w, "2")?;
                writeln!(w, "{}", format_row(&[min[i], max[i]], decimals))?;
                writeln!(w, "0.0 1.0")?;
            }
            writeln!(w)?;
            writeln!(w, "{}", shaper.size())?;
            for row in &shaper.table {
                writeln!(w, "{}", format_row(row, decimals))?;
            }
        }
    }

    Ok(())
}

/// Writes the three per-channel pre-LUT blocks of a real shaper.
///
/// Ragged shapers write only the non-NaN prefix of each channel; the
/// per-channel length comes from the explicit domain's padding count.
fn emit_shaper<W: Write>(w: &mut W, shaper: &Lut3x1D, decimals: usize) -> LutResult<()> {
    for i in 0..3 {
        let size = shaper.channel_size(i);
        writeln!(w, "{size}")?;

        let positions: Vec<f32> = match &shaper.domain {
            Domain::Explicit(rows) => rows[..size].iter().map(|row| row[i]).collect(),
            Domain::Range { min, max } => linspace(min[i], max[i], size).collect(),
        };
        writeln!(w, "{}", format_row(&positions, decimals))?;

        let values: Vec<f32> = shaper.table[..size].iter().map(|row| row[i]).collect();
        writeln!(w, "{}", format_row(&values, decimals))?;
    }
    Ok(())
}

/// Writes the cube size line and its table, red axis fastest.
fn emit_cube<W: Write>(w: &mut W, cube: &Lut3D, decimals: usize) -> LutResult<()> {
    writeln!(w)?;
    writeln!(w, "{} {} {}", cube.size[0], cube.size[1], cube.size[2])?;
    for row in &cube.table {
        writeln!(w, "{}", format_row(row, decimals))?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
