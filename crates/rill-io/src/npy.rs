//! Minimal NPY (format 1.0) reader/writer for 2-D f64 arrays.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::NpyError;

const MAGIC: &[u8; 6] = b"\x93NUMPY";
// total header length (magic + version + length field + dict) must be a
// multiple of this so the data section starts aligned
const HEADER_BLOCK: usize = 64;

/// Write `rows × cols` f64 values (row-major) as a version-1.0 `.npy` file.
///
/// # Errors
///
/// Returns [`NpyError::Io`] on filesystem failures.
pub fn write_array(path: &Path, rows: usize, cols: usize, data: &[f64]) -> Result<(), NpyError> {
    assert_eq!(data.len(), rows * cols, "array buffer size mismatch");
    let mut out = BufWriter::new(File::create(path)?);

    let mut dict = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({rows}, {cols}), }}");
    // pad with spaces so magic(6) + version(2) + hlen(2) + dict ends on a
    // block boundary, with a trailing newline as numpy writes it
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (HEADER_BLOCK - unpadded % HEADER_BLOCK) % HEADER_BLOCK;
    dict.extend(std::iter::repeat(' ').take(padding));
    dict.push('\n');

    out.write_all(MAGIC)?;
    out.write_all(&[0x01, 0x00])?;
    out.write_all(&(dict.len() as u16).to_le_bytes())?;
    out.write_all(dict.as_bytes())?;
    for &v in data {
        out.write_all(&v.to_le_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Read a version-1.0 `.npy` file holding a 2-D little-endian f64 C-order
/// array; returns the data and its `(rows, cols)` shape.
///
/// # Errors
///
/// Returns [`NpyError::Format`] for malformed files and
/// [`NpyError::Unsupported`] for valid files in another layout.
pub fn read_array(path: &Path) -> Result<(Vec<f64>, (usize, usize)), NpyError> {
    let mut input = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 6];
    input.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(NpyError::Format {
            reason: "missing NPY magic string".into(),
        });
    }
    let mut version = [0u8; 2];
    input.read_exact(&mut version)?;
    if version[0] != 1 {
        return Err(NpyError::Unsupported {
            reason: format!("format version {}.{}", version[0], version[1]),
        });
    }
    let mut hlen = [0u8; 2];
    input.read_exact(&mut hlen)?;
    let mut dict = vec![0u8; u16::from_le_bytes(hlen) as usize];
    input.read_exact(&mut dict)?;
    let dict = String::from_utf8(dict).map_err(|_| NpyError::Format {
        reason: "header dict is not UTF-8".into(),
    })?;

    if !dict.contains("'descr': '<f8'") {
        return Err(NpyError::Unsupported {
            reason: format!("descr in {}", dict.trim_end()),
        });
    }
    if !dict.contains("'fortran_order': False") {
        return Err(NpyError::Unsupported {
            reason: "fortran order".into(),
        });
    }
    let shape = parse_shape(&dict)?;

    let mut data = vec![0.0f64; shape.0 * shape.1];
    let mut buf = [0u8; 8];
    for v in &mut data {
        input.read_exact(&mut buf)?;
        *v = f64::from_le_bytes(buf);
    }
    Ok((data, shape))
}

fn parse_shape(dict: &str) -> Result<(usize, usize), NpyError> {
    let malformed = |reason: &str| NpyError::Format {
        reason: reason.to_string(),
    };
    let start = dict.find("'shape':").ok_or_else(|| malformed("no shape key"))?;
    let open = dict[start..].find('(').ok_or_else(|| malformed("no shape tuple"))? + start;
    let close = dict[open..].find(')').ok_or_else(|| malformed("unclosed shape tuple"))? + open;
    let dims: Vec<usize> = dict[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().map_err(|_| malformed("bad shape entry")))
        .collect::<Result<_, _>>()?;
    match dims[..] {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(NpyError::Unsupported {
            reason: format!("{}-dimensional array", dims.len()),
        }),
    }
}
