//! The serialized Cα distance matrix format.
//!
//! A header row of comma-separated residue identifiers, then one
//! comma-separated row of distances per residue. Only the strict upper
//! triangle of the data rows is consumed; whatever sits at or below the
//! diagonal is ignored. By convention the file name starts with the structure
//! ID, e.g. `1abc.pdb.CADistanceMatrix.csv`.

use std::io::{BufRead, BufReader, BufWriter, Write};

use anyhow::Context;

use crate::libs::error::CasmError;
use crate::libs::matrix::DistanceMatrix;

/// A parsed distance matrix file.
#[derive(Debug, Clone)]
pub struct DistanceFile {
    /// Structure ID taken from the file name (the stem up to the first `.`).
    pub struc_id: String,
    pub residues: Vec<String>,
    pub matrix: DistanceMatrix,
}

/// Open a (possibly gzipped) input for buffered reading. `stdin` reads
/// standard input.
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    if input == "stdin" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let path = std::path::Path::new(input);
    let file = std::fs::File::open(path).with_context(|| format!("could not open {}", input))?;
    if path.extension() == Some(std::ffi::OsStr::new("gz")) {
        Ok(Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
            file,
        ))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open an output for buffered writing. `stdout` writes standard output.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    if output == "stdout" {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }
    let file = std::fs::File::create(output)
        .with_context(|| format!("could not create {}", output))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Read a distance matrix file.
pub fn read_distance_csv(input: &str) -> anyhow::Result<DistanceFile> {
    let reader = reader(input)?;
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| CasmError::MissingData(format!("{} is empty", input)))?
        .with_context(|| format!("reading {}", input))?;
    let residues: Vec<String> = header.split(',').map(|s| s.trim().to_string()).collect();
    let n = residues.len();

    let mut rows: Vec<Vec<f64>> = vec![vec![0.0; n]; n];
    let mut i = 0;
    for line in lines {
        let line = line.with_context(|| format!("reading {}", input))?;
        if line.trim().is_empty() {
            continue;
        }
        if i >= n {
            return Err(CasmError::DimensionMismatch {
                expected: n,
                found: i + 1,
            }
            .into());
        }
        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != n {
            return Err(CasmError::DimensionMismatch {
                expected: n,
                found: tokens.len(),
            }
            .into());
        }
        for j in (i + 1)..n {
            let val: f64 = tokens[j]
                .trim()
                .parse()
                .with_context(|| format!("bad distance at row {}, column {}", i + 1, j + 1))?;
            rows[i][j] = val;
            rows[j][i] = val;
        }
        i += 1;
    }
    if i != n {
        return Err(CasmError::DimensionMismatch {
            expected: n,
            found: i,
        }
        .into());
    }

    Ok(DistanceFile {
        struc_id: struc_id_from_path(input),
        residues,
        matrix: DistanceMatrix::from_rows(&rows)?,
    })
}

/// Write a matrix back out in the same format.
pub fn write_distance_csv(
    writer: &mut dyn Write,
    residues: &[String],
    matrix: &DistanceMatrix,
) -> anyhow::Result<()> {
    writeln!(writer, "{}", residues.join(","))?;
    let n = matrix.size();
    for i in 0..n {
        let row: Vec<String> = (0..n).map(|j| format!("{}", matrix.get(i, j))).collect();
        writeln!(writer, "{}", row.join(","))?;
    }
    Ok(())
}

/// The structure ID encoded in a file name: the stem up to the first `.`.
pub fn struc_id_from_path(input: &str) -> String {
    let name = input.rsplit(['/', '\\']).next().unwrap_or(input);
    name.split('.').next().unwrap_or(name).to_string()
}
