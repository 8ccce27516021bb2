//! Binary trajectory bundle, read through a memory map.
//!
//! Little-endian. Header (64 bytes):
//!
//! | off | type   | field                         |
//! |-----|--------|-------------------------------|
//! | 0   | [u8;4] | magic `KTRJ`                  |
//! | 4   | u16    | version major (1)             |
//! | 6   | u16    | version minor (0)             |
//! | 8   | u32    | endianness tag `0x12345678`   |
//! | 12  | u32    | header size (64)              |
//! | 16  | u64    | n_samples                     |
//! | 24  | u64    | n_channels                    |
//! | 32  | u64    | names offset                  |
//! | 40  | u64    | names bytes                   |
//! | 48  | u64    | steps offset                  |
//! | 56  | u64    | data offset                   |
//!
//! Names are NUL-terminated UTF-8, one per sample. Steps are `n_samples`
//! u64 values. Data holds, per sample, the true block followed by the
//! predicted block, each `steps * n_channels` f64 in row-major order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::input::{InputError, TrajectorySet};
use crate::model::sequence::Sequence;

const MAGIC: &[u8; 4] = b"KTRJ";
const VERSION_MAJOR: u16 = 1;
const VERSION_MINOR: u16 = 0;
const ENDIAN_TAG: u32 = 0x1234_5678;
const HEADER_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV1 {
    pub n_samples: u64,
    pub n_channels: u64,
    pub names_offset: u64,
    pub names_bytes: u64,
    pub steps_offset: u64,
    pub data_offset: u64,
}

pub fn read_traj_bin(path: &Path) -> Result<TrajectorySet, InputError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    parse_traj_bin(&mmap[..])
}

pub fn parse_traj_bin(bytes: &[u8]) -> Result<TrajectorySet, InputError> {
    let header = parse_header(bytes)?;
    let n_samples = to_usize(header.n_samples)?;
    let n_channels = to_usize(header.n_channels)?;
    let names_bytes = to_usize(header.names_bytes)?;
    // every name carries at least its NUL, and every sample one u64 step count
    if n_samples > names_bytes || n_samples > bytes.len() / 8 {
        return Err(InputError::InvalidInput(format!(
            "{n_samples} samples do not fit a {} byte bundle with a {names_bytes} byte name table",
            bytes.len()
        )));
    }

    let names = parse_names(
        bytes,
        to_usize(header.names_offset)?,
        names_bytes,
        n_samples,
    )?;
    let steps = read_u64_vec(bytes, to_usize(header.steps_offset)?, n_samples)?;

    let mut offset = to_usize(header.data_offset)?;
    let mut trues = Vec::with_capacity(n_samples);
    let mut predicted = Vec::with_capacity(n_samples);
    for &t in &steps {
        let t = to_usize(t)?;
        let len = t
            .checked_mul(n_channels)
            .ok_or_else(|| InputError::InvalidInput("sample size overflow".to_string()))?;
        let truth = read_f64_vec(bytes, offset, len)?;
        offset += len * 8;
        let pred = read_f64_vec(bytes, offset, len)?;
        offset += len * 8;
        trues.push(to_sequence(t, n_channels, truth)?);
        predicted.push(to_sequence(t, n_channels, pred)?);
    }
    if offset != bytes.len() {
        return Err(InputError::InvalidInput(format!(
            "data section ends at {offset} but file has {} bytes",
            bytes.len()
        )));
    }

    TrajectorySet::new(names, trues, predicted)
}

fn to_sequence(steps: usize, channels: usize, values: Vec<f64>) -> Result<Sequence, InputError> {
    Sequence::new(steps, channels, values)
        .map_err(|e| InputError::InvalidInput(format!("bad sample block: {e}")))
}

fn parse_header(bytes: &[u8]) -> Result<HeaderV1, InputError> {
    if bytes.len() < HEADER_SIZE {
        return Err(InputError::InvalidInput(
            "trajectory bundle too small".to_string(),
        ));
    }
    if &bytes[0..4] != MAGIC {
        return Err(InputError::InvalidInput(
            "invalid magic; expected KTRJ".to_string(),
        ));
    }
    let version_major = read_u16(bytes, 4)?;
    let version_minor = read_u16(bytes, 6)?;
    if version_major != VERSION_MAJOR || version_minor != VERSION_MINOR {
        return Err(InputError::InvalidInput(format!(
            "unsupported version: {}.{}",
            version_major, version_minor
        )));
    }
    if read_u32(bytes, 8)? != ENDIAN_TAG {
        return Err(InputError::InvalidInput(
            "unsupported endianness tag".to_string(),
        ));
    }
    if read_u32(bytes, 12)? as usize != HEADER_SIZE {
        return Err(InputError::InvalidInput(
            "invalid header_size; expected 64".to_string(),
        ));
    }

    Ok(HeaderV1 {
        n_samples: read_u64(bytes, 16)?,
        n_channels: read_u64(bytes, 24)?,
        names_offset: read_u64(bytes, 32)?,
        names_bytes: read_u64(bytes, 40)?,
        steps_offset: read_u64(bytes, 48)?,
        data_offset: read_u64(bytes, 56)?,
    })
}

fn parse_names(
    bytes: &[u8],
    offset: usize,
    len: usize,
    expected: usize,
) -> Result<Vec<String>, InputError> {
    let region = slice(bytes, offset, len, "name table")?;
    if expected == 0 {
        return if region.is_empty() {
            Ok(Vec::new())
        } else {
            Err(InputError::InvalidInput(
                "name table present for empty bundle".to_string(),
            ))
        };
    }
    let Some(body) = region.strip_suffix(&[0u8]) else {
        return Err(InputError::InvalidInput(
            "name table is not NUL-terminated".to_string(),
        ));
    };
    let mut names = Vec::new();
    for raw in body.split(|&b| b == 0) {
        let name = std::str::from_utf8(raw)
            .map_err(|_| InputError::InvalidInput("invalid utf-8 in name table".to_string()))?;
        names.push(name.to_string());
    }
    if names.len() != expected {
        return Err(InputError::InvalidInput(format!(
            "name table has {} entries, expected {}",
            names.len(),
            expected
        )));
    }
    Ok(names)
}

pub fn write_traj_bin(path: &Path, set: &TrajectorySet) -> Result<(), InputError> {
    let bytes = encode_traj_bin(set)?;
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(&bytes)?;
    w.flush()?;
    Ok(())
}

pub fn encode_traj_bin(set: &TrajectorySet) -> Result<Vec<u8>, InputError> {
    let n_channels = set.channels().unwrap_or(0);
    let mut names = Vec::new();
    for name in &set.file_names {
        if name.as_bytes().contains(&0) {
            return Err(InputError::InvalidInput(format!(
                "file name {name:?} contains NUL"
            )));
        }
        names.extend_from_slice(name.as_bytes());
        names.push(0);
    }
    let names_offset = HEADER_SIZE;
    let steps_offset = align8(names_offset + names.len());
    let data_offset = steps_offset + set.len() * 8;

    let mut out = Vec::with_capacity(data_offset);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION_MAJOR.to_le_bytes());
    out.extend_from_slice(&VERSION_MINOR.to_le_bytes());
    out.extend_from_slice(&ENDIAN_TAG.to_le_bytes());
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
    for v in [
        set.len(),
        n_channels,
        names_offset,
        names.len(),
        steps_offset,
        data_offset,
    ] {
        out.extend_from_slice(&(v as u64).to_le_bytes());
    }
    out.extend_from_slice(&names);
    out.resize(steps_offset, 0);

    for (sample, (truth, pred)) in set.trues.iter().zip(&set.predicted).enumerate() {
        if truth.shape() != pred.shape() || truth.channels() != n_channels {
            return Err(InputError::InvalidInput(format!(
                "sample {sample}: shapes {:?}/{:?} do not fit a bundle of {n_channels} channels",
                truth.shape(),
                pred.shape()
            )));
        }
        out.extend_from_slice(&(truth.steps() as u64).to_le_bytes());
    }
    for (truth, pred) in set.trues.iter().zip(&set.predicted) {
        for v in truth.view().iter().chain(pred.view().iter()) {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    Ok(out)
}

fn align8(offset: usize) -> usize {
    offset.div_ceil(8) * 8
}

fn to_usize(v: u64) -> Result<usize, InputError> {
    usize::try_from(v).map_err(|_| InputError::InvalidInput(format!("{v} exceeds usize")))
}

fn slice<'a>(bytes: &'a [u8], offset: usize, len: usize, what: &str) -> Result<&'a [u8], InputError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| InputError::InvalidInput(format!("{what} out of bounds")))
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, InputError> {
    let raw = slice(bytes, offset, 2, "u16")?;
    Ok(u16::from_le_bytes([raw[0], raw[1]]))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, InputError> {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(slice(bytes, offset, 4, "u32")?);
    Ok(u32::from_le_bytes(raw))
}

fn read_u64(bytes: &[u8], offset: usize) -> Result<u64, InputError> {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(slice(bytes, offset, 8, "u64")?);
    Ok(u64::from_le_bytes(raw))
}

fn read_u64_vec(bytes: &[u8], offset: usize, len: usize) -> Result<Vec<u64>, InputError> {
    let byte_len = len
        .checked_mul(8)
        .ok_or_else(|| InputError::InvalidInput("u64 size overflow".to_string()))?;
    let region = slice(bytes, offset, byte_len, "u64 vector")?;
    let mut out = Vec::with_capacity(len);
    for chunk in region.chunks_exact(8) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        out.push(u64::from_le_bytes(raw));
    }
    Ok(out)
}

fn read_f64_vec(bytes: &[u8], offset: usize, len: usize) -> Result<Vec<f64>, InputError> {
    let byte_len = len
        .checked_mul(8)
        .ok_or_else(|| InputError::InvalidInput("f64 size overflow".to_string()))?;
    let region = slice(bytes, offset, byte_len, "f64 block")?;
    let mut out = Vec::with_capacity(len);
    for chunk in region.chunks_exact(8) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        out.push(f64::from_le_bytes(raw));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/traj_bin.rs"]
mod tests;
