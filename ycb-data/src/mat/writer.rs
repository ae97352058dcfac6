//! Minimal MAT-file Level 5 writer.
//!
//! Produces little-endian files with uncompressed `miMATRIX` elements that
//! `scipy.io.loadmat` and MATLAB read directly. Only the array classes the
//! dataset needs are supported: real double matrices, int64 scalars and
//! char rows.

use crate::error::DataError;
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const HEADER_TEXT_LEN: usize = 116;
const VERSION: u16 = 0x0100;

// Data element types
const MI_INT8: u32 = 1;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_INT64: u32 = 12;
const MI_MATRIX: u32 = 14;

// Array classes
const MX_CHAR_CLASS: u32 = 4;
const MX_DOUBLE_CLASS: u32 = 6;
const MX_INT64_CLASS: u32 = 14;

/// A single named variable in a MAT file.
#[derive(Debug, Clone, PartialEq)]
enum MatValue {
    /// Real double matrix, `data` in column-major order.
    Double { rows: usize, cols: usize, data: Vec<f64> },
    /// 1×1 int64 scalar.
    Int64(i64),
    /// 1×N char row vector.
    Char(String),
}

impl MatValue {
    fn class(&self) -> u32 {
        match self {
            MatValue::Double { .. } => MX_DOUBLE_CLASS,
            MatValue::Int64(_) => MX_INT64_CLASS,
            MatValue::Char(_) => MX_CHAR_CLASS,
        }
    }

    fn dims(&self) -> (usize, usize) {
        match self {
            MatValue::Double { rows, cols, .. } => (*rows, *cols),
            MatValue::Int64(_) => (1, 1),
            MatValue::Char(s) => (1, s.encode_utf16().count()),
        }
    }

    fn data_type(&self) -> u32 {
        match self {
            MatValue::Double { .. } => MI_DOUBLE,
            MatValue::Int64(_) => MI_INT64,
            MatValue::Char(_) => MI_UINT16,
        }
    }

    fn data_len(&self) -> usize {
        match self {
            MatValue::Double { data, .. } => data.len() * 8,
            MatValue::Int64(_) => 8,
            MatValue::Char(s) => s.encode_utf16().count() * 2,
        }
    }

    fn write_data<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            MatValue::Double { data, .. } => data.iter().try_for_each(|v| w.write_f64::<LittleEndian>(*v)),
            MatValue::Int64(v) => w.write_i64::<LittleEndian>(*v),
            MatValue::Char(s) => s.encode_utf16().try_for_each(|c| w.write_u16::<LittleEndian>(c)),
        }
    }
}

/// Round up to the 8-byte boundary every data element must end on.
fn padded(len: usize) -> usize {
    len.div_ceil(8) * 8
}

fn write_padding<W: Write>(w: &mut W, len: usize) -> std::io::Result<()> {
    w.write_all(&[0u8; 8][..padded(len) - len])
}

fn write_tag<W: Write>(w: &mut W, data_type: u32, len: usize) -> std::io::Result<()> {
    w.write_u32::<LittleEndian>(data_type)?;
    w.write_u32::<LittleEndian>(len as u32)
}

/// An in-memory MAT file: header text plus an ordered list of variables.
#[derive(Debug, Clone)]
pub struct MatFile {
    description: String,
    variables: Vec<(String, MatValue)>,
}

impl MatFile {
    pub fn new() -> Self {
        Self {
            description: format!(
                "MATLAB 5.0 MAT-file, Platform: {}, Created by: ycb40",
                std::env::consts::OS
            ),
            variables: Vec::new(),
        }
    }

    /// Add a real `rows × cols` double matrix given in column-major order.
    pub fn with_matrix(mut self, name: &str, rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        self.variables.push((name.to_string(), MatValue::Double { rows, cols, data }));
        self
    }

    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.variables.push((name.to_string(), MatValue::Int64(value)));
        self
    }

    pub fn with_str(mut self, name: &str, value: &str) -> Self {
        self.variables.push((name.to_string(), MatValue::Char(value.to_string())));
        self
    }

    /// Serialize the whole file.
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let mut text = self.description.clone().into_bytes();
        text.resize(HEADER_TEXT_LEN, b' ');
        w.write_all(&text)?;
        w.write_all(&[0u8; 8])?; // subsystem data offset
        w.write_u16::<LittleEndian>(VERSION)?;
        w.write_all(b"IM")?;

        for (name, value) in &self.variables {
            Self::write_variable(w, name, value)?;
        }
        Ok(())
    }

    fn write_variable<W: Write>(w: &mut W, name: &str, value: &MatValue) -> std::io::Result<()> {
        let data_len = value.data_len();
        let body_len = 16 + 16 + 8 + padded(name.len()) + 8 + padded(data_len);
        write_tag(w, MI_MATRIX, body_len)?;

        // array flags: class in the low byte, no complex/global/logical bits
        write_tag(w, MI_UINT32, 8)?;
        w.write_u32::<LittleEndian>(value.class())?;
        w.write_u32::<LittleEndian>(0)?;

        let (rows, cols) = value.dims();
        write_tag(w, MI_INT32, 8)?;
        w.write_i32::<LittleEndian>(rows as i32)?;
        w.write_i32::<LittleEndian>(cols as i32)?;

        write_tag(w, MI_INT8, name.len())?;
        w.write_all(name.as_bytes())?;
        write_padding(w, name.len())?;

        write_tag(w, value.data_type(), data_len)?;
        value.write_data(w)?;
        write_padding(w, data_len)
    }

    /// Write the file to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| DataError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| DataError::io(path, e))?;
        debug!("Wrote MAT file {} ({} variables)", path.display(), self.variables.len());
        Ok(())
    }
}

impl Default for MatFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian as LE};

    /// A variable decoded back from raw bytes.
    #[derive(Debug)]
    pub(crate) struct Decoded {
        pub name: String,
        pub class: u32,
        pub rows: usize,
        pub cols: usize,
        pub data_type: u32,
        pub data: Vec<u8>,
    }

    impl Decoded {
        pub fn f64s(&self) -> Vec<f64> {
            self.data.chunks_exact(8).map(LE::read_f64).collect()
        }

        pub fn string(&self) -> String {
            let units: Vec<u16> = self.data.chunks_exact(2).map(LE::read_u16).collect();
            String::from_utf16(&units).unwrap()
        }
    }

    /// Walk the uncompressed elements the writer produces.
    pub(crate) fn decode(bytes: &[u8]) -> Vec<Decoded> {
        assert_eq!(&bytes[126..128], b"IM");
        assert_eq!(LE::read_u16(&bytes[124..126]), VERSION);

        let mut out = Vec::new();
        let mut pos = 128;
        while pos < bytes.len() {
            assert_eq!(LE::read_u32(&bytes[pos..]), MI_MATRIX);
            let body_len = LE::read_u32(&bytes[pos + 4..]) as usize;
            let body = &bytes[pos + 8..pos + 8 + body_len];

            let class = LE::read_u32(&body[8..]);
            let rows = LE::read_i32(&body[24..]) as usize;
            let cols = LE::read_i32(&body[28..]) as usize;
            let name_len = LE::read_u32(&body[36..]) as usize;
            let name = String::from_utf8(body[40..40 + name_len].to_vec()).unwrap();
            let data_at = 40 + padded(name_len);
            let data_type = LE::read_u32(&body[data_at..]);
            let data_len = LE::read_u32(&body[data_at + 4..]) as usize;
            let data = body[data_at + 8..data_at + 8 + data_len].to_vec();
            assert_eq!(data_at + 8 + padded(data_len), body_len);

            out.push(Decoded {
                name,
                class,
                rows,
                cols,
                data_type,
                data,
            });
            pos += 8 + body_len;
        }
        assert_eq!(pos, bytes.len());
        out
    }

    fn render(file: &MatFile) -> Vec<u8> {
        let mut buf = Vec::new();
        file.write_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_header_is_128_bytes() {
        let bytes = render(&MatFile::new());
        assert_eq!(bytes.len(), 128);
        assert!(bytes.starts_with(b"MATLAB 5.0 MAT-file"));
        assert_eq!(&bytes[116..124], &[0u8; 8]);
    }

    #[test]
    fn test_matrix_variable_layout() {
        let file = MatFile::new().with_matrix("pc", 2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let bytes = render(&file);
        assert_eq!(bytes.len() % 8, 0);

        let vars = decode(&bytes);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "pc");
        assert_eq!(vars[0].class, MX_DOUBLE_CLASS);
        assert_eq!((vars[0].rows, vars[0].cols), (2, 3));
        assert_eq!(vars[0].data_type, MI_DOUBLE);
        assert_eq!(vars[0].f64s(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_int_and_char_variables() {
        let file = MatFile::new().with_int("label", 7).with_str("cat", "mug");
        let vars = decode(&render(&file));

        assert_eq!(vars[0].name, "label");
        assert_eq!(vars[0].class, MX_INT64_CLASS);
        assert_eq!(LE::read_i64(&vars[0].data), 7);

        assert_eq!(vars[1].name, "cat");
        assert_eq!(vars[1].class, MX_CHAR_CLASS);
        assert_eq!((vars[1].rows, vars[1].cols), (1, 3));
        assert_eq!(vars[1].string(), "mug");
    }

    #[test]
    fn test_empty_matrix() {
        let file = MatFile::new().with_matrix("pc", 0, 3, vec![]);
        let vars = decode(&render(&file));
        assert_eq!((vars[0].rows, vars[0].cols), (0, 3));
        assert!(vars[0].data.is_empty());
    }
}
