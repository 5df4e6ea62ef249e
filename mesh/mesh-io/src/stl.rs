//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL. The loader auto-detects the
//! variant: ASCII files start with "solid" and a null-free header, binary
//! files carry an 80-byte header followed by a face count.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    - Header (ignored)
//! UINT32       - Number of triangles
//! foreach triangle
//!     REAL32[3] - Normal vector
//!     REAL32[3] - Vertex 1
//!     REAL32[3] - Vertex 2
//!     REAL32[3] - Vertex 3
//!     UINT16    - Attribute byte count (0)
//! end
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Point3};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL.
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file, auto-detecting ASCII versus binary.
///
/// Vertices are emitted unwelded (three per face), exactly as stored.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid STL.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("brain_left.stl").unwrap();
/// println!("{} faces", mesh.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mut reader = BufReader::new(file);

    let mut header = [0u8; HEADER_SIZE + 4];
    let bytes_read = reader.read(&mut header)?;
    if bytes_read < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let header_str = String::from_utf8_lossy(&header[..bytes_read.min(HEADER_SIZE)]);
    if header_str.trim_start().starts_with("solid") && !header[..bytes_read].contains(&0) {
        // ASCII: re-read from the start.
        drop(reader);
        let file = File::open(path)?;
        load_stl_ascii(BufReader::new(file))
    } else {
        load_stl_binary_from_header(&header[..bytes_read], reader)
    }
}

/// Load a binary STL given the already-read header.
fn load_stl_binary_from_header<R: Read>(header: &[u8], mut reader: R) -> IoResult<IndexedMesh> {
    if header.len() < HEADER_SIZE + 4 {
        return Err(IoError::invalid_content("truncated binary STL header"));
    }

    let face_count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    let mut mesh = IndexedMesh::with_capacity((face_count as usize) * 3, face_count as usize);

    let mut triangle_buf = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        let bytes_read = reader.read(&mut triangle_buf)?;
        if bytes_read < TRIANGLE_SIZE {
            return Err(IoError::InvalidFaceCount {
                expected: face_count,
                got: i,
            });
        }

        // Skip the stored normal; it is recomputed on save.
        let v0 = read_vertex(&triangle_buf[12..24]);
        let v1 = read_vertex(&triangle_buf[24..36]);
        let v2 = read_vertex(&triangle_buf[36..48]);

        #[allow(clippy::cast_possible_truncation)]
        let base = mesh.vertices.len() as u32;
        mesh.vertices.push(v0);
        mesh.vertices.push(v1);
        mesh.vertices.push(v2);
        mesh.faces.push([base, base + 1, base + 2]);
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 little-endian f32s).
fn read_vertex(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Load an ASCII STL file.
fn load_stl_ascii<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut vertices_in_face: Vec<Point3<f64>> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&keyword) = parts.first() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "facet" => in_facet = true,
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    vertices_in_face.clear();
                }
            }
            "vertex" => {
                if in_loop && parts.len() >= 4 {
                    let x: f64 = parts[1].parse()?;
                    let y: f64 = parts[2].parse()?;
                    let z: f64 = parts[3].parse()?;
                    vertices_in_face.push(Point3::new(x, y, z));
                }
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if in_facet && vertices_in_face.len() == 3 {
                    #[allow(clippy::cast_possible_truncation)]
                    let base = mesh.vertices.len() as u32;
                    mesh.vertices.append(&mut vertices_in_face);
                    mesh.faces.push([base, base + 1, base + 2]);
                }
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, write binary STL; if false, ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if binary {
        save_stl_binary(mesh, writer)
    } else {
        save_stl_ascii(mesh, writer)
    }
}

/// Face normal components for the STL record, zero for degenerate faces.
fn face_normal(mesh: &IndexedMesh, face: [u32; 3]) -> (f64, f64, f64) {
    let v0 = &mesh.vertices[face[0] as usize];
    let v1 = &mesh.vertices[face[1] as usize];
    let v2 = &mesh.vertices[face[2] as usize];

    let normal = (v1 - v0).cross(&(v2 - v0));
    let len = normal.norm();
    if len > f64::EPSILON {
        (normal.x / len, normal.y / len, normal.z / len)
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// Save mesh as binary STL.
fn save_stl_binary<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL hemisphere surface export";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    #[allow(clippy::cast_possible_truncation)]
    let face_count = mesh.faces.len() as u32;
    writer.write_all(&face_count.to_le_bytes())?;

    for &face in &mesh.faces {
        let (nx, ny, nz) = face_normal(mesh, face);
        #[allow(clippy::cast_possible_truncation)]
        {
            writer.write_all(&(nx as f32).to_le_bytes())?;
            writer.write_all(&(ny as f32).to_le_bytes())?;
            writer.write_all(&(nz as f32).to_le_bytes())?;
        }

        for &idx in &face {
            let v = &mesh.vertices[idx as usize];
            #[allow(clippy::cast_possible_truncation)]
            {
                writer.write_all(&(v.x as f32).to_le_bytes())?;
                writer.write_all(&(v.y as f32).to_le_bytes())?;
                writer.write_all(&(v.z as f32).to_le_bytes())?;
            }
        }

        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Save mesh as ASCII STL.
fn save_stl_ascii<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for &face in &mesh.faces {
        let (nx, ny, nz) = face_normal(mesh, face);
        writeln!(writer, "  facet normal {nx:.6e} {ny:.6e} {nz:.6e}")?;
        writeln!(writer, "    outer loop")?;
        for &idx in &face {
            let v = &mesh.vertices[idx as usize];
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;

    Ok(())
}
