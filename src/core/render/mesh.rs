//=========================================================================
// Mesh Primitives
//=========================================================================
//
// CPU-side geometry for the two shapes the game is built from.
//
// - `plane`: camera-facing billboard in the XY plane
// - `boxed`: any subset of the six faces of a unit box
//
// All texture coordinates address a single 1024×1024 atlas. Box faces
// sample a 16-pixel strip of the atlas selected by `row`, each face
// using a fixed horizontal slice:
// ```text
//   G 0.000..0.125   C 0.125..0.250   B 0.250..0.500
//   L 0.500..0.750   R 0.750..1.000   F 1.000..0.750 (mirrored)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::ContentError;

//=== Constants ===========================================================

/// Atlas edge length in pixels.
pub const ATLAS_SIZE: f32 = 1024.0;

/// Height of one box texture row in pixels.
pub const BOX_ROW_HEIGHT: f32 = 16.0;

//=== MeshData ============================================================

/// Indexed triangle geometry with texture coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<[f32; 3]>,
    pub coords: Vec<[f32; 2]>,
    pub triangles: Vec<[u16; 3]>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

//=== Plane ===============================================================

/// Billboard quad of half-size `sx × sy`, textured with the atlas pixel
/// rectangle `(s, t)..(u, v)`.
pub fn plane(s: f32, t: f32, u: f32, v: f32, sx: f32, sy: f32) -> MeshData {
    let (s, t, u, v) = (s / ATLAS_SIZE, t / ATLAS_SIZE, u / ATLAS_SIZE, v / ATLAS_SIZE);

    MeshData {
        vertices: vec![[-sx, -sy, 0.0], [sx, -sy, 0.0], [-sx, sy, 0.0], [sx, sy, 0.0]],
        coords: vec![[s, t], [u, t], [s, v], [u, v]],
        triangles: vec![[0, 1, 2], [2, 1, 3]],
    }
}

//=== Box Faces ===========================================================

/// One face of the unit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoxFace {
    Ground,
    Ceiling,
    Back,
    Left,
    Right,
    Front,
}

impl BoxFace {
    /// Canonical emission order.
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Ground,
        BoxFace::Ceiling,
        BoxFace::Back,
        BoxFace::Left,
        BoxFace::Right,
        BoxFace::Front,
    ];

    pub fn from_letter(letter: char) -> Result<Self, ContentError> {
        match letter {
            'G' => Ok(BoxFace::Ground),
            'C' => Ok(BoxFace::Ceiling),
            'B' => Ok(BoxFace::Back),
            'L' => Ok(BoxFace::Left),
            'R' => Ok(BoxFace::Right),
            'F' => Ok(BoxFace::Front),
            other => Err(ContentError::UnknownFace(other)),
        }
    }

    pub fn letter(&self) -> char {
        match self {
            BoxFace::Ground => 'G',
            BoxFace::Ceiling => 'C',
            BoxFace::Back => 'B',
            BoxFace::Left => 'L',
            BoxFace::Right => 'R',
            BoxFace::Front => 'F',
        }
    }

    fn corners(&self) -> [[f32; 3]; 4] {
        match self {
            BoxFace::Ground => [[-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [-1.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
            BoxFace::Ceiling => [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            BoxFace::Back => [[-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
            BoxFace::Left => [[-1.0, 0.0, -1.0], [-1.0, 0.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]],
            BoxFace::Right => [[1.0, 0.0, -1.0], [1.0, 0.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
            BoxFace::Front => [[-1.0, 0.0, 1.0], [1.0, 0.0, 1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
        }
    }

    /// Horizontal atlas slice `(left, right)` for this face.
    fn columns(&self) -> (f32, f32) {
        match self {
            BoxFace::Ground => (0.0, 0.125),
            BoxFace::Ceiling => (0.125, 0.25),
            BoxFace::Back => (0.25, 0.5),
            BoxFace::Left => (0.5, 0.75),
            BoxFace::Right => (0.75, 1.0),
            BoxFace::Front => (1.0, 0.75),
        }
    }
}

/// Validated set of box faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxFaces {
    present: [bool; 6],
}

impl BoxFaces {
    /// Parses a face list such as `"LRGCFB"`.
    ///
    /// Letters may appear in any order but at most once each.
    pub fn parse(letters: &str) -> Result<Self, ContentError> {
        let mut faces = Self::default();
        for letter in letters.chars() {
            let face = BoxFace::from_letter(letter)?;
            let slot = &mut faces.present[face as usize];
            if *slot {
                return Err(ContentError::DuplicateFace(letter));
            }
            *slot = true;
        }
        Ok(faces)
    }

    pub fn contains(&self, face: BoxFace) -> bool {
        self.present[face as usize]
    }

    /// Present faces in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = BoxFace> + '_ {
        BoxFace::ALL.into_iter().filter(move |face| self.contains(*face))
    }

    pub fn len(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//=== Box =================================================================

/// Unit box (x, z in -1..1, y in 0..1) made of the given faces, textured
/// from atlas row `row` (counted from the bottom edge).
pub fn boxed(row: u32, faces: &BoxFaces) -> MeshData {
    let top = (ATLAS_SIZE - BOX_ROW_HEIGHT * row as f32) / ATLAS_SIZE;
    let bottom = top - BOX_ROW_HEIGHT / ATLAS_SIZE;
    let (s, t) = (top, bottom);

    let mut mesh = MeshData::default();
    for (i, face) in faces.iter().enumerate() {
        let (left, right) = face.columns();
        mesh.vertices.extend_from_slice(&face.corners());
        mesh.coords.extend_from_slice(&[[left, s], [right, s], [left, t], [right, t]]);

        let base = (i * 4) as u16;
        mesh.triangles.push([base, base + 1, base + 2]);
        mesh.triangles.push([base + 2, base + 1, base + 3]);
    }
    mesh
}

//=== Unit Tests ==========================================================
