//! Wireframe model catalogue
//!
//! Templates are authored in small integer object-space units and carry a
//! rational prescale factor that brings them to fixed-point world scale.
//! Polylines are index lists; `STROKE_BREAK` separates independent strokes.

use glam::IVec3;

use crate::consts::UNIT;

/// Separates disjoint strokes inside a polyline index list
pub const STROKE_BREAK: u16 = u16::MAX;

const B: u16 = STROKE_BREAK;

/// Every template in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    Cube,
    ShortCube,
    Pyramid,
    TallPyramid,
    Tank,
    Shell,
    ChunkA,
    ChunkB,
    ChunkC,
    HorizontalLine,
    VerticalLine,
}

impl ModelId {
    pub const ALL: [ModelId; 11] = [
        ModelId::Cube,
        ModelId::ShortCube,
        ModelId::Pyramid,
        ModelId::TallPyramid,
        ModelId::Tank,
        ModelId::Shell,
        ModelId::ChunkA,
        ModelId::ChunkB,
        ModelId::ChunkC,
        ModelId::HorizontalLine,
        ModelId::VerticalLine,
    ];

    /// Debris shapes thrown out by explosions
    pub const CHUNKS: [ModelId; 3] = [ModelId::ChunkA, ModelId::ChunkB, ModelId::ChunkC];

    /// Static scenery the world is populated with
    pub const OBSTACLES: [ModelId; 4] = [
        ModelId::Cube,
        ModelId::ShortCube,
        ModelId::Pyramid,
        ModelId::TallPyramid,
    ];

    #[inline]
    pub fn is_chunk(self) -> bool {
        matches!(self, ModelId::ChunkA | ModelId::ChunkB | ModelId::ChunkC)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Static description of a template before prescaling
struct Template {
    name: &'static str,
    vertices: &'static [[i32; 3]],
    lines: &'static [u16],
    /// Prescale factor numerator / denominator
    scale: (i32, i32),
}

const BOX_LINES: &[u16] = &[0, 1, 2, 3, 0, 4, 5, 6, 7, 4, B, 1, 5, B, 2, 6, B, 3, 7];
const PYRAMID_LINES: &[u16] = &[0, 1, 2, 3, 0, 4, 1, B, 2, 4, 3];

const CUBE: Template = Template {
    name: "cube",
    vertices: &[
        [-1, 0, -1], [1, 0, -1], [1, 0, 1], [-1, 0, 1],
        [-1, 2, -1], [1, 2, -1], [1, 2, 1], [-1, 2, 1],
    ],
    lines: BOX_LINES,
    scale: (6 * UNIT, 1),
};

const SHORT_CUBE: Template = Template {
    name: "short cube",
    vertices: &[
        [-1, 0, -1], [1, 0, -1], [1, 0, 1], [-1, 0, 1],
        [-1, 1, -1], [1, 1, -1], [1, 1, 1], [-1, 1, 1],
    ],
    lines: BOX_LINES,
    scale: (6 * UNIT, 1),
};

const PYRAMID: Template = Template {
    name: "pyramid",
    vertices: &[[-1, 0, -1], [1, 0, -1], [1, 0, 1], [-1, 0, 1], [0, 2, 0]],
    lines: PYRAMID_LINES,
    scale: (6 * UNIT, 1),
};

const TALL_PYRAMID: Template = Template {
    name: "tall pyramid",
    vertices: &[[-1, 0, -1], [1, 0, -1], [1, 0, 1], [-1, 0, 1], [0, 5, 0]],
    lines: PYRAMID_LINES,
    scale: (5 * UNIT, 1),
};

const TANK: Template = Template {
    name: "tank",
    vertices: &[
        // hull
        [-3, 0, -4], [3, 0, -4], [3, 0, 4], [-3, 0, 4],
        [-3, 2, -5], [3, 2, -5], [3, 2, 5], [-3, 2, 5],
        // turret
        [-2, 2, -2], [2, 2, -2], [2, 2, 2], [-2, 2, 2],
        [-1, 4, -1], [1, 4, -1], [1, 4, 1], [-1, 4, 1],
        // barrel, pointing forward (-z)
        [0, 3, -1], [0, 3, -8],
    ],
    lines: &[
        0, 1, 2, 3, 0, B, 4, 5, 6, 7, 4, B, 0, 4, B, 1, 5, B, 2, 6, B, 3, 7, B,
        8, 9, 10, 11, 8, B, 12, 13, 14, 15, 12, B, 8, 12, B, 9, 13, B, 10, 14, B, 11, 15, B,
        16, 17,
    ],
    scale: (5 * UNIT, 4),
};

const SHELL: Template = Template {
    name: "shell",
    vertices: &[[0, 0, -2], [1, 0, 0], [0, 1, 0], [-1, 0, 0], [0, -1, 0], [0, 0, 1]],
    lines: &[0, 1, 5, 3, 0, B, 0, 2, 5, 4, 0],
    scale: (UNIT, 2),
};

const CHUNK_A: Template = Template {
    name: "chunk a",
    vertices: &[[-1, 0, 0], [1, 0, 1], [0, 1, -1]],
    lines: &[0, 1, 2, 0],
    scale: (2 * UNIT, 1),
};

const CHUNK_B: Template = Template {
    name: "chunk b",
    vertices: &[[0, 0, 0], [2, 0, 0], [0, 0, 2], [1, 2, 1]],
    lines: &[0, 1, 2, 0, 3, 1, B, 2, 3],
    scale: (UNIT, 1),
};

const CHUNK_C: Template = Template {
    name: "chunk c",
    vertices: &[[-1, 0, -1], [1, 0, -1], [1, 1, 1], [-1, 1, 1], [0, 2, 0]],
    lines: &[0, 1, 2, 3, 0, B, 2, 4, 3],
    scale: (3 * UNIT, 2),
};

const HORIZONTAL_LINE: Template = Template {
    name: "horizontal line",
    vertices: &[[-1, 0, 0], [1, 0, 0]],
    lines: &[0, 1],
    scale: (4 * UNIT, 1),
};

const VERTICAL_LINE: Template = Template {
    name: "vertical line",
    vertices: &[[0, 0, 0], [0, 1, 0]],
    lines: &[0, 1],
    scale: (10 * UNIT, 1),
};

fn template(id: ModelId) -> &'static Template {
    match id {
        ModelId::Cube => &CUBE,
        ModelId::ShortCube => &SHORT_CUBE,
        ModelId::Pyramid => &PYRAMID,
        ModelId::TallPyramid => &TALL_PYRAMID,
        ModelId::Tank => &TANK,
        ModelId::Shell => &SHELL,
        ModelId::ChunkA => &CHUNK_A,
        ModelId::ChunkB => &CHUNK_B,
        ModelId::ChunkC => &CHUNK_C,
        ModelId::HorizontalLine => &HORIZONTAL_LINE,
        ModelId::VerticalLine => &VERTICAL_LINE,
    }
}

/// A wireframe template: vertices plus polyline strokes
#[derive(Debug, Clone)]
pub struct Model {
    pub name: &'static str,
    pub vertices: Vec<IVec3>,
    pub lines: &'static [u16],
    scale_num: i32,
    scale_den: i32,
}

impl Model {
    fn from_template(t: &Template) -> Self {
        Self {
            name: t.name,
            vertices: t.vertices.iter().map(|&v| IVec3::from_array(v)).collect(),
            lines: t.lines,
            scale_num: t.scale.0,
            scale_den: t.scale.1,
        }
    }

    /// Iterate the independent strokes of the polyline list
    pub fn strokes(&self) -> impl Iterator<Item = &[u16]> {
        self.lines
            .split(|&i| i == STROKE_BREAK)
            .filter(|stroke| !stroke.is_empty())
    }
}

/// Immutable catalogue shared by the simulation and renderer
#[derive(Debug, Clone)]
pub struct ModelRepository {
    models: Vec<Model>,
    prescaled: bool,
}

impl Default for ModelRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRepository {
    /// Load the catalogue in object-space units
    pub fn new() -> Self {
        Self {
            models: ModelId::ALL
                .iter()
                .map(|&id| Model::from_template(template(id)))
                .collect(),
            prescaled: false,
        }
    }

    /// Bring every template to world scale. Only the first call has any effect.
    pub fn prescale(&mut self) {
        if self.prescaled {
            return;
        }
        for model in &mut self.models {
            for v in &mut model.vertices {
                *v = *v * model.scale_num / model.scale_den;
            }
        }
        self.prescaled = true;
        log::debug!("Prescaled {} models", self.models.len());
    }

    pub fn is_prescaled(&self) -> bool {
        self.prescaled
    }

    #[inline]
    pub fn get(&self, id: ModelId) -> &Model {
        &self.models[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_matches_ids() {
        let repo = ModelRepository::new();
        for id in ModelId::ALL {
            assert_eq!(repo.get(id).name, template(id).name);
        }
    }

    #[test]
    fn test_line_indices_in_bounds() {
        let repo = ModelRepository::new();
        for id in ModelId::ALL {
            let model = repo.get(id);
            for stroke in model.strokes() {
                assert!(stroke.len() >= 2, "{} has a one-point stroke", model.name);
                for &i in stroke {
                    assert!((i as usize) < model.vertices.len(), "{} index {}", model.name, i);
                }
            }
        }
    }

    #[test]
    fn test_prescale_is_idempotent() {
        let mut repo = ModelRepository::new();
        repo.prescale();
        let once: Vec<IVec3> = repo.get(ModelId::Tank).vertices.clone();
        repo.prescale();
        assert_eq!(repo.get(ModelId::Tank).vertices, once);
        assert!(repo.is_prescaled());
    }

    #[test]
    fn test_prescale_applies_rational_factor() {
        let mut repo = ModelRepository::new();
        repo.prescale();
        // tank hull corner: 3 * (5 * 256) / 4
        assert_eq!(repo.get(ModelId::Tank).vertices[1], IVec3::new(960, 0, -1280));
        assert_eq!(repo.get(ModelId::Cube).vertices[6], IVec3::new(1536, 3072, 1536));
    }

    #[test]
    fn test_strokes_split_on_break() {
        let repo = ModelRepository::new();
        assert_eq!(repo.get(ModelId::Cube).strokes().count(), 4);
        assert_eq!(repo.get(ModelId::HorizontalLine).strokes().count(), 1);
    }

    #[test]
    fn test_chunk_classification() {
        for id in ModelId::CHUNKS {
            assert!(id.is_chunk());
        }
        assert!(!ModelId::Tank.is_chunk());
        assert!(!ModelId::Shell.is_chunk());
    }
}
