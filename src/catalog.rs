//! Tile catalog: the immutable set of tile templates and the
//! frequency-weighted pool that generation samples from.

use crate::error::{MazeError, Result};
use crate::model::{Direction, Tile};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

const BUNDLED_TILES: &str = include_str!("../assets/tiles.json");

/// One catalog record as stored in `tiles.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Direction names per path segment.
    pub paths: Vec<Vec<String>>,
    /// Relative frequency; 1.0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl TileDescriptor {
    fn frequency(&self) -> f64 {
        self.frequency.unwrap_or(1.0)
    }

    fn to_tile(&self) -> Result<Tile> {
        let paths = self
            .paths
            .iter()
            .map(|segment| {
                segment
                    .iter()
                    .map(|name| {
                        Direction::from_name(name).ok_or_else(|| MazeError::InvalidCatalogEntry {
                            id: self.id.clone(),
                            reason: format!("unknown direction `{name}`"),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Tile::new(&self.id, &self.name, &self.image, paths))
    }
}

/// Loaded-once tile templates plus the weighted pool built from them.
#[derive(Clone, Debug, PartialEq)]
pub struct TileCatalog {
    templates: Vec<Tile>,
    /// `ceil(frequency / min_frequency)` copies of each template, in catalog order.
    pool: Vec<Tile>,
}

impl TileCatalog {
    pub fn from_descriptors(descriptors: &[TileDescriptor]) -> Result<Self> {
        if descriptors.is_empty() {
            return Err(MazeError::EmptyCatalog);
        }
        for d in descriptors {
            let f = d.frequency();
            if !(f.is_finite() && f > 0.0) {
                return Err(MazeError::InvalidCatalogEntry {
                    id: d.id.clone(),
                    reason: format!("frequency must be a positive number, got {f}"),
                });
            }
        }
        let min_frequency = descriptors.iter().map(TileDescriptor::frequency).fold(f64::INFINITY, f64::min);

        let mut templates = Vec::with_capacity(descriptors.len());
        let mut pool = Vec::new();
        for d in descriptors {
            let tile = d.to_tile()?;
            let copies = (d.frequency() / min_frequency).ceil() as usize;
            pool.extend(std::iter::repeat_n(tile.clone(), copies));
            templates.push(tile);
        }
        log::debug!("tile catalog loaded: {} templates, pool of {}", templates.len(), pool.len());
        Ok(Self { templates, pool })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let descriptors: Vec<TileDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(&descriptors)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TILES)
    }

    /// Distinct templates in catalog order, unrotated.
    pub fn templates(&self) -> &[Tile] {
        &self.templates
    }

    pub fn pool(&self) -> &[Tile] {
        &self.pool
    }

    pub fn template(&self, id: &str) -> Option<&Tile> {
        self.templates.iter().find(|t| t.id() == id)
    }

    /// Draw a tile from the pool, optionally restricted to one id.
    pub fn random_tile(&self, id: Option<&str>, rng: &mut dyn RandomSource) -> Result<Tile> {
        let candidates: Vec<&Tile> = match id {
            Some(id) => self.pool.iter().filter(|t| t.id() == id).collect(),
            None => self.pool.iter().collect(),
        };
        if candidates.is_empty() {
            return Err(MazeError::UnknownTile(id.unwrap_or_default().to_string()));
        }
        Ok(candidates[rng.next_below(candidates.len())].clone())
    }
}
