use std::collections::HashMap;

use thiserror::Error;

use crate::animation::{Animator, VisualState};
use crate::grid::{GridItem, GridPacker, PackResult, TileExtent};
use crate::markup::{parse_categories, parse_size, MountConfig, Page, Target};

/// Default animation duration in milliseconds.
const DEFAULT_ANIMATION_DURATION_MS: f32 = 250.0;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("invalid target given to the gallery constructor (container or selector required)")]
    InvalidTarget,
}

/// One visual item of a mounted gallery.
///
/// Created once at mount from markup, then mutated in place by every layout
/// and filter pass. The gallery never destroys tiles.
#[derive(Debug, Clone)]
pub struct Tile {
    pub extent: TileExtent,
    pub categories: Vec<String>,
    pub label: String,
    /// Pixel size written by the last layout pass.
    pub width_px: f32,
    pub height_px: f32,
    /// Last-written visual state; also the starting point of the next
    /// transition.
    pub visual: VisualState,
}

/// A mounted gallery: owns the tiles, the category index, and the mount
/// configuration, and orchestrates layout and filter passes over them.
pub struct Gallery {
    tiles: Vec<Tile>,
    /// Category label -> member tile indices, in item order. Built once at
    /// mount; read-only afterwards.
    categories: HashMap<String, Vec<usize>>,
    row_capacity: u32,
    gap: f32,
    tile_ratio: f32,
    filtered_category: String,
    animation_duration_ms: f32,
    container_height: f32,
    animator: Animator,
}

impl Gallery {
    /// Mount a gallery on a container. Reads the mount configuration, scans
    /// the items into tiles, builds the category index, and runs an initial
    /// layout pass at the container's width.
    ///
    /// Fails with [`GalleryError::InvalidTarget`] when a selector target does
    /// not resolve to a container on the page.
    pub fn create(page: &Page, target: Target, tile_ratio: f32) -> Result<Self, GalleryError> {
        let node = match target {
            Target::Container(node) => node,
            Target::Selector(selector) => {
                page.find(selector).ok_or(GalleryError::InvalidTarget)?
            }
        };

        let config = MountConfig::from_container(node);

        let mut tiles = Vec::with_capacity(node.items.len());
        let mut categories: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, item) in node.items.iter().enumerate() {
            let labels = parse_categories(item.category.as_deref());
            for label in &labels {
                categories.entry(label.clone()).or_default().push(i);
            }

            tiles.push(Tile {
                extent: parse_size(item.size.as_deref(), config.row_capacity, i),
                categories: labels,
                label: item.label.clone(),
                width_px: 0.0,
                height_px: 0.0,
                visual: VisualState::resting(),
            });
        }

        let mut gallery = Self {
            tiles,
            categories,
            row_capacity: config.row_capacity,
            gap: config.gap,
            tile_ratio,
            filtered_category: String::new(),
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            container_height: 0.0,
            animator: Animator::new(),
        };
        gallery.adjust_tiles(node.width);
        Ok(gallery)
    }

    /// Relayout without animation. Idempotent: repeated calls with the same
    /// width write the same pixel values.
    ///
    /// Every tile gets a fresh pixel size; only tiles matching the active
    /// filter get a fresh position (hidden tiles keep their previous visual
    /// state). The container height is derived from the last packed row.
    pub fn adjust_tiles(&mut self, container_width: f32) {
        let (tile_width, tile_height) = self.tile_metrics(container_width);

        for tile in &mut self.tiles {
            let w = tile.extent.width as f32;
            let h = tile.extent.height as f32;
            tile.width_px = tile_width * w + self.gap * (w - 1.0);
            tile.height_px = tile_height * h + self.gap * (h - 1.0);
        }

        let packed = self.pack_visible();
        for p in &packed.placements {
            let tile = &mut self.tiles[p.index];
            tile.visual.left = (tile_width + self.gap) * p.column as f32;
            tile.visual.top = (tile_height + self.gap) * p.row as f32;
        }

        self.container_height = self.height_for(packed.max_row, tile_height);
    }

    /// Animated relayout under a new category filter. An empty label clears
    /// the filter; a label with no index entry behaves as "show all".
    ///
    /// All target positions come from one packing pass before any transition
    /// starts. One transition is enqueued per tile (matching tiles move to
    /// their packed position while fading to full opacity and scale; excluded
    /// tiles fade out in place) and the call returns without waiting.
    pub fn filter(&mut self, category: &str, container_width: f32) {
        self.filtered_category = category.to_string();

        let (tile_width, tile_height) = self.tile_metrics(container_width);
        let packed = self.pack_visible();

        let mut targets: HashMap<usize, (f32, f32)> = HashMap::with_capacity(packed.placements.len());
        for p in &packed.placements {
            targets.insert(
                p.index,
                (
                    (tile_width + self.gap) * p.column as f32,
                    (tile_height + self.gap) * p.row as f32,
                ),
            );
        }

        let duration = self.animation_duration_ms;
        for (i, tile) in self.tiles.iter().enumerate() {
            let from = tile.visual;
            let to = match targets.get(&i) {
                Some(&(left, top)) => VisualState {
                    left,
                    top,
                    opacity: 1.0,
                    scale: 1.0,
                },
                None => VisualState {
                    opacity: 0.0,
                    scale: 0.0,
                    ..from
                },
            };
            self.animator.start(i, from, to, duration);
        }
    }

    /// Advance in-flight transitions by `dt` seconds, writing the
    /// interpolated state back into the tiles. Returns true while any
    /// transition is live. Called once per display refresh by the host.
    pub fn tick(&mut self, dt: f32) -> bool {
        let tiles = &mut self.tiles;
        self.animator.tick(dt, |index, state| {
            if let Some(tile) = tiles.get_mut(index) {
                tile.visual = state;
            }
        })
    }

    pub fn set_animation_duration(&mut self, duration_ms: f32) {
        self.animation_duration_ms = duration_ms;
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn row_capacity(&self) -> u32 {
        self.row_capacity
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn filtered_category(&self) -> &str {
        &self.filtered_category
    }

    /// Height of the container as of the last unanimated layout pass.
    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// All category labels found at mount, sorted for stable presentation.
    pub fn category_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Whether a tile passes the active filter. A label with no index entry
    /// (including the empty label) shows every tile.
    pub fn is_visible(&self, tile_index: usize) -> bool {
        match self.categories.get(&self.filtered_category) {
            Some(members) => members.contains(&tile_index),
            None => true,
        }
    }

    fn tile_metrics(&self, container_width: f32) -> (f32, f32) {
        let capacity = self.row_capacity as f32;
        let tile_width = (container_width - self.gap * (capacity - 1.0)) / capacity;
        let tile_height = tile_width * (2.0 - self.tile_ratio);
        (tile_width, tile_height)
    }

    fn height_for(&self, max_row: u32, tile_height: f32) -> f32 {
        (max_row as f32 + 1.0) * tile_height + self.gap * max_row as f32
    }

    /// One packing pass over the tiles passing the active filter.
    fn pack_visible(&self) -> PackResult {
        let items: Vec<GridItem> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_visible(*i))
            .map(|(index, tile)| GridItem {
                extent: tile.extent,
                index,
            })
            .collect();
        GridPacker::pack(&items, self.row_capacity)
    }
}
