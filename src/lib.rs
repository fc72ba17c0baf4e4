//! Responsive tile gallery: first-fit grid packing, categorical filtering,
//! and frame-driven animated transitions.
//!
//! - [`grid`]: row-major packer placing variable-size tiles into cells
//! - [`animation`]: eased transitions advanced once per display refresh
//! - [`markup`]: container/item declarations and attribute parsing
//! - [`gallery`]: the mounted instance tying layout and filtering together
//! - [`registry`]: explicit set of mounted instances plus resize coalescing

pub mod animation;
pub mod gallery;
pub mod grid;
pub mod markup;
pub mod registry;

pub use animation::{ease_in_out_cubic, Animator, Transition, VisualState};
pub use gallery::{Gallery, GalleryError, Tile};
pub use grid::{GridItem, GridPacker, PackResult, Placement, TileExtent};
pub use markup::{ContainerNode, ItemNode, MountConfig, Page, Target};
pub use registry::{GalleryId, GalleryRegistry};
