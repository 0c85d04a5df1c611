mod gallery_grid;
mod sports_list;

pub use gallery_grid::GalleryGrid;
pub use sports_list::SportsList;

/// Placeholder cards shown while a listing is loading.
pub(crate) const SKELETON_COUNT: usize = 3;
