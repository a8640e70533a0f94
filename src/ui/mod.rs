pub mod icons;
pub mod table;

pub use table::render_sub_builds;
