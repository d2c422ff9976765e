pub mod geocode;
pub mod render;
pub mod track;
