mod error;
mod filter_by_trip;
mod load_tracks;
mod plan_page;
mod resolve_places;
mod tables;

#[cfg(test)]
pub mod tests;

pub use self::{
    error::Error, filter_by_trip::*, load_tracks::*, plan_page::*, resolve_places::*, tables::*,
};

pub type Result<T> = std::result::Result<T, Error>;

mod prelude {
    pub use super::{error::Error, Result};
    pub use crate::entities::*;
}
