mod azimuth;
mod distance;

pub use self::{azimuth::Azimuth, distance::Distance};
