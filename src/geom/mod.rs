mod bbox;
mod geom;
mod measure;

use bbox::UnitEnvelope;
pub(crate) use geom::Geometries;
pub use measure::{area, perimeter, perimeter_area_ratio, polsby_popper};
