mod store;
mod unit;

pub use store::UnitStore;
pub use unit::Unit;
