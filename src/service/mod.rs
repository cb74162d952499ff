pub mod overpass;
pub mod store;
