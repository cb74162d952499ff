pub mod location;
pub use location::LocationRecord;

pub mod operator;
pub use operator::Operator;

pub mod overpass_element;
pub use overpass_element::OverpassElement;
