// Domain layer: identifier model, checksum arithmetic and ports (interfaces).

pub mod luhn;
pub mod model;
pub mod ports;
