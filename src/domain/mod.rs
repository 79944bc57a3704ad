// Domain layer: settings record, catalog entries and the ports the core talks through.

pub mod model;
pub mod ports;
