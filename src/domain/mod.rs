// Domain layer: event and outcome models plus the ports the remediator drives.

pub mod model;
pub mod ports;
