// Domain layer: the NML entities, their arena and the ports they consume.

pub mod entity;
pub mod graph;
pub mod group;
pub mod model;
pub mod network;
pub mod ports;
pub mod service;
