/// Domain layer: the configuration tree and the values flowing through a run.
pub mod entities;
pub mod value_objects;
