// Domain layer - Manifest model and pure derivations
pub mod manifest;
pub mod normalize;
pub mod sidebar;
pub mod tree;
