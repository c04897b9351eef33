pub mod ball;
pub mod cone;
pub mod cuboid;
pub mod mesh;
pub mod strut;
pub mod wheel;
