use nalgebra::{Unit, Vector3};

/// Force pushing the body along `-up`, linear in speed.
pub fn force(coefficient: f32, speed: f32, up: &Unit<Vector3<f32>>) -> Vector3<f32> {
    -up.into_inner() * coefficient * speed
}
