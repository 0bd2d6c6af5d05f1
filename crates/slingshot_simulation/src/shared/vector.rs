//! Векторные helpers для контроллеров (linear steps, axis decomposition, easing)

use bevy::prelude::*;

/// Сдвигает `current` к `target` не более чем на `max_delta` (без overshoot)
///
/// Линейный шаг, не экспоненциальное затухание.
pub fn move_toward(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();

    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Раскладывает вектор на (компонент вдоль `axis`, остаток)
///
/// `axis` нормализуется; нулевая ось → весь вектор считается остатком.
pub fn split_along_axis(vector: Vec3, axis: Vec3) -> (Vec3, Vec3) {
    let axis = axis.normalize_or_zero();
    let along = axis * vector.dot(axis);
    (along, vector - along)
}

/// Ease-in-ease-out (smoothstep) на `[0, 1]`, вход клампится
///
/// Монотонна, f(0) = 0, f(1) = 1, без overshoot.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward_partial_step() {
        let result = move_toward(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert!((result.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_move_toward_never_overshoots() {
        let target = Vec3::new(1.0, 0.0, 1.0);
        let result = move_toward(Vec3::ZERO, target, 100.0);
        assert_eq!(result, target);
    }

    #[test]
    fn test_split_along_up_axis() {
        let (vertical, horizontal) = split_along_axis(Vec3::new(3.0, -2.0, 4.0), Vec3::Y);
        assert_eq!(vertical, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(horizontal, Vec3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn test_split_along_unnormalized_axis() {
        let (vertical, _) = split_along_axis(Vec3::new(0.0, 5.0, 0.0), Vec3::Y * 3.0);
        assert!((vertical.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_in_out_endpoints_and_monotonic() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(2.0), 1.0);

        let mut previous = 0.0;
        for step in 1..=100 {
            let value = ease_in_out(step as f32 / 100.0);
            assert!(value >= previous);
            assert!(value <= 1.0);
            previous = value;
        }
    }
}
