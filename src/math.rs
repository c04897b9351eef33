use nalgebra_glm as glm;

/// Utility function to convert degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// The canonical reference direction every cylindrical part starts out
/// aligned with before its alignment rotation is applied.
pub fn canonical_up() -> glm::Vec3 {
    glm::vec3(0.0, 1.0, 0.0)
}

/// An ordered pair of points defining a strut's centerline.
///
/// A segment with `start == end` has undefined direction; builders must skip
/// it rather than render it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: glm::Vec3,
    pub end: glm::Vec3,
}

impl Segment {
    pub fn new(start: glm::Vec3, end: glm::Vec3) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> glm::Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        glm::length(&self.direction())
    }
}

/// The (angle, axis) pair that rotates [`canonical_up`] onto a segment's
/// direction.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentRotation {
    pub angle_deg: f32,
    pub axis: glm::Vec3,
}

/// Compute the rotation aligning the canonical up axis with `segment`.
///
/// Degenerate cases:
/// - zero-length segment: angle 0, axis (0,1,0) — a documented no-op, not an
///   error
/// - direction parallel or anti-parallel to up: axis snaps to (1,0,0) and the
///   angle to exactly 0 or 180 depending on the sign of direction Y
pub fn alignment_rotation(segment: &Segment) -> AlignmentRotation {
    let dir = segment.direction();
    let length = glm::length(&dir);
    if length == 0.0 {
        return AlignmentRotation {
            angle_deg: 0.0,
            axis: canonical_up(),
        };
    }
    let dir = dir / length;

    // Clamp the dot product to avoid NaN from floating-point overshoot
    let dot = glm::dot(&dir, &canonical_up()).clamp(-1.0, 1.0);
    let angle_deg = dot.acos() * (180.0 / std::f32::consts::PI);

    let axis = glm::cross(&canonical_up(), &dir);
    let axis_length = glm::length(&axis);
    if axis_length == 0.0 {
        // Direction is parallel to the up axis
        AlignmentRotation {
            angle_deg: if dir.y >= 0.0 { 0.0 } else { 180.0 },
            axis: glm::vec3(1.0, 0.0, 0.0),
        }
    } else {
        AlignmentRotation {
            angle_deg,
            axis: axis / axis_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn seg(start: [f32; 3], end: [f32; 3]) -> Segment {
        Segment::new(
            glm::vec3(start[0], start[1], start[2]),
            glm::vec3(end[0], end[1], end[2]),
        )
    }

    /// Apply the returned rotation to the canonical up vector.
    fn rotate_up(rot: &AlignmentRotation) -> glm::Vec3 {
        glm::rotate_vec3(&canonical_up(), deg_to_rad(rot.angle_deg), &rot.axis)
    }

    #[test]
    fn degenerate_segment_is_a_no_op() {
        let rot = alignment_rotation(&seg([3.0, 1.0, -2.0], [3.0, 1.0, -2.0]));
        assert_eq!(rot.angle_deg, 0.0);
        assert_eq!(rot.axis, glm::vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn axis_is_always_unit_length() {
        let segments = [
            seg([0.0, 0.0, 0.0], [3.0, 3.0, 3.0]),
            seg([1.0, 2.0, 3.0], [-4.0, 0.5, 9.0]),
            seg([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            seg([0.0, 0.0, 0.0], [-1.0, 100.0, 0.0]),
        ];
        for s in segments {
            let rot = alignment_rotation(&s);
            assert!((glm::length(&rot.axis) - 1.0).abs() < EPS, "axis {:?}", rot.axis);
        }
    }

    #[test]
    fn rotation_reproduces_the_segment_direction() {
        let s = seg([1.0, -2.0, 0.5], [4.0, 3.0, -6.0]);
        let rot = alignment_rotation(&s);
        let rotated = rotate_up(&rot);
        let expected = glm::normalize(&s.direction());
        assert!(glm::length(&(rotated - expected)) < EPS);
    }

    #[test]
    fn parallel_to_up_snaps_axis() {
        let rot = alignment_rotation(&seg([0.0, 0.0, 0.0], [0.0, 5.0, 0.0]));
        assert_eq!(rot.angle_deg, 0.0);
        assert_eq!(rot.axis, glm::vec3(1.0, 0.0, 0.0));

        let rot = alignment_rotation(&seg([0.0, 0.0, 0.0], [0.0, -5.0, 0.0]));
        assert_eq!(rot.angle_deg, 180.0);
        assert_eq!(rot.axis, glm::vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn near_parallel_directions_stay_continuous() {
        // Approaching the up axis the angle tends to 0 and the rotated up
        // vector still lands on the direction, with no jump other than the
        // snap exactly at parallel.
        let rot = alignment_rotation(&seg([0.0, 0.0, 0.0], [1e-4, 1.0, 0.0]));
        assert!(rot.angle_deg < 0.1);
        let rotated = rotate_up(&rot);
        let expected = glm::normalize(&glm::vec3(1e-4, 1.0, 0.0));
        assert!(glm::length(&(rotated - expected)) < EPS);

        let rot = alignment_rotation(&seg([0.0, 0.0, 0.0], [1e-4, -1.0, 0.0]));
        assert!(rot.angle_deg > 179.9);
    }

    #[test]
    fn deg_to_rad_converts() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < EPS);
        assert_eq!(deg_to_rad(0.0), 0.0);
    }
}
