mod common;

use approx::assert_relative_eq;
use dice_roller::error::DiceError;
use dice_roller::math::Vector3;
use dice_roller::{ConvexShapeBuilder, DieType, Mesh};

#[test]
fn every_die_builds_a_valid_shape() {
    let expected_corners = [
        (DieType::D4, 4),
        (DieType::D6, 8),
        (DieType::D8, 6),
        (DieType::D10, 12),
        (DieType::D12, 20),
        (DieType::D20, 12),
    ];

    for (die, corners) in expected_corners {
        let shape = ConvexShapeBuilder::build(&common::die_mesh(die)).unwrap();

        assert_eq!(shape.vertex_count(), corners, "{}", die);
        assert_eq!(shape.contact_points().len(), corners, "{}", die);
        // a triangulated closed hull has at least 2V - 4 triangles
        assert!(shape.face_count() >= 2 * corners - 4, "{}: {} faces", die, shape.face_count());

        for face in shape.faces() {
            assert!(face.iter().all(|&i| (i as usize) < shape.vertex_count()), "{}", die);
        }
    }
}

#[test]
fn shapes_fit_the_unit_sphere() {
    for die in DieType::ALL {
        let shape = ConvexShapeBuilder::build(&common::die_mesh(die)).unwrap();
        let bounds = shape.local_bounds();

        for axis in 0..3 {
            assert!(bounds.max[axis] <= 1.0 + 1.0e-5, "{}", die);
            assert!(bounds.min[axis] >= -1.0 - 1.0e-5, "{}", die);
        }
    }
}

#[test]
fn triangle_soup_matches_the_indexed_mesh() {
    for die in DieType::ALL {
        let indexed = ConvexShapeBuilder::build(&common::die_mesh(die)).unwrap();
        let soup = ConvexShapeBuilder::build(&common::die_triangle_soup(die)).unwrap();

        assert_eq!(soup.face_count(), indexed.face_count(), "{}", die);
        // per-face copies are kept as vertices but merge for contacts
        assert_eq!(soup.vertex_count(), indexed.face_count() * 3, "{}", die);
        assert_eq!(soup.contact_points().len(), indexed.contact_points().len(), "{}", die);
    }
}

#[test]
fn strided_fallback_does_not_triangulate_point_clouds() {
    // 8 cube corners without indices only yield [0, 1, 2] and [3, 4, 5]
    let corners = common::die_vertices(DieType::D6);
    let shape = ConvexShapeBuilder::build(&Mesh::new(corners)).unwrap();

    assert_eq!(shape.faces(), &[[0, 1, 2], [3, 4, 5]]);
    assert_eq!(shape.contact_points().len(), 8);
}

#[test]
fn bad_meshes_are_rejected() {
    assert_eq!(ConvexShapeBuilder::build(&Mesh::default()).unwrap_err(), DiceError::EmptyMesh);
    assert_eq!(
        ConvexShapeBuilder::build(&Mesh::from_position_buffer(&[1.0, 2.0], None)).unwrap_err(),
        DiceError::EmptyMesh
    );

    let vertices = common::die_vertices(DieType::D4);
    let err = ConvexShapeBuilder::build(&Mesh::from_vertices_and_indices(vertices, vec![0, 1, 2, 3, 4, 0]))
        .unwrap_err();
    assert_eq!(
        err,
        DiceError::InvalidFaceIndex {
            face: 1,
            index: 4,
            vertex_count: 4
        }
    );
}

#[test]
fn packed_position_buffers_are_read_in_triples() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 9.0];
    let mesh = Mesh::from_position_buffer(&positions, Some(vec![0, 1, 2]));
    let shape = ConvexShapeBuilder::build(&mesh).unwrap();

    assert_eq!(shape.vertex_count(), 3);
    assert_eq!(shape.vertices()[2], Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn inertia_grows_with_the_square_of_scale() {
    let shape = ConvexShapeBuilder::build(&common::die_mesh(DieType::D6)).unwrap();

    let full = shape.inertia_tensor(0.5, Vector3::repeat(1.0));
    let half = shape.inertia_tensor(0.5, Vector3::repeat(0.5));

    for i in 0..3 {
        assert_relative_eq!(half[(i, i)], full[(i, i)] * 0.25, epsilon = 1.0e-6);
    }
}
