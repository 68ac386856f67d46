use linechart_rs::core::nearest_index;

const XS: [f64; 4] = [0.0, 10.0, 20.0, 30.0];

#[test]
fn picks_the_closer_neighbour() {
    assert_eq!(nearest_index(&XS, 7.0), Some(1));
    assert_eq!(nearest_index(&XS, 24.0), Some(2));
    assert_eq!(nearest_index(&XS, 26.0), Some(3));
}

#[test]
fn exact_match_returns_its_index() {
    assert_eq!(nearest_index(&XS, 20.0), Some(2));
    assert_eq!(nearest_index(&XS, 0.0), Some(0));
}

#[test]
fn queries_outside_the_sequence_clamp() {
    assert_eq!(nearest_index(&XS, -5.0), Some(0));
    assert_eq!(nearest_index(&XS, 35.0), Some(3));
}

#[test]
fn ties_resolve_to_the_lower_index() {
    assert_eq!(nearest_index(&XS, 5.0), Some(0));
    assert_eq!(nearest_index(&XS, 25.0), Some(2));
}

#[test]
fn duplicate_positions_are_supported() {
    let xs = [0.0, 10.0, 10.0, 20.0];
    let index = nearest_index(&xs, 11.0).expect("index");
    assert_eq!(xs[index], 10.0);
}
