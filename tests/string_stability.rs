use modeller_dsp::string::{sample_displacements, UniformString};

const PLUCK: f64 = 1e-3;

fn five_segment_string() -> UniformString {
    UniformString::new(5, 0.5, 0.001, 1000.0, 100.0).unwrap()
}

fn assert_nodes_at_rest(string: &UniformString) {
    let last = string.segment_count() - 1;
    for index in [0, last] {
        assert_eq!(string.displacement(index), Some(0.0));
        assert_eq!(string.velocity(index), Some(0.0));
        assert_eq!(string.segments()[index].acceleration(), 0.0);
    }
}

#[test]
fn nodes_stay_clamped_for_every_step() {
    let mut string = five_segment_string();
    string.set_displacement(2, PLUCK).unwrap();

    for _ in 0..10_000 {
        string.advance_to_next_iteration(1e-5);
        assert_nodes_at_rest(&string);
    }
}

#[test]
fn nodes_stay_clamped_when_unstable() {
    let mut string = five_segment_string();
    string.pluck(0.3, PLUCK).unwrap();

    for _ in 0..200 {
        string.advance_to_next_iteration(1.0);
        assert_nodes_at_rest(&string);
    }
}

#[test]
fn rest_is_a_fixed_point() {
    for dt in [1e-7, 1e-5, 1e-3, 1.0, 100.0] {
        let mut string = five_segment_string();
        string.advance_to_next_iteration(dt);

        for i in 0..string.segment_count() {
            assert_eq!(string.displacement(i), Some(0.0), "dt = {dt}");
            assert_eq!(string.velocity(i), Some(0.0), "dt = {dt}");
        }
    }
}

#[test]
fn small_time_step_stays_bounded() {
    let mut string = five_segment_string();
    string.set_displacement(2, PLUCK).unwrap();

    for step in 0..10_000 {
        string.advance_to_next_iteration(1e-5);
        let max = string.max_displacement();
        assert!(
            max.is_finite() && max < 10.0 * PLUCK,
            "displacement {max} out of bounds at step {step}"
        );
    }
}

#[test]
fn large_time_step_diverges() {
    let mut string = five_segment_string();
    string.set_displacement(2, PLUCK).unwrap();

    let diverged = (0..100).any(|_| {
        string.advance_to_next_iteration(1.0);
        sample_displacements(&string)
            .iter()
            .any(|d| !d.is_finite() || d.abs() > 10.0 * PLUCK)
    });
    assert!(diverged, "dt = 1 should blow up within 100 steps");
}

#[test]
fn plucked_string_swings_through_rest() {
    let mut string = five_segment_string();
    string.set_displacement(2, PLUCK).unwrap();

    let mut went_negative = false;
    for _ in 0..10_000 {
        string.advance_to_next_iteration(1e-5);
        if string.displacement(2).unwrap() < 0.0 {
            went_negative = true;
            break;
        }
    }
    assert!(went_negative, "middle segment never crossed the rest line");
    assert!(string.kinetic_energy() > 0.0);
}

#[test]
fn sampling_between_steps_is_idempotent() {
    let mut string = five_segment_string();
    string.pluck(0.5, PLUCK).unwrap();

    for _ in 0..50 {
        string.advance_to_next_iteration(1e-5);
        let a = sample_displacements(&string);
        let b = sample_displacements(&string);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }
}

#[test]
fn stable_time_step_guides_choice_of_dt() {
    let mut string = UniformString::new(32, 0.65, 0.001, 1000.0, 110.0).unwrap();
    string.pluck(0.2, PLUCK).unwrap();
    let dt = 0.01 * string.stable_time_step();

    for _ in 0..5_000 {
        string.advance_to_next_iteration(dt);
    }
    assert!(string.max_displacement() < 10.0 * PLUCK);
}
