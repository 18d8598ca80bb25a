use sortarm::commands::routine_for_label;
use std::time::Duration;

#[test]
fn cap_routine_swings_to_angle_70() {
    let routine = routine_for_label(0).expect("label 0 should be mapped");

    let lines: Vec<&str> = routine.iter().map(|step| step.line.as_str()).collect();
    assert_eq!(
        lines,
        ["A0", "C105", "D55", "B150", "C140", "D0", "A70", "B90", "A90"]
    );
}

#[test]
fn paper_routine_swings_to_angle_110() {
    let routine = routine_for_label(2).expect("label 2 should be mapped");

    assert_eq!(routine.len(), 9);
    assert_eq!(routine[6].line, "A110");
}

#[test]
fn only_the_release_step_gets_the_long_pause() {
    let routine = routine_for_label(0).expect("label 0 should be mapped");

    for step in &routine {
        let expected = if step.line == "B90" {
            Duration::from_secs(2)
        } else {
            Duration::from_millis(500)
        };
        assert_eq!(step.pause, expected, "pause after {}", step.line);
    }
}

#[test]
fn unmapped_labels_produce_no_motion() {
    assert!(routine_for_label(1).is_none());
    assert!(routine_for_label(3).is_none());
    assert!(routine_for_label(99).is_none());
}

#[test]
fn the_two_routines_differ_only_in_the_target_step() {
    let cap = routine_for_label(0).expect("label 0 should be mapped");
    let paper = routine_for_label(2).expect("label 2 should be mapped");

    assert_eq!(cap.len(), paper.len());
    for (i, (a, b)) in cap.iter().zip(paper.iter()).enumerate() {
        if i == 6 {
            assert_ne!(a.line, b.line);
        } else {
            assert_eq!(a, b);
        }
    }
}
