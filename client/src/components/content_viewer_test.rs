use super::*;

const PDF_A: &str = "https://storage/a.pdf";
const PDF_B: &str = "https://storage/b.pdf";

#[test]
fn unarmed_gate_swallows_loads() {
    let mut gate = FrameLoadGate::default();
    assert!(!gate.fire(PDF_A));
}

#[test]
fn first_load_for_armed_url_passes_once() {
    let mut gate = FrameLoadGate::default();
    gate.arm(PDF_A, true);
    assert!(gate.fire(PDF_A));
    // Reload or navigation inside the frame.
    assert!(!gate.fire(PDF_A));
    assert!(!gate.fire(PDF_A));
}

#[test]
fn arming_a_new_url_lets_one_more_load_through() {
    let mut gate = FrameLoadGate::default();
    gate.arm(PDF_A, true);
    assert!(gate.fire(PDF_A));
    gate.arm(PDF_B, true);
    assert!(gate.fire(PDF_B));
    assert!(!gate.fire(PDF_B));
}

#[test]
fn late_load_for_previous_url_is_ignored() {
    let mut gate = FrameLoadGate::default();
    gate.arm(PDF_A, true);
    gate.arm(PDF_B, true);
    assert!(!gate.fire(PDF_A));
    assert!(gate.fire(PDF_B));
}

#[test]
fn link_mode_never_arms() {
    let mut gate = FrameLoadGate::default();
    gate.arm("https://example.com/article", false);
    assert!(!gate.fire("https://example.com/article"));
}

#[test]
fn empty_url_never_arms() {
    let mut gate = FrameLoadGate::default();
    gate.arm("", true);
    assert!(!gate.fire(""));
}

#[test]
fn switching_back_from_link_mode_rearms_same_url() {
    let mut gate = FrameLoadGate::default();
    gate.arm(PDF_A, true);
    assert!(gate.fire(PDF_A));
    gate.arm("https://example.com/b", false);
    gate.arm(PDF_A, true);
    assert!(gate.fire(PDF_A));
}
