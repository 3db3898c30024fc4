//! Snapshot helpers for render-frame regression tests.

use crate::render::RenderFrame;

/// Assert a stable text snapshot for a render frame.
///
/// `expected` may include a trailing newline; it is trimmed before comparing.
pub fn assert_render_frame_snapshot(label: &str, frame: &RenderFrame, expected: &str) {
    let expected = expected.trim_end_matches('\n');
    let got = frame.snapshot();
    assert_eq!(
        got, expected,
        "render frame snapshot mismatch ({label})\n--- expected\n{expected}\n--- got\n{got}",
    );
}

/// Assert that row `y` of the frame contains `needle`.
pub fn assert_row_contains(label: &str, frame: &RenderFrame, y: usize, needle: &str) {
    let row = frame.row_text(y);
    assert!(
        row.contains(needle),
        "row {y} missing {needle:?} ({label})\n--- row\n{row}\n--- frame\n{}",
        frame.snapshot()
    );
}
