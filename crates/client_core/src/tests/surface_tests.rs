use super::*;

#[test]
fn snapshot_uses_page_element_ids_and_escapes_options() {
    let surface = MemorySurface::new();
    surface.set_content("<div class=\"activity-card\"></div>".to_string());
    surface.set_options(vec![SelectOption {
        value: "Tom & Jerry".to_string(),
        label: "Tom & Jerry".to_string(),
    }]);
    surface.show("Signed up", StatusKind::Success);

    let html = surface.snapshot_html().expect("snapshot");
    assert!(html.contains(r#"<div id="activities-list"><div class="activity-card"></div></div>"#));
    assert!(html.contains(r#"<select id="activity">"#));
    assert!(html.contains(r#"<option value="Tom &amp; Jerry">Tom &amp; Jerry</option>"#));
    assert!(html.contains(r#"<div id="message" class="success">Signed up</div>"#));
}

#[test]
fn hidden_status_keeps_text_but_marks_hidden() {
    let surface = MemorySurface::new();
    surface.show("Activity is full", StatusKind::Error);
    surface.hide();

    let status = surface.status().expect("status");
    assert!(!status.visible);
    assert_eq!(status.kind, StatusKind::Error);

    let html = surface.snapshot_html().expect("snapshot");
    assert!(html.contains(r#"<div id="message" class="hidden">Activity is full</div>"#));
}

#[test]
fn reset_clears_email_and_counts() {
    let surface = MemorySurface::new();
    surface.set_email_input("new@student.edu");
    surface.reset();

    let state = surface.state();
    assert!(state.email_input.is_empty());
    assert_eq!(state.form_resets, 1);
}

#[test]
fn hide_without_status_is_a_no_op() {
    let surface = MemorySurface::new();
    surface.hide();
    assert_eq!(surface.status(), None);
}
