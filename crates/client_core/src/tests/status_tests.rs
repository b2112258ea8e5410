use super::*;

use crate::surface::MemorySurface;

fn board_over(surface: &Arc<MemorySurface>) -> StatusBoard {
    StatusBoard::new(surface.clone())
}

fn visible_text(surface: &MemorySurface) -> Option<String> {
    surface
        .status()
        .filter(|status| status.visible)
        .map(|status| status.text)
}

#[tokio::test(start_paused = true)]
async fn status_hides_after_display_window() {
    let surface = Arc::new(MemorySurface::new());
    let board = board_over(&surface);

    let ticket = board.issue_ticket();
    assert!(board.publish(ticket, "Signed up", StatusKind::Success));
    assert_eq!(
        surface.status(),
        Some(StatusMessage {
            text: "Signed up".to_string(),
            kind: StatusKind::Success,
            visible: true,
        })
    );

    tokio::time::sleep(STATUS_DISPLAY_WINDOW - Duration::from_millis(1)).await;
    assert_eq!(visible_text(&surface).as_deref(), Some("Signed up"));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(visible_text(&surface), None);
    assert_eq!(
        surface.status().map(|status| status.kind),
        Some(StatusKind::Success)
    );
}

#[tokio::test(start_paused = true)]
async fn superseding_status_gets_a_full_window() {
    let surface = Arc::new(MemorySurface::new());
    let board = board_over(&surface);

    board.publish(board.issue_ticket(), "first", StatusKind::Success);
    tokio::time::sleep(Duration::from_secs(4)).await;
    board.publish(board.issue_ticket(), "second", StatusKind::Error);

    // The first timer fires here but no longer owns the status line.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(visible_text(&surface).as_deref(), Some("second"));

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(visible_text(&surface), None);
}

#[tokio::test(start_paused = true)]
async fn results_from_superseded_commands_are_dropped() {
    let surface = Arc::new(MemorySurface::new());
    let board = board_over(&surface);

    let older = board.issue_ticket();
    let newer = board.issue_ticket();
    assert!(older < newer);

    assert!(board.publish(newer, "Activity is full", StatusKind::Error));
    assert!(!board.publish(older, "Signed up", StatusKind::Success));
    assert_eq!(visible_text(&surface).as_deref(), Some("Activity is full"));
}

#[tokio::test(start_paused = true)]
async fn custom_display_window_is_honoured() {
    let surface = Arc::new(MemorySurface::new());
    let board = StatusBoard::with_display_window(surface.clone(), Duration::from_secs(1));
    assert_eq!(board.display_window(), Duration::from_secs(1));

    board.publish(board.issue_ticket(), "short", StatusKind::Success);
    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(visible_text(&surface), None);
}
