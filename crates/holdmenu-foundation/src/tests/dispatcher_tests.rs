use super::*;
use crate::input::types::PointerEventKind;
use holdmenu_ui_graphics::Point;

#[test]
fn drains_in_arrival_order_and_empties() {
    let mut dispatcher = PointerDispatcher::new();
    let at = Point::new(1.0, 2.0);
    dispatcher.push(PointerEvent::down(at, 10));
    dispatcher.push(PointerEvent::moved(at, 20));
    dispatcher.push(PointerEvent::up(at, 30));
    assert!(!dispatcher.is_empty());

    let mut seen = Vec::new();
    dispatcher.drain(|event| seen.push((event.kind, event.uptime_nanos)));

    assert_eq!(
        seen,
        vec![
            (PointerEventKind::Down, 10),
            (PointerEventKind::Move, 20),
            (PointerEventKind::Up, 30),
        ]
    );
    assert!(dispatcher.is_empty());
}
