use std::cell::Cell;

use super::*;

struct FakeView {
    scroll_height: i32,
    offset_height: i32,
    scroll_top: Cell<i32>,
}

impl ScrollView for FakeView {
    fn scroll_height(&self) -> i32 {
        self.scroll_height
    }

    fn offset_height(&self) -> i32 {
        self.offset_height
    }

    fn scroll_top(&self) -> i32 {
        self.scroll_top.get()
    }

    fn set_scroll_top(&self, value: i32) {
        self.scroll_top.set(value);
    }
}

fn view(scroll_height: i32, offset_height: i32, scroll_top: i32) -> FakeView {
    FakeView { scroll_height, offset_height, scroll_top: Cell::new(scroll_top) }
}

#[test]
fn bottom_detected_when_scroll_top_equals_max() {
    assert!(is_scrolled_to_bottom(&view(500, 200, 300), 0));
}

#[test]
fn scrolled_up_is_not_bottom() {
    assert!(!is_scrolled_to_bottom(&view(500, 200, 120), 0));
}

#[test]
fn tolerance_accepts_near_bottom() {
    assert!(is_scrolled_to_bottom(&view(500, 200, 298), 2));
    assert!(!is_scrolled_to_bottom(&view(500, 200, 297), 2));
}

#[test]
fn short_content_counts_as_bottom() {
    // Content shorter than the viewport cannot scroll.
    assert!(is_scrolled_to_bottom(&view(200, 200, 0), 0));
}

#[test]
fn scroll_to_bottom_uses_scroll_height() {
    let v = view(640, 200, 10);
    scroll_to_bottom(&v);
    assert_eq!(v.scroll_top(), 640);
}
