//! DOM seams for the chat room: scroll measurement and input focus.
//!
//! The controller only sees `ScrollView` and `Focusable`. Leptos node refs
//! implement both; they talk to the real element under `hydrate` and are
//! inert during server rendering, where no DOM exists.

use leptos::html::{Div, Input};
use leptos::prelude::NodeRef;

#[cfg(feature = "hydrate")]
use leptos::prelude::GetUntracked;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// A scrollable element, measured in CSS pixels.
pub trait ScrollView {
    fn scroll_height(&self) -> i32;
    fn offset_height(&self) -> i32;
    fn scroll_top(&self) -> i32;
    fn set_scroll_top(&self, value: i32);
}

/// An element that can take keyboard focus.
pub trait Focusable {
    fn focus(&self);
}

/// Whether `view` is scrolled to its bottom, within `tolerance` pixels.
pub fn is_scrolled_to_bottom(view: &dyn ScrollView, tolerance: i32) -> bool {
    let max = view.scroll_height() - view.offset_height();
    let current = view.scroll_top();
    (max - current).abs() <= tolerance
}

pub fn scroll_to_bottom(view: &dyn ScrollView) {
    view.set_scroll_top(view.scroll_height());
}

impl ScrollView for NodeRef<Div> {
    fn scroll_height(&self) -> i32 {
        #[cfg(feature = "hydrate")]
        {
            self.get_untracked().map_or(0, |el| el.scroll_height())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            0
        }
    }

    fn offset_height(&self) -> i32 {
        #[cfg(feature = "hydrate")]
        {
            self.get_untracked().map_or(0, |el| el.offset_height())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            0
        }
    }

    fn scroll_top(&self) -> i32 {
        #[cfg(feature = "hydrate")]
        {
            self.get_untracked().map_or(0, |el| el.scroll_top())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            0
        }
    }

    fn set_scroll_top(&self, value: i32) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = self.get_untracked() {
                el.set_scroll_top(value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = value;
        }
    }
}

impl Focusable for NodeRef<Input> {
    fn focus(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = self.get_untracked() {
                if let Err(e) = el.focus() {
                    log::debug!("input focus failed: {e:?}");
                }
            }
        }
    }
}
