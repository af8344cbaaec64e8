use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
};

use crate::motion::{
    fade_progress, parallax_transform, Counter, RevealSet, Ripple, COUNTER_TICK_MS,
    REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD, RIPPLE_MS,
};

const REVEAL_KEY_ATTR: &str = "data-reveal-key";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// A DOM listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Option<Self> {
        match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self { target: target.clone(), event, callback }),
            Err(e) => {
                warn!("Could not attach {} listener: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Reveal-on-scroll, button ripples, card hover and hero parallax for the
/// page. Everything is torn down when this is dropped.
#[derive(Default)]
pub struct Animations {
    observer: Option<IntersectionObserver>,
    _on_intersect: Option<ObserverCallback>,
    revealed: Rc<RefCell<RevealSet>>,
    listeners: Vec<Listener>,
}

impl Animations {
    pub fn new() -> Self {
        let mut animations = Self::default();
        animations.init_intersection_observer();
        animations
    }

    pub fn init(&mut self) {
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };
        self.setup_scroll_animations(&document);
        self.setup_hover_effects(&document);
        self.setup_parallax_effect(&document);
    }

    fn init_intersection_observer(&mut self) {
        let revealed = self.revealed.clone();
        let on_intersect: ObserverCallback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let key = target
                        .get_attribute(REVEAL_KEY_ATTR)
                        .and_then(|k| k.parse::<u32>().ok());
                    if let Some(key) = key {
                        if revealed.borrow_mut().mark(key) {
                            let _ = target.class_list().add_1("animate-in");
                        }
                    }
                    observer.unobserve(&target);
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                self.observer = Some(observer);
                self._on_intersect = Some(on_intersect);
            }
            Err(e) => warn!("IntersectionObserver unavailable, reveal animations disabled: {:?}", e),
        }
    }

    fn setup_scroll_animations(&mut self, document: &Document) {
        let Some(observer) = &self.observer else {
            return;
        };
        for (key, element) in query_all(document, REVEAL_SELECTOR).into_iter().enumerate() {
            let _ = element.class_list().add_1("animate-on-scroll");
            let _ = element.set_attribute(REVEAL_KEY_ATTR, &key.to_string());
            observer.observe(&element);
        }
    }

    fn setup_hover_effects(&mut self, document: &Document) {
        for button in query_all(document, ".btn") {
            let ripple = Closure::wrap(Box::new(|event: Event| {
                if let Ok(event) = event.dyn_into::<MouseEvent>() {
                    create_ripple_effect(&event);
                }
            }) as Box<dyn FnMut(Event)>);
            self.listeners.extend(Listener::attach(&button, "mouseenter", ripple));
        }

        for card in query_all(document, ".feature-card") {
            let entered = card.clone();
            let on_enter = Closure::wrap(Box::new(move |_: Event| {
                let _ = entered.class_list().add_1("hover");
            }) as Box<dyn FnMut(Event)>);
            let left = card.clone();
            let on_leave = Closure::wrap(Box::new(move |_: Event| {
                let _ = left.class_list().remove_1("hover");
            }) as Box<dyn FnMut(Event)>);

            self.listeners.extend(Listener::attach(&card, "mouseenter", on_enter));
            self.listeners.extend(Listener::attach(&card, "mouseleave", on_leave));
        }
    }

    fn setup_parallax_effect(&mut self, document: &Document) {
        let hero = document.query_selector(".hero").ok().flatten();
        let image = document
            .query_selector(".hero-image")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let (Some(_), Some(image), Some(window)) = (hero, image, window()) else {
            return;
        };

        let scroll_source = window.clone();
        let on_scroll = Closure::wrap(Box::new(move |_: Event| {
            let scrolled = scroll_source.page_y_offset().unwrap_or(0.0);
            let _ = image.style().set_property("transform", &parallax_transform(scrolled));
        }) as Box<dyn FnMut(Event)>);
        self.listeners.extend(Listener::attach(&window, "scroll", on_scroll));
    }
}

impl Drop for Animations {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        debug!("Animations torn down, {} elements revealed", self.revealed.borrow().len());
    }
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn create_ripple_effect(event: &MouseEvent) {
    let Some(button) = event
        .current_target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(ripple) = document
        .create_element("span")
        .and_then(|e| e.dyn_into::<HtmlElement>().map_err(JsValue::from))
    else {
        return;
    };

    let rect = button.get_bounding_client_rect();
    let geometry = Ripple::at(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    let style = ripple.style();
    let size = format!("{}px", geometry.size);
    let _ = style.set_property("width", &size);
    let _ = style.set_property("height", &size);
    let _ = style.set_property("left", &format!("{}px", geometry.left));
    let _ = style.set_property("top", &format!("{}px", geometry.top));
    let _ = ripple.class_list().add_1("ripple");

    if button.append_child(&ripple).is_ok() {
        Timeout::new(RIPPLE_MS, move || ripple.remove()).forget();
    }
}

/// Counts the element's text up from 0 to `target` over `duration_ms`.
pub fn animate_counter(element: &Element, target: f64, duration_ms: u32) {
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let finished = handle.clone();
    let element = element.clone();
    let mut counter = Counter::new(target, duration_ms);

    let interval = Interval::new(COUNTER_TICK_MS, move || {
        let (text, done) = counter.tick();
        element.set_text_content(Some(&text));
        if done {
            // Dropping the interval clears it.
            drop(finished.borrow_mut().take());
        }
    });
    *handle.borrow_mut() = Some(interval);
}

pub fn fade_in(element: &HtmlElement, duration_ms: f64) {
    let style = element.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("display", "block");
    run_fade(element.clone(), duration_ms, |progress| progress);
}

pub fn fade_out(element: &HtmlElement, duration_ms: f64) {
    run_fade(element.clone(), duration_ms, |progress| 1.0 - progress);
}

/// Drives `opacity` from `performance.now()` on animation frames until the
/// duration has elapsed. A finished fade-out also hides the element.
fn run_fade(element: HtmlElement, duration_ms: f64, opacity: fn(f64) -> f64) {
    let Some(window) = window() else {
        return;
    };
    let Some(start) = window.performance().map(|p| p.now()) else {
        return;
    };
    let fading_out = opacity(1.0) < opacity(0.0);

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let frame_window = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let progress = fade_progress(now - start, duration_ms);
        let style = element.style();
        let _ = style.set_property("opacity", &opacity(progress).to_string());

        if progress < 1.0 {
            if let Some(callback) = next.borrow().as_ref() {
                let _ = frame_window.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        } else {
            if fading_out {
                let _ = style.set_property("display", "none");
            }
            // Break the Rc cycle so the closure is freed after this frame.
            next.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}
