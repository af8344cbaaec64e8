use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::scroll_spy::{is_scrolled, link_href, next_active, target_id, SectionBounds};

/// Open/closed state of the mobile menu. The toggle and the menu container
/// always render from the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    fn active_class(self) -> Option<&'static str> {
        self.is_open().then_some("active")
    }
}

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub section: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub links: Rc<Vec<NavLink>>,
    /// Receives the section id of a clicked link.
    pub on_navigate: Callback<String>,
}

fn section_bounds(document: &Document) -> Vec<SectionBounds> {
    let Ok(nodes) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| {
            SectionBounds::new(
                section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect()
}

/// Section id behind the in-page anchor that was clicked.
fn clicked_section(e: &MouseEvent) -> Option<String> {
    let anchor = e
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("a[href]").ok().flatten())?;
    let href = anchor.get_attribute("href")?;
    target_id(&href).map(str::to_string)
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu = use_state_eq(MenuState::default);
    let is_header_scrolled = use_state_eq(|| false);
    let active = use_state_eq(|| None::<String>);
    let last_active = use_mut_ref(|| None::<String>);

    // Scroll-spy
    {
        let active = active.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = window.clone().map(|window| {
                    let scroll_window = window.clone();
                    let callback = Closure::wrap(Box::new(move || {
                        let Some(document) = scroll_window.document() else {
                            return;
                        };
                        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
                        let sections = section_bounds(&document);
                        let next = next_active(last_active.borrow().as_deref(), &sections, scroll_y);
                        *last_active.borrow_mut() = next.clone();
                        active.set(next);
                    }) as Box<dyn FnMut()>);
                    let _ = window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                    callback
                });

                move || {
                    if let (Some(window), Some(callback)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    // Header background once the page has moved
    {
        let is_header_scrolled = is_header_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = window.clone().map(|window| {
                    let scroll_window = window.clone();
                    let callback = Closure::wrap(Box::new(move || {
                        is_header_scrolled.set(is_scrolled(scroll_window.scroll_y().unwrap_or(0.0)));
                    }) as Box<dyn FnMut()>);
                    let _ = window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                    callback
                });

                move || {
                    if let (Some(window), Some(callback)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            menu.set(menu.toggled());
        })
    };

    let follow_logo = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(section) = clicked_section(&e) {
                on_navigate.emit(section);
            }
        })
    };

    let follow_link = {
        let menu = menu.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if menu.is_open() {
                menu.set(menu.closed());
            }
            if let Some(section) = clicked_section(&e) {
                on_navigate.emit(section);
            }
        })
    };

    html! {
        <header class={classes!("header", (*is_header_scrolled).then_some("scrolled"))}>
            <nav class="nav">
                <a class="nav-logo" href={link_href("home")} onclick={follow_logo}>{"MIO"}</a>
                <ul class={classes!("nav-menu", menu.active_class())}>
                    { for props.links.iter().map(|link| {
                        let is_active = active.as_deref() == Some(link.section);
                        html! {
                            <li class="nav-item">
                                <a href={link_href(link.section)}
                                   class={classes!("nav-link", is_active.then_some("active"))}
                                   onclick={follow_link.clone()}>
                                    {link.label}
                                </a>
                            </li>
                        }
                    }) }
                </ul>
                <div id="navToggle" class={classes!("nav-toggle", menu.active_class())} onclick={toggle_menu}>
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </div>
            </nav>
        </header>
    }
}
