use std::rc::Rc;

use log::{info, Level};
use web_sys::{window, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

mod animations;
mod config;
mod motion;
mod scroll_spy;
mod submission;
mod transport;
mod validation;
mod components {
    pub mod contact_form;
    pub mod nav;
}
mod pages {
    pub mod landing;
}

use animations::Animations;
use components::nav::{Nav, NavLink};
use pages::landing::Landing;

fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink { section: "home", label: "Home" },
        NavLink { section: "features", label: "Features" },
        NavLink { section: "about", label: "About" },
        NavLink { section: "contact", label: "Contact" },
    ]
}

/// Smoothly brings a section to the top of the viewport. Unknown ids are ignored.
fn scroll_to_section(section_id: &str) {
    let Some(section) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(section_id))
    else {
        info!("No section with id {}", section_id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

fn scroll_callback(section_id: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |_: MouseEvent| scroll_to_section(section_id))
}

#[function_component]
fn App() -> Html {
    let links = use_memo(|_| nav_links(), ());

    // Animations need the whole page in the DOM, so they start after the first render.
    use_effect_with_deps(
        move |_| {
            let mut animations = Animations::new();
            animations.init();
            info!("MIO web app initialized");
            move || drop(animations)
        },
        (),
    );

    let on_navigate = Callback::from(|section_id: String| scroll_to_section(&section_id));

    html! {
        <>
            <Nav links={Rc::clone(&links)} {on_navigate} />
            <Landing
                on_get_started={scroll_callback("features")}
                on_learn_more={scroll_callback("about")}
                on_back_to_top={scroll_callback("home")}
            />
        </>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
