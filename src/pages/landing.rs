use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::animations::{animate_counter, fade_in, fade_out};
use crate::components::contact_form::ContactForm;
use crate::motion::{DEFAULT_COUNTER_MS, DEFAULT_FADE_MS};

/// Scroll distance after which the back-to-top button shows.
const BACK_TO_TOP_AFTER: f64 = 600.0;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub on_get_started: Callback<MouseEvent>,
    pub on_learn_more: Callback<MouseEvent>,
    pub on_back_to_top: Callback<MouseEvent>,
}

struct Feature {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "⚡",
        title: "Fast",
        body: "Pages load in a blink and stay responsive while you scroll.",
    },
    Feature {
        icon: "🔒",
        title: "Private",
        body: "Nothing you type leaves your browser until you press send.",
    },
    Feature {
        icon: "📱",
        title: "Everywhere",
        body: "The same experience on your phone, tablet and desktop.",
    },
];

const STATS: [(&str, u32); 3] = [("Happy users", 1200), ("Countries", 18), ("Releases", 42)];

fn start_counters() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(nodes) = document.query_selector_all(".stat-number[data-target]") else {
        return;
    };
    for element in (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
    {
        if let Some(target) = element
            .get_attribute("data-target")
            .and_then(|t| t.parse::<f64>().ok())
        {
            animate_counter(&element, target, DEFAULT_COUNTER_MS);
        }
    }
}

#[derive(Properties, PartialEq)]
struct BackToTopProps {
    onclick: Callback<MouseEvent>,
}

#[function_component(BackToTop)]
fn back_to_top(props: &BackToTopProps) -> Html {
    let button = use_node_ref();
    let shown = use_mut_ref(|| false);

    {
        let button = button.clone();
        use_event_with_window("scroll", move |_: Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let want = window.scroll_y().unwrap_or(0.0) > BACK_TO_TOP_AFTER;
            if want == *shown.borrow() {
                return;
            }
            if let Some(element) = button.cast::<HtmlElement>() {
                *shown.borrow_mut() = want;
                if want {
                    fade_in(&element, DEFAULT_FADE_MS);
                } else {
                    fade_out(&element, DEFAULT_FADE_MS);
                }
            }
        });
    }

    html! {
        <button ref={button} class="back-to-top" style="display: none;" onclick={props.onclick.clone()}
            aria-label="Back to top">
            {"↑"}
        </button>
    }
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    use_effect_with_deps(
        move |_| {
            start_counters();
            || ()
        },
        (),
    );

    html! {
        <main class="landing-page">
            <style>
                {r#"
                    .animate-on-scroll {
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
                    }
                    .animate-on-scroll.animate-in {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .btn {
                        position: relative;
                        overflow: hidden;
                    }
                    .ripple {
                        position: absolute;
                        border-radius: 50%;
                        background: rgba(255, 255, 255, 0.35);
                        transform: scale(0);
                        animation: ripple 0.6s linear;
                        pointer-events: none;
                    }
                    @keyframes ripple {
                        to { transform: scale(4); opacity: 0; }
                    }
                    .feature-card {
                        transition: transform 0.3s ease, box-shadow 0.3s ease;
                    }
                    .feature-card.hover {
                        transform: translateY(-6px);
                        box-shadow: 0 12px 24px rgba(0, 0, 0, 0.15);
                    }
                    .header.scrolled {
                        background: rgba(255, 255, 255, 0.95);
                        box-shadow: 0 2px 12px rgba(0, 0, 0, 0.08);
                    }
                    .nav-link.active {
                        color: #1E90FF;
                    }
                    @media (max-width: 768px) {
                        .nav-menu { display: none; }
                        .nav-menu.active { display: flex; flex-direction: column; }
                        .nav-toggle.active .bar:nth-child(2) { opacity: 0; }
                    }
                    .form-input.error {
                        border-color: #e53e3e;
                    }
                    .field-error {
                        color: #e53e3e;
                        font-size: 0.85rem;
                        margin-top: 0.25rem;
                    }
                    .form-message {
                        margin-top: 1rem;
                        padding: 0.75rem 1rem;
                        border-radius: 8px;
                    }
                    .form-message.success {
                        background: #e6fffa;
                        color: #22543d;
                    }
                    .form-message.error {
                        background: #fff5f5;
                        color: #742a2a;
                    }
                    .back-to-top {
                        position: fixed;
                        right: 1.5rem;
                        bottom: 1.5rem;
                        opacity: 0;
                    }
                "#}
            </style>

            <section id="home" class="hero">
                <div class="hero-content">
                    <h1 class="hero-title">{"Meet MIO"}</h1>
                    <p class="hero-subtitle">
                        {"A small, friendly web app that gets out of your way."}
                    </p>
                    <div class="hero-buttons">
                        <button id="getStartedBtn" class="btn btn-primary" onclick={props.on_get_started.clone()}>
                            {"Get Started"}
                        </button>
                        <button id="learnMoreBtn" class="btn btn-secondary" onclick={props.on_learn_more.clone()}>
                            {"Learn More"}
                        </button>
                    </div>
                </div>
                <div class="hero-image">
                    <img src="/assets/hero.png" alt="MIO on a phone and a laptop" loading="lazy" />
                </div>
            </section>

            <section id="features" class="features">
                <h2 class="section-title">{"Features"}</h2>
                <div class="features-grid">
                    { for FEATURES.iter().map(|feature| html! {
                        <div class="feature-card">
                            <div class="feature-icon">{feature.icon}</div>
                            <h3>{feature.title}</h3>
                            <p>{feature.body}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="about" class="about">
                <div class="about-content">
                    <h2 class="section-title">{"About"}</h2>
                    <p>
                        {"MIO started as a weekend project and grew into a tool people use every day. "}
                        {"We keep it simple on purpose."}
                    </p>
                    <div class="stats">
                        { for STATS.iter().map(|(label, target)| html! {
                            <div class="stat">
                                <span class="stat-number" data-target={target.to_string()}>{"0"}</span>
                                <span class="stat-label">{*label}</span>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section id="contact" class="contact">
                <h2 class="section-title">{"Contact"}</h2>
                <ContactForm />
            </section>

            <BackToTop onclick={props.on_back_to_top.clone()} />
        </main>
    }
}
