use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::submission::{FormState, SubmitRejected};
use crate::transport::{ContactTransport, DefaultTransport, TransportError};
use crate::validation::Field;

pub enum ContactFormMsg {
    Input(Field, String),
    Blur(Field),
    Submit,
    Sent(Result<(), TransportError>),
    DismissBanner(u32),
}

pub struct ContactForm {
    state: FormState,
    transport: Rc<DefaultTransport>,
}

/// Which field an event came from, and its current value. The rule set is
/// picked from the element's type the same way for inputs and textareas.
fn read_field(target: Option<EventTarget>) -> Option<(Field, String)> {
    let target = target?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some((Field::from_input_type(&input.type_()), input.value()));
    }
    target
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|area| (Field::from_input_type(&area.type_()), area.value()))
}

impl ContactForm {
    fn field_view(&self, ctx: &Context<Self>, field: Field) -> Html {
        let oninput = ctx
            .link()
            .batch_callback(|e: InputEvent| read_field(e.target()).map(|(f, v)| ContactFormMsg::Input(f, v)));
        let onblur = ctx
            .link()
            .batch_callback(|e: FocusEvent| read_field(e.target()).map(|(f, _)| ContactFormMsg::Blur(f)));

        let error = self.state.error(field);
        let class = classes!("form-input", error.is_some().then_some("error"));
        let id = format!("contact-{}", field.name());

        let control = match field {
            Field::Message => html! {
                <textarea {id} name={field.name()} rows="5" {class}
                    value={self.state.value(field).to_string()} {oninput} {onblur} />
            },
            Field::Name | Field::Email => html! {
                <input {id} name={field.name()} {class}
                    type={if field == Field::Email { "email" } else { "text" }}
                    value={self.state.value(field).to_string()} {oninput} {onblur} />
            },
        };

        html! {
            <div class="form-group">
                <label for={format!("contact-{}", field.name())}>{field.label()}</label>
                { control }
                {
                    if let Some(error) = error {
                        html! { <div class="field-error">{error.to_string()}</div> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: FormState::new(),
            transport: Rc::new(DefaultTransport::default()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Input(field, value) => {
                self.state.set_value(field, value);
                true
            }
            ContactFormMsg::Blur(field) => {
                self.state.blur(field);
                true
            }
            ContactFormMsg::Submit => {
                match self.state.begin_submit() {
                    Ok(payload) => {
                        let transport = self.transport.clone();
                        ctx.link().send_future(async move {
                            ContactFormMsg::Sent(transport.send(&payload).await)
                        });
                    }
                    Err(SubmitRejected::Invalid(errors)) => {
                        let fields: Vec<&str> = errors.iter().map(|e| e.field().name()).collect();
                        debug!(
                            "Contact form blocked by {} invalid field(s): {}",
                            self.state.error_count(),
                            fields.join(", ")
                        );
                    }
                    Err(SubmitRejected::InFlight) => {
                        debug!("Ignoring submit while the form is {:?}", self.state.phase());
                    }
                }
                true
            }
            ContactFormMsg::Sent(outcome) => {
                match &outcome {
                    Ok(()) => info!("Contact form sent"),
                    Err(e) => error!("Contact form submission failed: {}", e),
                }
                let expiry = self.state.finish_submit(outcome);
                let link = ctx.link().clone();
                Timeout::new(expiry.after_ms, move || {
                    link.send_message(ContactFormMsg::DismissBanner(expiry.id));
                })
                .forget();
                true
            }
            ContactFormMsg::DismissBanner(id) => self.state.dismiss_banner(id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });

        html! {
            <form id="contactForm" class="contact-form" novalidate={true} {onsubmit}>
                { for Field::ALL.into_iter().map(|field| self.field_view(ctx, field)) }
                <button type="submit" class="btn btn-primary" disabled={self.state.is_submitting()}>
                    {self.state.submit_label()}
                </button>
                { for self.state.banners().iter().map(|banner| html! {
                    <div key={banner.id} class={classes!("form-message", banner.kind.class())}>
                        {banner.text}
                    </div>
                }) }
            </form>
        }
    }
}
