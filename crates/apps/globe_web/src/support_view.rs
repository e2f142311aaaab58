//! DOM side of the support desk: modal visibility, the submit button and
//! the response dialog all mirror [`SupportDesk`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use support::{
    Delay, ModalKind, SimulatedTransport, SubmitOutcome, SupportConfig, SupportDesk,
    SupportRequest, run_submission,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, Node};

use crate::dom;
use crate::error::ViewerError;

/// Real browser timer for the simulated transport.
#[derive(Debug, Clone, Copy)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn delay(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

type PageTransport = SimulatedTransport<TimerDelay>;

#[derive(Clone)]
struct Elements {
    support_modal: HtmlElement,
    response_modal: HtmlElement,
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    submit_text: Option<HtmlElement>,
    submit_loading: Option<HtmlElement>,
    response_time: Option<HtmlElement>,
    ticket_number: Option<HtmlElement>,
}

impl Elements {
    fn find(document: &Document) -> Result<Self, ViewerError> {
        let form: HtmlFormElement = dom::require(document, "supportForm")?;
        let submit: Option<HtmlButtonElement> = dom::query(&form, ".submit-btn");
        let (submit_text, submit_loading) = match &submit {
            Some(button) => (
                dom::query(button, ".btn-text"),
                dom::query(button, ".btn-loading"),
            ),
            None => {
                log::warn!("support form has no .submit-btn");
                (None, None)
            }
        };
        Ok(Self {
            support_modal: dom::require(document, "supportModal")?,
            response_modal: dom::require(document, "responseModal")?,
            form,
            submit,
            submit_text,
            submit_loading,
            response_time: dom::optional(document, "responseTime"),
            ticket_number: dom::optional(document, "ticketNumber"),
        })
    }
}

struct SupportView {
    _listeners: Vec<EventListener>,
}

thread_local! {
    static SUPPORT: RefCell<Option<SupportView>> = const { RefCell::new(None) };
}

/// Formats a timestamp for the response dialog in `locale`.
pub fn format_timestamp(ms: u64, locale: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms as f64));
        String::from(date.to_locale_string(locale, &wasm_bindgen::JsValue::UNDEFINED))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = locale;
        foundation::format_utc(ms).unwrap_or_else(|| ms.to_string())
    }
}

fn render(desk: &SupportDesk, els: &Elements) {
    let shown = |open: bool| if open { "flex" } else { "none" };
    dom::set_display(&els.support_modal, shown(desk.is_open(ModalKind::Support)));
    dom::set_display(&els.response_modal, shown(desk.is_open(ModalKind::Response)));

    let idle = desk.is_submit_enabled();
    if let Some(button) = &els.submit {
        button.set_disabled(!idle);
    }
    if let Some(text) = &els.submit_text {
        dom::set_display(text, if idle { "inline" } else { "none" });
    }
    if let Some(loading) = &els.submit_loading {
        dom::set_display(loading, if idle { "none" } else { "inline" });
    }

    if let Some(ticket) = desk.last_ticket() {
        if let Some(el) = &els.ticket_number {
            el.set_text_content(Some(&ticket.id));
        }
        if let Some(el) = &els.response_time {
            let when = format_timestamp(ticket.issued_at_ms, &desk.config().locale);
            el.set_text_content(Some(&when));
        }
    }
}

fn read_request(form: &HtmlFormElement) -> Result<SupportRequest, ViewerError> {
    let data = FormData::new_with_form(form)?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();
    Ok(SupportRequest {
        user_name: field("userName"),
        user_email: field("userEmail"),
        subject: field("subject"),
        message: field("message"),
    })
}

fn is_target(event: &Event, el: &HtmlElement) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Node>().ok())
        .is_some_and(|node| el.is_same_node(Some(&node)))
}

fn submit(desk: Rc<RefCell<SupportDesk>>, els: Elements, transport: Rc<PageTransport>) {
    let request = match read_request(&els.form) {
        Ok(request) => request,
        Err(err) => {
            log::error!("cannot read support form: {err}");
            return;
        }
    };
    spawn_local(async move {
        let observe = |d: &SupportDesk| render(d, &els);
        match run_submission(&desk, transport.as_ref(), request, observe).await {
            Ok(SubmitOutcome::Delivered(ticket)) => {
                log::info!("support ticket {} issued", ticket.id);
                els.form.reset();
            }
            Ok(SubmitOutcome::Failed(_)) => {
                let text = desk.borrow().config().failure_alert.clone();
                gloo::dialogs::alert(&text);
            }
            Err(err) => log::debug!("submission ignored: {err}"),
        }
    });
}

/// Wires the support button, both dialogs and the form.
pub fn mount(config: SupportConfig) -> Result<(), ViewerError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let els = Elements::find(&document)?;

    let transport = Rc::new(SimulatedTransport::new(TimerDelay, config.send_delay_ms));
    let desk = Rc::new(RefCell::new(SupportDesk::new(config)));
    render(&desk.borrow(), &els);

    // Applies a state change and mirrors it into the DOM.
    let on = |f: fn(&mut SupportDesk)| {
        let desk = Rc::clone(&desk);
        let els = els.clone();
        move |_event: &Event| {
            f(&mut desk.borrow_mut());
            render(&desk.borrow(), &els);
        }
    };

    let mut listeners = Vec::new();
    if let Some(btn) = dom::optional::<HtmlElement>(&document, "supportBtn") {
        listeners.push(EventListener::new(&btn, "click", on(|d| d.open_support())));
    }
    if let Some(btn) = dom::optional::<HtmlElement>(&document, "closeModal") {
        listeners.push(EventListener::new(
            &btn,
            "click",
            on(|d| d.close(ModalKind::Support)),
        ));
    }
    if let Some(btn) = dom::optional::<HtmlElement>(&document, "closeResponseModal") {
        listeners.push(EventListener::new(
            &btn,
            "click",
            on(|d| d.close(ModalKind::Response)),
        ));
    }

    {
        let desk = Rc::clone(&desk);
        let els = els.clone();
        listeners.push(EventListener::new(&window, "click", move |event| {
            let kind = if is_target(event, &els.support_modal) {
                ModalKind::Support
            } else if is_target(event, &els.response_modal) {
                ModalKind::Response
            } else {
                return;
            };
            desk.borrow_mut().click_backdrop(kind);
            render(&desk.borrow(), &els);
        }));
    }

    {
        let desk = Rc::clone(&desk);
        let els = els.clone();
        let form = els.form.clone();
        listeners.push(EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                submit(Rc::clone(&desk), els.clone(), Rc::clone(&transport));
            },
        ));
    }

    SUPPORT.with(|cell| {
        *cell.borrow_mut() = Some(SupportView {
            _listeners: listeners,
        })
    });
    Ok(())
}

pub fn teardown() {
    let view = SUPPORT.try_with(|cell| cell.borrow_mut().take()).ok().flatten();
    drop(view);
}
