use core::cell::{Cell, RefCell};
use dashboard_core::controller::{
    Action, AlertClearing, Controller, EffectContext, Messages, Navigator,
};
use dashboard_core::registration::{Client, Control, CsrfToken, FormData, Passwords};
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement, Window,
};

/// Holds the text for a password mismatch, rendered by the server so it's
/// localized.
const MISMATCH_ATTRIBUTE: &str = "data-password-mismatch";

/// Holds the text for any other failure.
const GENERIC_ERROR_ATTRIBUTE: &str = "data-generic-error";

/// Connects the controller to the page: turns DOM events into actions, runs
/// effects on the page's event loop, and renders the controller's view.
struct Shell {
    /// For navigation and computed styles
    window: Window,

    /// The page we're rendering into
    document: Document,

    /// Every form on the page. A submit from any of them sends all of them.
    forms: Vec<HtmlFormElement>,

    /// The functional core. Never borrowed across an `await`.
    controller: RefCell<Controller>,

    /// Shared HTTP client
    ctx: EffectContext,

    /// When the server-rendered alerts were last cleared
    alerts: Cell<AlertClearing>,
}

/// Attach listeners to the page's forms and password fields. Does nothing on
/// pages without a form.
///
/// # Errors
///
/// Fails if the page origin can't be read or the listeners can't be attached.
pub fn bind(window: Window, document: Document) -> Result<(), JsValue> {
    let found = document.query_selector_all("form")?;
    let forms: Vec<HtmlFormElement> = (0..found.length())
        .filter_map(|idx| found.item(idx))
        .filter_map(|node| node.dyn_into::<HtmlFormElement>().ok())
        .collect();

    if forms.is_empty() {
        tracing::debug!("no form on this page");
        return Ok(());
    }

    let client = Client::new(window.location().origin()?);
    let messages = messages(&document)?;

    let shell = Rc::new(Shell {
        window,
        document,
        forms,
        controller: RefCell::new(Controller::new(client, messages)),
        ctx: EffectContext::new(),
        alerts: Cell::new(AlertClearing::default()),
    });

    for form in &shell.forms {
        let shell_for_submit = Rc::clone(&shell);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            shell_for_submit.submit();
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        // The listener lives as long as the page does.
        on_submit.forget();
    }

    let password_fields = shell.document.query_selector_all("input[type='password']")?;
    for idx in 0..password_fields.length() {
        let Some(field) = password_fields.item(idx) else {
            continue;
        };

        let shell_for_keyup = Rc::clone(&shell);
        let on_keyup = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            shell_for_keyup.dispatch(Action::PasswordsEdited(shell_for_keyup.passwords()));
        });
        field.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
        on_keyup.forget();
    }

    Ok(())
}

/// Read user-facing text from `#globalError`, falling back to defaults.
fn messages(document: &Document) -> Result<Messages, JsValue> {
    let mut messages = Messages::default();

    if let Some(global_error) = document.query_selector("#globalError")? {
        if let Some(text) = global_error.get_attribute(MISMATCH_ATTRIBUTE) {
            messages.password_mismatch = text;
        }
        if let Some(text) = global_error.get_attribute(GENERIC_ERROR_ATTRIBUTE) {
            messages.generic_error = text;
        }
    }

    Ok(messages)
}

impl Shell {
    /// Collect everything the controller needs to handle a submit.
    fn submit(self: &Rc<Self>) {
        let csrf = CsrfToken::from_meta(|name| self.meta_content(name));

        self.dispatch(Action::Submit {
            passwords: self.passwords(),
            form: successful_controls(&self.forms),
            csrf,
        });
    }

    /// Hand an action to the controller, render, and start any effects. Each
    /// effect feeds its resulting action back through here.
    fn dispatch(self: &Rc<Self>, action: Action) {
        let effects = self.controller.borrow_mut().handle(action);

        self.render();

        for effect in effects {
            let shell = Rc::clone(self);
            spawn_local(async move {
                if let Some(next) = effect.run(&shell.ctx, shell.as_ref()).await {
                    shell.dispatch(next);
                }
            });
        }
    }

    /// Current values of the password fields
    fn passwords(&self) -> Passwords {
        Passwords::new(
            self.input_value("#password"),
            self.input_value("#matchPassword"),
        )
    }

    /// The value of an input, or empty if it isn't there
    fn input_value(&self, selector: &str) -> String {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// The `content` of `<meta name="{name}">`
    fn meta_content(&self, name: &str) -> Option<String> {
        self.document
            .query_selector(&format!("meta[name='{name}']"))
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"))
    }

    /// Make the page match the controller's view.
    fn render(&self) {
        if let Err(err) = self.try_render() {
            tracing::error!(?err, "could not render registration form");
        }
    }

    /// The fallible part of `render`
    fn try_render(&self) -> Result<(), JsValue> {
        let view = self.controller.borrow().view().clone();

        let mut alerts = self.alerts.get();
        if alerts.should_clear(&view) {
            self.alerts.set(alerts);

            for alert in self.all(".alert")? {
                alert.set_inner_html("");
                self.set_visible(&alert, false)?;
            }
            for list in self.all(".error-list")? {
                list.set_inner_html("");
            }
        }

        if let Some(global_error) = self.one("#globalError")? {
            match &view.global_error {
                Some(message) => {
                    global_error.set_inner_html(message);
                    self.set_visible(&global_error, true)?;
                }
                None => {
                    global_error.set_inner_html("");
                    self.set_visible(&global_error, false)?;
                }
            }
        }

        if let Some(existing) = self.one("#existingAccountError")? {
            self.set_visible(&existing, view.existing_account)?;
        }

        if let Some(button) = self.document.query_selector("#signUpButton")? {
            if view.submitting {
                button.set_attribute("disabled", "disabled")?;
            } else {
                button.remove_attribute("disabled")?;
            }
        }

        Ok(())
    }

    /// The first element matching `selector`
    fn one(&self, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
        Ok(self
            .document
            .query_selector(selector)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    /// Every element matching `selector`
    fn all(&self, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
        let nodes = self.document.query_selector_all(selector)?;

        Ok((0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    /// Show or hide an element. Showing removes our inline `display`, and falls
    /// back to `block` if a stylesheet still hides the element.
    fn set_visible(&self, el: &HtmlElement, visible: bool) -> Result<(), JsValue> {
        let style = el.style();

        if !visible {
            return style.set_property("display", "none");
        }

        style.remove_property("display")?;

        let hidden_by_stylesheet = self
            .window
            .get_computed_style(el)?
            .map(|computed| computed.get_property_value("display"))
            .transpose()?
            .is_some_and(|display| display == "none");

        if hidden_by_stylesheet {
            style.set_property("display", "block")?;
        }

        Ok(())
    }
}

impl Navigator for Shell {
    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            tracing::error!(?err, url, "could not navigate");
        }
    }
}

/// Serialize forms the way a browser would submit them, one after another in
/// document order. Which controls count is up to `Control::is_successful`.
fn successful_controls(forms: &[HtmlFormElement]) -> FormData {
    let mut data = FormData::new();

    for form in forms {
        let elements = form.elements();

        for idx in 0..elements.length() {
            if let Some(element) = elements.item(idx) {
                push_control(&mut data, &element);
            }
        }
    }

    data
}

/// Add one form control's values, if it has any to contribute.
fn push_control(data: &mut FormData, element: &Element) {
    // `:disabled` also catches controls inside a disabled fieldset.
    let disabled = element.matches(":disabled").unwrap_or(false);

    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        let (kind, name, value) = (input.type_(), input.name(), input.value());
        let control = Control {
            kind: &kind,
            name: &name,
            disabled,
            checked: input.checked(),
        };

        data.push_control(&control, [value.as_str()]);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        let (kind, name) = (select.type_(), select.name());
        let control = Control {
            kind: &kind,
            name: &name,
            disabled,
            checked: false,
        };

        let selected = select.selected_options();
        let values: Vec<String> = (0..selected.length())
            .filter_map(|idx| selected.item(idx))
            .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| option.value())
            .collect();

        data.push_control(&control, values.iter().map(String::as_str));
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        let (kind, name, value) = (textarea.type_(), textarea.name(), textarea.value());
        let control = Control {
            kind: &kind,
            name: &name,
            disabled,
            checked: false,
        };

        data.push_control(&control, [value.as_str()]);
    }
}
