use crate::constants::{
    HIDDEN_CLASS, MODAL_BUTTONS_SELECTOR, MODAL_BUTTON_CLASS, MODAL_DESCRIPTION_SELECTOR,
    MODAL_EXIT_SELECTOR, MODAL_OVERLAY_SELECTOR, MODAL_SELECTOR, MODAL_TITLE_SELECTOR,
};
use crate::dom;
use folio_core::{ModalButton, ModalView};
use web_sys as web;

/// The project modal as it exists in the host page.
pub struct DomModalView {
    document: web::Document,
    modal: web::Element,
    overlay: web::Element,
    title: web::Element,
    description: web::Element,
    buttons: web::Element,
    exit_button: web::Element,
}

impl DomModalView {
    /// Look up every modal element; fails on the first one missing.
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        Ok(Self {
            document: document.clone(),
            modal: dom::require_selector(document, MODAL_SELECTOR)?,
            overlay: dom::require_selector(document, MODAL_OVERLAY_SELECTOR)?,
            title: dom::require_selector(document, MODAL_TITLE_SELECTOR)?,
            description: dom::require_selector(document, MODAL_DESCRIPTION_SELECTOR)?,
            buttons: dom::require_selector(document, MODAL_BUTTONS_SELECTOR)?,
            exit_button: dom::require_selector(document, MODAL_EXIT_SELECTOR)?,
        })
    }

    pub fn overlay(&self) -> &web::Element {
        &self.overlay
    }

    pub fn exit_button(&self) -> &web::Element {
        &self.exit_button
    }
}

#[inline]
fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1(HIDDEN_CLASS);
    } else {
        _ = cl.remove_1(HIDDEN_CLASS);
    }
}

impl ModalView for DomModalView {
    fn set_title(&mut self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn set_description(&mut self, description: &str) {
        self.description.set_text_content(Some(description));
    }

    fn clear_buttons(&mut self) {
        self.buttons.set_inner_html("");
    }

    fn add_button(&mut self, button: &ModalButton) {
        let Ok(a) = self.document.create_element("a") else {
            log::error!("[modal] could not create link for {}", button.url);
            return;
        };
        a.set_class_name(MODAL_BUTTON_CLASS);
        a.set_text_content(Some(&button.text));
        _ = a.set_attribute("href", &button.url);
        if button.external {
            _ = a.set_attribute("target", "_blank");
            _ = a.set_attribute("rel", "noopener noreferrer");
        }
        _ = self.buttons.append_child(&a);
    }

    fn set_visible(&mut self, visible: bool) {
        set_hidden(&self.modal, !visible);
        set_hidden(&self.overlay, !visible);
    }
}
