//! Project modal: static content keyed by hotspot identifier, and the
//! shown/hidden state machine that drives a [`ModalView`].

use fnv::FnvHashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalButton {
    pub text: String,
    pub url: String,
    /// Open in a new browsing context without opener or referrer.
    pub external: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    pub buttons: Vec<ModalButton>,
}

#[derive(Clone, Debug, Default)]
pub struct ContentTable {
    entries: FnvHashMap<String, ModalContent>,
}

impl ContentTable {
    pub fn insert(&mut self, id: impl Into<String>, content: ModalContent) {
        self.entries.insert(id.into(), content);
    }

    pub fn get(&self, id: &str) -> Option<&ModalContent> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The four portfolio hotspots.
    pub fn portfolio() -> Self {
        let mut table = Self::default();
        for (id, title, description, buttons) in PORTFOLIO_CONTENT {
            table.insert(
                *id,
                ModalContent {
                    title: (*title).to_owned(),
                    description: (*description).to_owned(),
                    buttons: buttons
                        .iter()
                        .map(|(text, url, external)| ModalButton {
                            text: (*text).to_owned(),
                            url: (*url).to_owned(),
                            external: *external,
                        })
                        .collect(),
                },
            );
        }
        table
    }
}

type ContentRow = (
    &'static str,
    &'static str,
    &'static str,
    // (label, url, opens in a new browsing context)
    &'static [(&'static str, &'static str, bool)],
);

const PORTFOLIO_CONTENT: &[ContentRow] = &[
    (
        "Project_1",
        "8時間プロジェクトチャレンジ",
        "ご覧いただいているポートフォリオは、8時間チャレンジプロジェクトの一環として制作しました。 Blender、Three.js、JavaScript、HTML、CSS を使用して構築しています。",
        &[],
    ),
    (
        "Project_2",
        "ArtStation",
        "View my creative portfolio",
        &[("Visit ArtStation", "https://ayaha_asahata.artstation.com/", true)],
    ),
    (
        "Project_3",
        "GitHub",
        "Explore my coding projects",
        &[("Visit GitHub", "https://github.com/afry33", true)],
    ),
    (
        "UFO",
        "UFO Resume Delivery",
        "Available through private link",
        &[(
            "JPN Resume",
            "https://docs.google.com/document/d/1B9EdUB-jGiqjv9Te2Fmah6Q83jZsUC-K/preview",
            true,
        )],
    ),
];

/// DOM-side capability the controller writes to.
pub trait ModalView {
    fn set_title(&mut self, title: &str);
    fn set_description(&mut self, description: &str);
    fn clear_buttons(&mut self);
    fn add_button(&mut self, button: &ModalButton);
    /// Shows or hides the panel and its overlay together.
    fn set_visible(&mut self, visible: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Hidden,
    Shown,
}

pub struct ModalController<V> {
    view: V,
    content: ContentTable,
    state: ModalState,
    current: Option<String>,
}

impl<V: ModalView> ModalController<V> {
    /// Starts hidden; the host page's markup is expected to start hidden too.
    pub fn new(view: V, content: ContentTable) -> Self {
        Self {
            view,
            content,
            state: ModalState::Hidden,
            current: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == ModalState::Shown
    }

    /// Identifier whose content is on display, if shown.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Show content for `id`. Unknown identifiers are ignored. Opening while
    /// already shown replaces the content in place.
    pub fn open(&mut self, id: &str) -> bool {
        let Some(content) = self.content.get(id) else {
            log::debug!("[modal] no content for {:?}", id);
            return false;
        };
        self.view.set_title(&content.title);
        self.view.set_description(&content.description);
        self.view.clear_buttons();
        for button in &content.buttons {
            self.view.add_button(button);
        }
        self.view.set_visible(true);
        self.state = ModalState::Shown;
        self.current = Some(id.to_owned());
        log::info!("[modal] open {}", id);
        true
    }

    /// Hide panel and overlay. No-op when already hidden.
    pub fn close(&mut self) -> bool {
        if self.state == ModalState::Hidden {
            return false;
        }
        self.view.set_visible(false);
        self.state = ModalState::Hidden;
        self.current = None;
        log::info!("[modal] close");
        true
    }

    /// Global click: open whatever hotspot is currently hovered, if any.
    pub fn handle_click(&mut self, hover: Option<&str>) -> bool {
        match hover {
            Some(id) if !id.is_empty() => self.open(id),
            _ => false,
        }
    }
}
