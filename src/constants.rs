// Host page contract and asset location.

pub const SCENE_ASSET_PATH: &str = "./Portfolio.glb";

// Element lookups; a missing element aborts startup.
pub const CANVAS_ID: &str = "experience-canvas";
pub const MODAL_SELECTOR: &str = ".modal";
pub const MODAL_OVERLAY_SELECTOR: &str = ".modal-overlay";
pub const MODAL_TITLE_SELECTOR: &str = ".modal-title";
pub const MODAL_DESCRIPTION_SELECTOR: &str = ".modal-project-description";
pub const MODAL_BUTTONS_SELECTOR: &str = ".modal-buttons";
pub const MODAL_EXIT_SELECTOR: &str = ".modal-exit-button";

// Visibility toggle class shared by the modal panel and its overlay
pub const HIDDEN_CLASS: &str = "hidden";
pub const MODAL_BUTTON_CLASS: &str = "modal-button";
