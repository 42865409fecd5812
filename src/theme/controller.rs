//! the theme controller
//!
//! owned by the page shell and passed down explicitly. initialization runs
//! read storage -> validate -> apply -> ready; every mutation afterwards runs
//! persist -> reflect -> favicon, synchronously and in that order.
use {
    crate::theme::{
        Palette, ThemeMode, ThemeState,
        document::{Document, DomEffect, reflect_mode, reflect_palette},
        favicon::{FaviconError, FaviconTemplate, TemplateSource, plan_favicon},
        storage::{StorageKeys, ThemeStorage},
    },
    tracing::{debug, info},
};

/// the single source of truth for mode and palette
pub struct ThemeController<S: ThemeStorage> {
    /// where the selection is persisted
    storage: S,
    /// the keys used in storage
    keys: StorageKeys,
    /// the current selection
    state: ThemeState,
    /// the cached favicon template
    template: FaviconTemplate,
    /// whether init completed
    ready: bool,
}

impl<S: ThemeStorage> ThemeController<S> {
    /// initialize from storage using the default keys
    pub fn init(storage: S, doc: &mut impl Document) -> Self {
        Self::init_with_keys(storage, StorageKeys::default(), doc)
    }

    /// initialize from storage
    ///
    /// unreadable storage and unrecognized values both resolve to the defaults, and the
    /// resolved values are written back so stale entries don't survive.
    pub fn init_with_keys(storage: S, keys: StorageKeys, doc: &mut impl Document) -> Self {
        let stored_mode = read_key(&storage, &keys.mode);
        let stored_palette = read_key(&storage, &keys.palette);
        let state = ThemeState::from_stored(stored_mode.as_deref(), stored_palette.as_deref());

        let mut controller = Self {
            storage,
            keys,
            state,
            template: FaviconTemplate::default(),
            ready: false,
        };

        controller.apply_mode(doc);
        controller.apply_palette(doc);
        controller.ready = true;

        info!(mode = %state.mode, palette = %state.palette, "theme ready");
        controller
    }

    /// the current selection
    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// the current mode
    pub fn mode(&self) -> ThemeMode {
        self.state.mode
    }

    /// the current palette
    pub fn palette(&self) -> Palette {
        self.state.palette
    }

    /// whether initialization finished
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// the storage backing this controller
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// the favicon template cache
    pub fn template(&self) -> &FaviconTemplate {
        &self.template
    }

    /// replace the mode
    pub fn set_mode(&mut self, mode: ThemeMode, doc: &mut impl Document) {
        self.state.mode = mode;
        self.apply_mode(doc);
    }

    /// flip between dark and light
    pub fn toggle_mode(&mut self, doc: &mut impl Document) {
        self.set_mode(self.state.mode.toggled(), doc);
    }

    /// replace the palette
    pub fn set_palette(&mut self, palette: Palette, doc: &mut impl Document) {
        self.state.palette = palette;
        self.apply_palette(doc);
    }

    /// recompute the favicon from the cached template
    ///
    /// does nothing until the template is available, and writes nothing when the
    /// derived href is already in place.
    pub fn refresh_favicon(&self, doc: &mut impl Document) -> Option<DomEffect> {
        let effect = plan_favicon(self.template.markup()?, &*doc, self.state.mode)?;
        doc.apply(&effect);
        Some(effect)
    }

    /// claim the single template fetch of this session
    ///
    /// returns `false` when the template was already fetched or is being fetched, in
    /// which case the caller must not fetch it again.
    pub fn begin_template_fetch(&mut self) -> bool {
        self.template.begin()
    }

    /// hand the result of the template fetch back to the controller
    ///
    /// on success the favicon is recomputed once, covering any mode/palette changes made
    /// while the fetch was in flight. on failure the static favicon stays in place.
    pub fn finish_template_fetch(
        &mut self,
        result: Result<String, FaviconError>,
        doc: &mut impl Document,
    ) -> Option<DomEffect> {
        self.template.finish(result);
        self.refresh_favicon(doc)
    }

    /// fetch the template from a source, once per session
    pub async fn load_template<T, D>(&mut self, source: &T, doc: &mut D) -> Option<DomEffect>
    where
        T: TemplateSource + ?Sized,
        D: Document,
    {
        if !self.begin_template_fetch() {
            return None;
        }

        let result = source.fetch().await;
        self.finish_template_fetch(result, doc)
    }

    /// persist, reflect and refresh the favicon for the mode
    fn apply_mode(&mut self, doc: &mut impl Document) {
        let mode = self.state.mode;
        write_key(&mut self.storage, &self.keys.mode, mode.as_str());
        doc.apply_all(&reflect_mode(mode));
        self.refresh_favicon(doc);
    }

    /// persist, reflect and refresh the favicon for the palette
    fn apply_palette(&mut self, doc: &mut impl Document) {
        let palette = self.state.palette;
        write_key(&mut self.storage, &self.keys.palette, palette.as_str());
        doc.apply(&reflect_palette(palette));
        self.refresh_favicon(doc);
    }
}

/// read a key, treating an unreadable storage as empty
fn read_key(storage: &impl ThemeStorage, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|e| {
        debug!(key, error = %e, "theme storage unreadable, using defaults");
        None
    })
}

/// write a key, a failed write only costs persistence
fn write_key(storage: &mut impl ThemeStorage, key: &str, value: &str) {
    if let Err(e) = storage.set(key, value) {
        debug!(key, error = %e, "theme storage unwritable");
    }
}
