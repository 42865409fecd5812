//! browser adapters for the theme
//!
//! `localStorage` as [`ThemeStorage`], the live document as [`Document`], and
//! `fetch` for the favicon template. requires a browser environment.
use {
    crate::theme::{
        Palette, ThemeMode,
        controller::ThemeController,
        document::{Document, DomEffect, FAVICON_SELECTOR},
        favicon::{FaviconError, TEMPLATE_PATH},
        storage::{StorageError, StorageKeys, ThemeStorage},
    },
    std::{cell::RefCell, rc::Rc},
    tracing::debug,
    wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen},
    wasm_bindgen_futures::{JsFuture, spawn_local},
};

/// describe a thrown js value
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// the browser's `localStorage`
pub struct LocalStorage {
    /// `None` when storage is disabled or throws on access
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// grab `localStorage` from the current window
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl ThemeStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or_else(|| StorageError::Write {
            key: key.to_string(),
            reason: "localStorage is disabled".to_string(),
        })?;

        storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: describe(&e),
        })
    }
}

/// the live browser document
pub struct BrowserDocument {
    /// the window, for computed style
    window: web_sys::Window,
    /// the document
    document: web_sys::Document,
}

impl BrowserDocument {
    /// grab the current document, `None` outside a browser
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// the themed favicon link element
    fn favicon_link(&self) -> Option<web_sys::Element> {
        self.document.query_selector(FAVICON_SELECTOR).ok().flatten()
    }
}

impl Document for BrowserDocument {
    fn computed_property(&self, name: &str) -> String {
        self.document
            .document_element()
            .and_then(|root| self.window.get_computed_style(&root).ok().flatten())
            .and_then(|style| style.get_property_value(name).ok())
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn favicon_href(&self) -> Option<String> {
        let link = self.favicon_link()?;
        Some(link.get_attribute("href").unwrap_or_default())
    }

    fn apply(&mut self, effect: &DomEffect) {
        let result = match effect {
            DomEffect::SetRootAttribute { name, value } => match self.document.document_element() {
                Some(root) => root.set_attribute(name, value),
                None => Ok(()),
            },
            DomEffect::ToggleRootClass { class, enabled } => match self.document.document_element() {
                Some(root) => root.class_list().toggle_with_force(class, *enabled).map(|_| ()),
                None => Ok(()),
            },
            DomEffect::SetFaviconHref(href) => match self.favicon_link() {
                Some(link) => link.set_attribute("href", href),
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            debug!(?effect, error = %describe(&e), "document write failed");
        }
    }
}

/// fetch the favicon template with the browser's `fetch`
pub async fn fetch_template(path: &str) -> Result<String, FaviconError> {
    let window = web_sys::window().ok_or_else(|| FaviconError::Request("no window".to_string()))?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .and_then(|value| value.dyn_into())
        .map_err(|e| FaviconError::Request(describe(&e)))?;

    if !response.ok() {
        return Err(FaviconError::Status(response.status()));
    }

    let text = response
        .text()
        .map_err(|e| FaviconError::Request(describe(&e)))?;

    JsFuture::from(text)
        .await
        .map_err(|e| FaviconError::Request(describe(&e)))?
        .as_string()
        .ok_or(FaviconError::Empty)
}

/// the controller and the document it drives
struct Session {
    /// the theme controller
    controller: ThemeController<LocalStorage>,
    /// the live document
    doc: BrowserDocument,
}

/// the theme controller as seen from page scripts
#[wasm_bindgen]
pub struct WebTheme {
    /// shared with the template fetch task
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl WebTheme {
    /// start the controller and kick off the favicon template fetch
    ///
    /// unset keys and template path fall back to the defaults the server uses.
    #[wasm_bindgen(constructor)]
    pub fn new(
        template_path: Option<String>,
        mode_key: Option<String>,
        palette_key: Option<String>,
    ) -> Result<WebTheme, JsValue> {
        let mut doc = BrowserDocument::current().ok_or_else(|| JsValue::from_str("no document"))?;
        let defaults = StorageKeys::default();
        let keys = StorageKeys {
            mode: mode_key.filter(|k| !k.is_empty()).unwrap_or(defaults.mode),
            palette: palette_key.filter(|k| !k.is_empty()).unwrap_or(defaults.palette),
        };
        let controller = ThemeController::init_with_keys(LocalStorage::open(), keys, &mut doc);
        let session = Rc::new(RefCell::new(Session { controller, doc }));

        if session.borrow_mut().controller.begin_template_fetch() {
            let session = session.clone();
            let path = template_path
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| TEMPLATE_PATH.to_string());

            spawn_local(async move {
                let result = fetch_template(&path).await;
                let mut guard = session.borrow_mut();
                let Session { controller, doc } = &mut *guard;
                controller.finish_template_fetch(result, doc);
            });
        }

        Ok(Self { session })
    }

    /// the current mode, `light` or `dark`
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.session.borrow().controller.mode().as_str().to_string()
    }

    /// the current palette id
    #[wasm_bindgen(getter)]
    pub fn palette(&self) -> String {
        self.session.borrow().controller.palette().as_str().to_string()
    }

    /// flip between light and dark
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&self) {
        let mut guard = self.session.borrow_mut();
        let Session { controller, doc } = &mut *guard;
        controller.toggle_mode(doc);
    }

    /// switch mode, `false` if the name isn't a mode
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> bool {
        let Some(mode) = ThemeMode::parse(mode) else {
            return false;
        };

        let mut guard = self.session.borrow_mut();
        let Session { controller, doc } = &mut *guard;
        controller.set_mode(mode, doc);
        true
    }

    /// switch palette, `false` if the id isn't a palette
    #[wasm_bindgen(js_name = setPalette)]
    pub fn set_palette(&self, id: &str) -> bool {
        let Some(palette) = Palette::parse(id) else {
            return false;
        };

        let mut guard = self.session.borrow_mut();
        let Session { controller, doc } = &mut *guard;
        controller.set_palette(palette, doc);
        true
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::theme::document::{DARK_CLASS, MODE_ATTRIBUTE, reflect_mode},
        wasm_bindgen_test::wasm_bindgen_test,
    };

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    /// add a themed favicon link, optionally with an href
    fn add_favicon_link(doc: &BrowserDocument, href: Option<&str>) -> web_sys::Element {
        let link = doc.document.create_element("link").unwrap();
        link.set_attribute("data-theme-favicon", "").unwrap();
        if let Some(href) = href {
            link.set_attribute("href", href).unwrap();
        }
        doc.document
            .document_element()
            .unwrap()
            .append_child(&link)
            .unwrap();
        link
    }

    #[wasm_bindgen_test]
    fn disabled_storage_fails_both_ways() {
        let mut storage = LocalStorage { storage: None };

        assert!(matches!(storage.get("k"), Err(StorageError::Unavailable(_))));
        assert!(matches!(
            storage.set("k", "v"),
            Err(StorageError::Write { ref key, .. }) if key == "k"
        ));
    }

    #[wasm_bindgen_test]
    fn controller_starts_on_defaults_with_disabled_storage() {
        let mut doc = BrowserDocument::current().unwrap();
        let controller = ThemeController::init(LocalStorage { storage: None }, &mut doc);

        assert_eq!(controller.mode(), ThemeMode::Dark);
        assert_eq!(controller.palette(), Palette::Default);
        assert!(controller.is_ready());
    }

    #[wasm_bindgen_test]
    fn local_storage_round_trips() {
        let mut storage = LocalStorage::open();
        storage.set("folio-test-key", "light").unwrap();

        assert_eq!(storage.get("folio-test-key").unwrap().as_deref(), Some("light"));
        assert_eq!(storage.get("folio-test-missing").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn favicon_href_without_link_is_none() {
        let doc = BrowserDocument::current().unwrap();
        assert_eq!(doc.favicon_href(), None);
    }

    #[wasm_bindgen_test]
    fn favicon_link_without_href_reads_empty() {
        let mut doc = BrowserDocument::current().unwrap();
        let link = add_favicon_link(&doc, None);

        assert_eq!(doc.favicon_href().as_deref(), Some(""));

        doc.apply(&DomEffect::SetFaviconHref("/x.svg".to_string()));
        assert_eq!(doc.favicon_href().as_deref(), Some("/x.svg"));

        link.remove();
    }

    #[wasm_bindgen_test]
    fn mode_is_reflected_on_the_root() {
        let mut doc = BrowserDocument::current().unwrap();
        let root = doc.document.document_element().unwrap();

        doc.apply_all(&reflect_mode(ThemeMode::Light));
        assert_eq!(root.get_attribute(MODE_ATTRIBUTE).as_deref(), Some("light"));
        assert!(!root.class_list().contains(DARK_CLASS));

        doc.apply_all(&reflect_mode(ThemeMode::Dark));
        assert_eq!(root.get_attribute(MODE_ATTRIBUTE).as_deref(), Some("dark"));
        assert!(root.class_list().contains(DARK_CLASS));
    }
}
