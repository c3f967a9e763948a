//! Browser implementations of the core seams.
//!
//! Everything here touches `web_sys` and only does something useful on the
//! wasm target.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};
use yogamix_core::{
    AddressBar, ClientConfig, Error, ExportPresenter, ExportSession, HttpBackend, IntentStore,
    KeyValueStorage, MemoryStorage, Navigator, Result, ReturnDetector,
};

/// Id of the optional `<script type="application/json">` config element.
pub const CONFIG_ELEMENT_ID: &str = "yogamix-config";

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Configuration("no window object".to_string()))
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the page's local storage.
    pub fn open() -> Result<Self> {
        let storage = window()?
            .local_storage()
            .map_err(|e| Error::Storage(describe(&e)))?
            .ok_or_else(|| Error::Storage("localStorage is unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| Error::Storage(describe(&e)))
    }
}

/// `location.href` for reading, `history.replaceState` for rewriting.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    fn href(&self) -> Result<String> {
        window()?
            .location()
            .href()
            .map_err(|e| Error::Navigation(describe(&e)))
    }

    fn replace(&self, href: &str) -> Result<()> {
        window()?
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(href)))
            .map_err(|e| Error::Navigation(describe(&e)))
    }
}

/// Full-page navigation through `location.assign`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        window()?
            .location()
            .assign(url)
            .map_err(|e| Error::Navigation(describe(&e)))
    }
}

/// Read [`ClientConfig`] from the page, falling back to defaults.
pub fn read_client_config() -> ClientConfig {
    let Some(json) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
    else {
        return ClientConfig::default();
    };

    match ClientConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid page config: {}", e);
            ClientConfig::default()
        }
    }
}

/// `location.origin`, e.g. `https://yoga.example.com`.
pub fn page_origin() -> Result<String> {
    window()?
        .location()
        .origin()
        .map_err(|e| Error::Configuration(describe(&e)))
}

/// Today's date as `YYYY-MM-DD` (UTC, matching `Date.toISOString`).
pub fn today_iso() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.split('T').next().unwrap_or_default().to_string()
}

/// Wire an [`ExportSession`] to the browser.
///
/// Falls back to in-memory storage when `localStorage` is blocked; the
/// export then cannot survive the redirect, which is logged.
pub fn connect_session(
    config: &ClientConfig,
    presenter: Rc<dyn ExportPresenter>,
) -> Result<ExportSession<HttpBackend>> {
    let backend = HttpBackend::from_config(config, &page_origin()?)?;

    let storage: Rc<dyn KeyValueStorage> = match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            tracing::warn!("Pending exports will not survive navigation: {}", e);
            Rc::new(MemoryStorage::new())
        }
    };
    let store = IntentStore::new(storage).with_key(config.storage_key.clone());

    Ok(ExportSession::new(
        backend,
        store,
        ReturnDetector::new(Rc::new(BrowserAddressBar)),
        Rc::new(BrowserNavigator),
        presenter,
    ))
}
