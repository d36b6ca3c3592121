//! WebAssembly bindings for the browser search box.
//!
//! The host page owns the DOM; this module owns everything else. The page
//! fetches the CSV, hands the text to [`SearchWidget`], and on every `input`
//! event replaces the results container's `innerHTML` with `onInput(value)`.
//! See `demo/search.js` for the glue.
//!
//! A failed fetch is handled on the JS side by constructing
//! `SearchWidget.empty()`, which keeps the box interactive with no data.

use crate::config::Config;
use crate::controller::SearchSession;
use crate::loader::parse_csv;
use crate::render::{HtmlRenderer, JsonRenderer, ResultView};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Element id of the text input the widget listens to.
pub const INPUT_ELEMENT_ID: &str = "search-input";

/// Element id of the container results are written into.
pub const RESULTS_ELEMENT_ID: &str = "results";

#[wasm_bindgen(js_name = inputElementId)]
pub fn input_element_id() -> String {
    INPUT_ELEMENT_ID.to_string()
}

#[wasm_bindgen(js_name = resultsElementId)]
pub fn results_element_id() -> String {
    RESULTS_ELEMENT_ID.to_string()
}

/// WASM-accessible search session with its HTML renderer.
#[wasm_bindgen]
pub struct SearchWidget {
    session: SearchSession,
    html: HtmlRenderer,
    json: JsonRenderer,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Build from raw CSV text. `options` is an optional object with the same
    /// camelCase keys as `quarry.json`.
    #[wasm_bindgen(constructor)]
    pub fn new(csv: &str, options: JsValue) -> Result<SearchWidget, JsValue> {
        let config: Config = if options.is_undefined() || options.is_null() {
            Config::default()
        } else {
            from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let records = parse_csv(csv, &config.csv_options());
        Ok(Self::from_session(SearchSession::new(records, &config), &config))
    }

    /// Widget over no data, for when the CSV could not be fetched.
    pub fn empty() -> SearchWidget {
        Self::from_session(SearchSession::empty(), &Config::default())
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.session.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// New `innerHTML` for the results container.
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&self, value: &str) -> String {
        self.session.on_input(value, &self.html)
    }

    /// Result views as plain JS objects: `{ title, url, meta, snippet }[]`.
    pub fn search(&self, value: &str) -> Result<JsValue, JsValue> {
        let views: Vec<ResultView> = self
            .session
            .query(value)
            .iter()
            .map(|m| ResultView::from_record(m.record, &self.json.options))
            .collect();
        to_value(&views).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Same as `search`, serialized to a JSON string.
    #[wasm_bindgen(js_name = searchJson)]
    pub fn search_json(&self, value: &str) -> String {
        self.session.on_input(value, &self.json).to_string()
    }
}

impl SearchWidget {
    fn from_session(session: SearchSession, config: &Config) -> Self {
        Self {
            session,
            html: HtmlRenderer::new(config.render_options()),
            json: JsonRenderer::new(config.render_options()),
        }
    }
}
