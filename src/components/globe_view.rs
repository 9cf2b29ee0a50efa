//! Globe View Component
//!
//! Renders the loaded photos as clickable pins on a globe.gl globe.

use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::context::AppContext;
use crate::markers::{build_markers, Marker, MARKER_SVG};
use crate::store::{store_select_photo, use_app_store, AppStateStoreFields, AppStore};

#[wasm_bindgen]
extern "C" {
    /// globe.gl instance, loaded as a global by index.html
    type Globe;

    #[wasm_bindgen(constructor)]
    fn new(element: &HtmlElement) -> Globe;

    #[wasm_bindgen(method, js_name = globeImageUrl)]
    fn globe_image_url(this: &Globe, url: &str) -> Globe;

    #[wasm_bindgen(method, js_name = htmlElementsData)]
    fn html_elements_data(this: &Globe, data: &JsValue) -> Globe;

    #[wasm_bindgen(method, js_name = htmlElement)]
    fn html_element(this: &Globe, accessor: &js_sys::Function) -> Globe;
}

/// Build the pin element globe.gl places for one marker datum
fn pin_element(datum: &JsValue, store: AppStore) -> Result<HtmlElement, JsValue> {
    let marker: Marker = serde_wasm_bindgen::from_value(datum.clone())?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let el: HtmlElement = document.create_element("div")?.dyn_into()?;
    el.set_inner_html(MARKER_SVG);

    let style = el.style();
    // Untinted pins inherit the page color
    if let Some(color) = marker.color {
        style.set_property("color", color.as_css())?;
    }
    style.set_property("width", &format!("{}px", marker.size))?;
    style.set_property("pointer-events", "auto")?;
    style.set_property("cursor", "pointer")?;

    let url = marker.url;
    let on_click = Closure::<dyn FnMut()>::new(move || {
        store_select_photo(store, url.clone());
    });
    el.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();

    Ok(el)
}

fn mount_globe(container: &HtmlElement, image_url: &str, store: AppStore) -> Globe {
    let globe = Globe::new(container);
    globe.globe_image_url(image_url);

    let accessor = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |datum: JsValue| {
        match pin_element(&datum, store) {
            Ok(el) => el.into(),
            Err(e) => {
                log::error!("[Globe] Could not build marker: {:?}", e);
                JsValue::NULL
            }
        }
    });
    globe.html_element(accessor.as_ref().unchecked_ref());
    accessor.forget();

    log::info!("[Globe] Mounted");
    globe
}

/// Globe with one pin per loaded photo
#[component]
pub fn GlobeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let image_url = ctx.config().globe_image_url;

    let container = NodeRef::<leptos::html::Div>::new();
    let globe = StoredValue::new_local(None::<Globe>);

    // Markers are re-projected from the collection on every change
    Effect::new(move |_| {
        let photos = store.photos().get();
        let Some(el) = container.get() else { return };

        if globe.with_value(|g| g.is_none()) {
            globe.set_value(Some(mount_globe(&el, &image_url, store)));
        }

        let mut rng = SmallRng::seed_from_u64(js_sys::Math::random().to_bits());
        let markers = build_markers(&photos, &mut rng);
        match serde_wasm_bindgen::to_value(&markers) {
            Ok(data) => {
                log::info!("[Globe] Rendering {} markers", markers.len());
                globe.with_value(|g| {
                    if let Some(g) = g {
                        g.html_elements_data(&data);
                    }
                });
            }
            Err(e) => log::error!("[Globe] Could not pass markers to globe: {}", e),
        }
    });

    view! {
        <div class="globe-container" node_ref=container></div>
    }
}
