//! File Reading
//!
//! Turns browser `File`s into data-URL images.

use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use crate::error::{AppError, Result};
use crate::upload::SelectedImage;

fn js_error(context: &str, value: JsValue) -> AppError {
    AppError::FileRead(format!("{}: {:?}", context, value))
}

/// Read one file as a `data:` URL
pub async fn read_as_data_url(file: &File) -> Result<SelectedImage> {
    let name = file.name();
    let reader = FileReader::new().map_err(|e| js_error(&name, e))?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let loaded = reader.clone();
        let on_load = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let failed = reader.clone();
        let on_error = Closure::once_into_js(move || {
            let error = failed.error().map(JsValue::from).unwrap_or(JsValue::NULL);
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });

    reader.read_as_data_url(file).map_err(|e| js_error(&name, e))?;
    let result = JsFuture::from(promise).await.map_err(|e| js_error(&name, e))?;
    let data_url = result
        .as_string()
        .ok_or_else(|| AppError::FileRead(format!("{}: reader returned no data URL", name)))?;

    Ok(SelectedImage { file_name: name, data_url })
}

/// Read every file; failures are collected instead of aborting the batch
pub async fn read_all(files: Vec<File>) -> (Vec<SelectedImage>, Vec<AppError>) {
    let mut images = Vec::with_capacity(files.len());
    let mut errors = Vec::new();
    for file in &files {
        match read_as_data_url(file).await {
            Ok(image) => images.push(image),
            Err(e) => errors.push(e),
        }
    }
    (images, errors)
}
