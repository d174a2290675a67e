// ============================================================================
// IMAGE PICKER - Selección, validación, compresión y preview de una imagen
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::utils::image::{self, ImageFile};

#[derive(Properties, PartialEq)]
pub struct ImagePickerProps {
    /// Imagen ya guardada en el servidor
    #[prop_or_default]
    pub current_url: Option<AttrValue>,
    pub on_select: Callback<Option<ImageFile>>,
    /// Borrar la imagen guardada (sólo en edición)
    #[prop_or_default]
    pub on_remove: Option<Callback<()>>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(ImagePicker)]
pub fn image_picker(props: &ImagePickerProps) -> Html {
    let preview = use_state(|| None::<String>);
    let local_error = use_state(|| None::<String>);
    let processing = use_state(|| false);

    let onchange = {
        let preview = preview.clone();
        let local_error = local_error.clone();
        let processing = processing.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            let preview = preview.clone();
            let local_error = local_error.clone();
            let processing = processing.clone();
            let on_select = on_select.clone();
            processing.set(true);
            spawn_local(async move {
                match prepare(file).await {
                    Ok(image) => {
                        preview.set(Some(image::preview(&image)));
                        local_error.set(None);
                        on_select.emit(Some(image));
                    }
                    Err(message) => {
                        log::warn!("⚠️ Imagen rechazada: {}", message);
                        preview.set(None);
                        local_error.set(Some(message));
                        on_select.emit(None);
                    }
                }
                processing.set(false);
            });
        })
    };

    let on_clear = {
        let preview = preview.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_| {
            preview.set(None);
            on_select.emit(None);
        })
    };

    let shown = (*preview)
        .clone()
        .map(AttrValue::from)
        .or_else(|| props.current_url.clone());
    let error = (*local_error).clone().map(AttrValue::from).or_else(|| props.error.clone());

    html! {
        <div class={if error.is_some() { "form-group image-picker has-error" } else { "form-group image-picker" }}>
            <label>{"Image"}</label>
            if let Some(src) = shown {
                <div class="image-preview">
                    <img src={src} alt="Aperçu" />
                    if preview.is_some() {
                        <button type="button" class="btn btn-small" onclick={on_clear}>{"Annuler"}</button>
                    } else {
                        if let Some(on_remove) = &props.on_remove {
                            <button type="button" class="btn btn-small btn-danger" onclick={on_remove.reform(|_| ())}>
                                {"Supprimer l'image"}
                            </button>
                        }
                    }
                </div>
            }
            <input type="file" accept="image/*" {onchange} disabled={*processing} />
            if *processing {
                <span class="hint">{"Compression en cours..."}</span>
            }
            if let Some(error) = error {
                <span class="field-error">{error}</span>
            }
        </div>
    }
}

/// Lee → valida el original → comprime; si la compresión falla se sube el original
async fn prepare(file: web_sys::File) -> Result<ImageFile, String> {
    let original = image::read_file(file).await?;
    let violations = image::validate(&original);
    if !violations.is_empty() {
        return Err(violations.join(". "));
    }

    match image::compress(&original, CONFIG.image_config.quality).await {
        Ok(compressed) => {
            log::info!("🖼️ {} : {} → {} octets", original.name, original.size(), compressed.size());
            Ok(compressed)
        }
        Err(e) => {
            log::warn!("⚠️ Compresión fallida, se usa el original: {}", e);
            Ok(original)
        }
    }
}
