// ============================================================================
// IMÁGENES - Validación, compresión (canvas) y preview antes de subir
// ============================================================================
// validate/scaled_dimensions/preview son puros; read_file/compress usan APIs
// del navegador (createImageBitmap + canvas.toBlob)
// ============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::channel::oneshot;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, File, HtmlCanvasElement, ImageBitmap};

use crate::utils::constants::{MAX_IMAGE_BYTES, MAX_IMAGE_DIMENSION};

/// Imagen en memoria, lista para previsualizar o subir
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Lista de problemas legibles; vacía si la imagen es aceptable
pub fn validate(file: &ImageFile) -> Vec<String> {
    validate_image(&file.mime, file.size())
}

pub fn validate_image(mime: &str, size: u64) -> Vec<String> {
    let mut violations = Vec::new();
    if !mime.starts_with("image/") {
        violations.push("Le fichier doit être une image".to_string());
    }
    if size > MAX_IMAGE_BYTES {
        violations.push(format!(
            "L'image ne doit pas dépasser {} Mo",
            MAX_IMAGE_BYTES / (1024 * 1024)
        ));
    }
    violations
}

/// Reduce proporcionalmente para que ningún lado supere `max`
pub fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let ratio = f64::min(max as f64 / width as f64, max as f64 / height as f64);
    let scale = |side: u32| ((side as f64 * ratio).round() as u32).clamp(1, max);
    (scale(width), scale(height))
}

/// Data URL para mostrar la imagen antes de que termine el upload
pub fn preview(file: &ImageFile) -> String {
    format!("data:{};base64,{}", file.mime, STANDARD.encode(&file.bytes))
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Lee un `File` de un `<input type="file">`
pub async fn read_file(file: File) -> Result<ImageFile, String> {
    let bytes = blob_to_bytes(&file).await?;
    Ok(ImageFile {
        name: file.name(),
        mime: file.type_(),
        bytes,
    })
}

pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)
}

async fn blob_to_bytes(blob: &Blob) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(blob.array_buffer()).await.map_err(js_err)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Decodifica, reduce a `MAX_IMAGE_DIMENSION` y re-encoda con `quality` (0.0 - 1.0)
pub async fn compress(file: &ImageFile, quality: f64) -> Result<ImageFile, String> {
    let window = web_sys::window().ok_or("Sin window")?;
    let source = bytes_to_blob(&file.bytes, &file.mime)?;

    let bitmap: ImageBitmap = JsFuture::from(window.create_image_bitmap_with_blob(&source).map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;

    let (width, height) = scaled_dimensions(bitmap.width(), bitmap.height(), MAX_IMAGE_DIMENSION);
    log::info!("🖼️ Comprimiendo {} ({}x{} → {}x{})", file.name, bitmap.width(), bitmap.height(), width, height);

    let document = window.document().ok_or("Sin document")?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| js_err(e.into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or("Canvas 2d no disponible")?
        .dyn_into()
        .map_err(|e| js_err(e.into()))?;
    context
        .draw_image_with_image_bitmap_and_dw_and_dh(&bitmap, 0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?;
    bitmap.close();

    let (tx, rx) = oneshot::channel::<Option<Blob>>();
    // El closure debe vivir hasta que toBlob llame al callback
    let on_blob = Closure::once(move |value: JsValue| {
        let _ = tx.send(value.dyn_into::<Blob>().ok());
    });
    canvas
        .to_blob_with_type_and_encoder_options(
            on_blob.as_ref().unchecked_ref(),
            &file.mime,
            &JsValue::from_f64(quality.clamp(0.0, 1.0)),
        )
        .map_err(js_err)?;

    let encoded = rx
        .await
        .map_err(|_| "Compresión cancelada".to_string())?
        .ok_or("El navegador no pudo re-encodar la imagen")?;
    drop(on_blob);

    let bytes = blob_to_bytes(&encoded).await?;
    log::info!("✅ Imagen comprimida: {} → {} bytes", file.size(), bytes.len());

    Ok(ImageFile {
        name: file.name.clone(),
        mime: file.mime.clone(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_small_images() {
        assert!(validate_image("image/png", 1024).is_empty());
        assert!(validate_image("image/jpeg", MAX_IMAGE_BYTES).is_empty());
    }

    #[test]
    fn test_validate_rejects_non_images_and_large_files() {
        assert_eq!(validate_image("application/pdf", 10).len(), 1);
        assert_eq!(validate_image("image/png", MAX_IMAGE_BYTES + 1).len(), 1);
        assert_eq!(validate_image("text/plain", MAX_IMAGE_BYTES + 1).len(), 2);
        // El prefijo es estricto
        assert_eq!(validate_image("images/png", 10).len(), 1);
    }

    #[test]
    fn test_scaled_dimensions_never_exceed_max() {
        let cases = [(4000, 3000), (3000, 4000), (801, 800), (10_000, 3), (1, 5000), (1600, 1600)];
        for (w, h) in cases {
            let (nw, nh) = scaled_dimensions(w, h, 800);
            assert!(nw <= 800 && nh <= 800, "{}x{} → {}x{}", w, h, nw, nh);
            assert!(nw >= 1 && nh >= 1);
        }
    }

    #[test]
    fn test_scaled_dimensions_preserve_aspect_ratio() {
        assert_eq!(scaled_dimensions(4000, 3000, 800), (800, 600));
        assert_eq!(scaled_dimensions(1000, 2000, 800), (400, 800));

        let (nw, nh) = scaled_dimensions(1234, 567, 800);
        let original = 1234.0 / 567.0;
        let scaled = nw as f64 / nh as f64;
        assert!((original - scaled).abs() / original < 0.01);
    }

    #[test]
    fn test_small_images_keep_their_size() {
        assert_eq!(scaled_dimensions(640, 480, 800), (640, 480));
        assert_eq!(scaled_dimensions(800, 800, 800), (800, 800));
    }

    #[test]
    fn test_preview_is_a_data_url() {
        let file = ImageFile {
            name: "pompe.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(preview(&file), "data:image/png;base64,AQID");
    }
}
