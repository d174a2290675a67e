// ============================================================================
// CONSTANTES - Valores fijos compartidos por gateway, imágenes y wizard
// ============================================================================

/// Prefijo de ruta de la API REST
pub const API_PREFIX: &str = "/api";

/// Tamaño máximo de una imagen antes de subirla (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Ningún lado de una imagen comprimida supera este valor
pub const MAX_IMAGE_DIMENSION: u32 = 800;

/// Vida del código de reseteo de contraseña (15 minutos)
pub const RESET_CODE_TTL_SECONDS: u32 = 15 * 60;

/// Longitud del código de verificación
pub const RESET_CODE_LENGTH: usize = 6;

/// Longitud mínima de contraseña
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Mensaje genérico cuando el backend no envía `message`
pub const FALLBACK_ERROR_MESSAGE: &str = "Une erreur est survenue";
