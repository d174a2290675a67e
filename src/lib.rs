// ============================================================================
// PARC MACHINES ADMIN - Cliente SPA (Yew + WASM) de la API de mantenimiento
// ============================================================================
// Capas:
// - Services: SOLO comunicación HTTP (Gateway + un servicio por recurso)
// - State: SessionStore y ToastStore reactivos (Rc<RefCell>)
// - ViewModels: validación y resultados de cada pantalla, sin DOM
// - Hooks / Components / Views: Yew
// - Models: DTOs tipados compartidos con el backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod routes;
pub mod utils;
pub mod viewmodels;
pub mod hooks;
pub mod components;
pub mod views;

pub use components::App;
