// ============================================================================
// AUTH SERVICE - Endpoints /auth/* (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::MessageResponse;
use crate::models::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ProfileUpdate, RegisterRequest, ResetPasswordRequest,
    User, UserResponse, VerifyResetCodeRequest, VerifyResetCodeResponse,
};
use crate::services::error::ApiError;
use crate::services::gateway::{Gateway, RequestOptions};
use crate::services::transport::{HttpMethod, RequestBody};

#[derive(Clone)]
pub struct AuthService {
    gateway: Rc<Gateway>,
}

impl AuthService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        log::info!("🔐 Login: {}", credentials.email);
        self.gateway.post("/auth/login", credentials).await
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        log::info!("📝 Registro: {}", data.email);
        self.gateway.post("/auth/register", data).await
    }

    /// Best-effort: sin toasts si falla
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Post, "/auth/logout", RequestOptions::silent())
            .await
    }

    /// Perfil actual; silencioso porque se usa al arrancar
    pub async fn me(&self) -> Result<User, ApiError> {
        let response: UserResponse = self
            .gateway
            .request(HttpMethod::Get, "/auth/me", RequestBody::Empty, RequestOptions::silent())
            .await?;
        Ok(response.user)
    }

    pub async fn update_profile(&self, data: &ProfileUpdate) -> Result<UserResponse, ApiError> {
        self.gateway.put("/auth/profile", data).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        log::info!("✉️ Solicitando código de reseteo para {}", email);
        self.gateway
            .post("/auth/forgot-password", &ForgotPasswordRequest { email: email.to_string() })
            .await
    }

    pub async fn verify_reset_code(&self, email: &str, code: &str) -> Result<VerifyResetCodeResponse, ApiError> {
        let request = VerifyResetCodeRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.gateway.post("/auth/verify-reset-code", &request).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
        self.gateway.post("/auth/reset-password", request).await
    }
}
