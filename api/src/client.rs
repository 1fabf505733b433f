//! Typed facade over the backend REST endpoints.
//!
//! ARCHITECTURE
//! ============
//! Each operation builds an [`HttpRequest`], runs it through the session
//! resolver (request interceptor), sends it once through the [`Transport`],
//! rejects non-2xx statuses unchanged (response interceptor), and decodes
//! the envelope. No retries, backoff, or deduplication: concurrent calls
//! resolve in whatever order the network delivers them.
//!
//! ERROR HANDLING
//! ==============
//! Every failure propagates to the caller as an [`ApiError`]; only token
//! resolution degrades silently.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::envelope::{decode_data, decode_unit};
use crate::error::ApiError;
use crate::session::{IdentityProvider, SessionResolver};
use crate::store::CredentialStore;
use crate::transport::{HttpBody, HttpRequest, Transport};
use crate::types::{
    AddPetBody, AdoptionRequest, AdoptionRequestBody, ForgetPasswordBody, Foundation, LoginRequest, LoginResponse,
    NewsItem, PersonalityAnswerBody, PersonalityQuestion, Pet, PetListQuery, PetMetadata, RegisterFoundationBody,
    RegisterGeneralBody, UpdateUserBody, UploadedImage, UserInfo, UserSnapshot,
};

/// Multipart field name the upload endpoint expects.
pub const UPLOAD_FIELD: &str = "file";

pub struct ApiClient<T, P, S> {
    transport: T,
    resolver: SessionResolver<P, S>,
}

impl<T: Transport, P: IdentityProvider, S: CredentialStore> ApiClient<T, P, S> {
    pub fn new(transport: T, provider: P, store: S) -> Self {
        Self { transport, resolver: SessionResolver::new(provider, store) }
    }

    pub fn store(&self) -> &S {
        self.resolver.store()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, mut request: HttpRequest) -> Result<String, ApiError> {
        self.resolver.authorize(&mut request).await;
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }
        if response.status == 401 {
            log::info!("{} {path} rejected as unauthorized", method.as_str());
        } else {
            log::warn!("{} {path} failed with status {}", method.as_str(), response.status);
        }
        Err(ApiError::Status { status: response.status, body: response.body })
    }

    async fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let body = self.execute(request).await?;
        decode_data(&body)
    }

    async fn fetch_unit(&self, request: HttpRequest) -> Result<(), ApiError> {
        let body = self.execute(request).await?;
        decode_unit(&body)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.fetch(HttpRequest::post("/auth/login").with_body(json_body(body)?)).await
    }

    /// `POST /auth/register/general`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn register_general(&self, body: &RegisterGeneralBody) -> Result<UserInfo, ApiError> {
        self.fetch(HttpRequest::post("/auth/register/general").with_body(json_body(body)?)).await
    }

    /// `POST /auth/register/foundation`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn register_foundation(&self, body: &RegisterFoundationBody) -> Result<UserInfo, ApiError> {
        self.fetch(HttpRequest::post("/auth/register/foundation").with_body(json_body(body)?)).await
    }

    /// `POST /auth/forget-password`; returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn forget_password(&self, body: &ForgetPasswordBody) -> Result<String, ApiError> {
        self.fetch(HttpRequest::post("/auth/forget-password").with_body(json_body(body)?)).await
    }

    /// Log in and persist the issued token plus user snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`login`](Self::login) failures; nothing is persisted then.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserSnapshot, ApiError> {
        let request = LoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
        let response = self.login(&request).await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_owned()));
        }
        let snapshot = UserSnapshot::from_metadata(&response.user_metadata);
        self.store().write(&response.token, &snapshot);
        log::info!("signed in as user {} ({})", snapshot.id, snapshot.user_type.as_str());
        Ok(snapshot)
    }

    /// Forget the local session.
    pub fn sign_out(&self) {
        self.store().clear();
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// `GET /user/info`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn user_info(&self) -> Result<UserInfo, ApiError> {
        self.fetch(HttpRequest::get("/user/info")).await
    }

    /// `POST /user`; returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn update_user(&self, body: &UpdateUserBody) -> Result<String, ApiError> {
        self.fetch(HttpRequest::post("/user").with_body(json_body(body)?)).await
    }

    /// Re-read `/user/info` and rewrite the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`user_info`](Self::user_info) failures.
    pub async fn refresh_profile(&self) -> Result<UserSnapshot, ApiError> {
        let info = self.user_info().await?;
        let snapshot = UserSnapshot::from_info(&info);
        match self.resolver.resolve().await {
            Some(token) => self.store().write(&token, &snapshot),
            None => log::warn!("profile refreshed without a session token; snapshot not persisted"),
        }
        Ok(snapshot)
    }

    /// Apply a profile edit, then refresh the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`update_user`](Self::update_user) and
    /// [`refresh_profile`](Self::refresh_profile) failures.
    pub async fn update_profile(&self, body: &UpdateUserBody) -> Result<UserSnapshot, ApiError> {
        self.update_user(body).await?;
        self.refresh_profile().await
    }

    /// `GET /user/adoption-request`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn adoption_requests(&self) -> Result<Vec<AdoptionRequest>, ApiError> {
        self.fetch(HttpRequest::get("/user/adoption-request")).await
    }

    // =========================================================================
    // PETS
    // =========================================================================

    /// `GET /pet/list`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn list_pets(&self, query: &PetListQuery) -> Result<Vec<Pet>, ApiError> {
        self.fetch(HttpRequest::get("/pet/list").with_query(query.to_pairs())).await
    }

    /// `GET /pet/{id}/info`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn pet_detail(&self, pet_id: &str) -> Result<Pet, ApiError> {
        self.fetch(HttpRequest::get(format!("/pet/{}/info", urlencoding::encode(pet_id)))).await
    }

    /// `GET /pet/suggest`. Fails with an application error matching
    /// [`ApiError::needs_personality_quiz`] until the quiz is completed.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn suggested_pets(&self) -> Result<Vec<PetMetadata>, ApiError> {
        self.fetch(HttpRequest::get("/pet/suggest")).await
    }

    /// `POST /pet`.
    ///
    /// # Errors
    ///
    /// Any transport or application failure.
    pub async fn create_pet(&self, body: &AddPetBody) -> Result<(), ApiError> {
        self.fetch_unit(HttpRequest::post("/pet").with_body(json_body(body)?)).await
    }

    /// `POST /pet/{id}/adopt`.
    ///
    /// # Errors
    ///
    /// Any transport or application failure.
    pub async fn request_adoption(&self, pet_id: &str, body: &AdoptionRequestBody) -> Result<(), ApiError> {
        let path = format!("/pet/{}/adopt", urlencoding::encode(pet_id));
        self.fetch_unit(HttpRequest::post(path).with_body(json_body(body)?)).await
    }

    /// `POST /upload` as a single-file multipart form.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, ApiError> {
        let body = HttpBody::Multipart {
            field: UPLOAD_FIELD.to_owned(),
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            bytes,
        };
        self.fetch(HttpRequest::post("/upload").with_body(body)).await
    }

    // =========================================================================
    // FOUNDATIONS, QUIZ, NEWS
    // =========================================================================

    /// `GET /foundation/list`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn list_foundations(&self) -> Result<Vec<Foundation>, ApiError> {
        self.fetch(HttpRequest::get("/foundation/list")).await
    }

    /// `GET /foundation/{id}/info`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn foundation_info(&self, foundation_id: &str) -> Result<Foundation, ApiError> {
        self.fetch(HttpRequest::get(format!("/foundation/{}/info", urlencoding::encode(foundation_id))))
            .await
    }

    /// `GET /personality/question`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn personality_questions(&self) -> Result<Vec<PersonalityQuestion>, ApiError> {
        self.fetch(HttpRequest::get("/personality/question")).await
    }

    /// `POST /personality/answer`.
    ///
    /// # Errors
    ///
    /// Any transport or application failure.
    pub async fn submit_personality(&self, body: &PersonalityAnswerBody) -> Result<(), ApiError> {
        self.fetch_unit(HttpRequest::post("/personality/answer").with_body(json_body(body)?)).await
    }

    /// `GET /news/list`.
    ///
    /// # Errors
    ///
    /// Any transport, application, or decode failure.
    pub async fn list_news(&self) -> Result<Vec<NewsItem>, ApiError> {
        self.fetch(HttpRequest::get("/news/list")).await
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<HttpBody, ApiError> {
    serde_json::to_value(body)
        .map(HttpBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}
