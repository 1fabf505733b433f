//! Authenticated access layer for the PawHome adoption backend.
//!
//! This crate owns everything the `client` and `cli` crates share when they
//! talk to the REST backend: the response envelope, wire DTOs, the persisted
//! credential store, session-token resolution, and the typed request facade.
//! It has no browser or runtime dependencies; platforms plug in through the
//! [`StorageBackend`], [`IdentityProvider`] and [`Transport`] seams.

pub mod client;
pub mod envelope;
pub mod error;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use error::{ApiError, IdentityError, QUIZ_REQUIRED_MESSAGE};
pub use session::{IdentityProvider, NoIdentityProvider, SessionResolver, looks_like_jwt};
pub use store::{
    CredentialStore, MemoryBackend, PersistedCredentialStore, StorageBackend, StoredCredentials, SubscriptionId,
};
pub use transport::{HttpBody, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{
    AddPetBody, AdoptionRequest, AdoptionRequestBody, AdoptionStatus, ForgetPasswordBody, Foundation, LoginRequest,
    LoginResponse, NewsItem, PersonalityAnswer, PersonalityAnswerBody, PersonalityChoice, PersonalityQuestion, Pet,
    PetListQuery, PetMetadata, RegisterFoundationBody, RegisterGeneralBody, Role, UpdateUserBody, UploadedImage,
    UserInfo, UserMetadata, UserSnapshot,
};
