//! Session store: the single bearer credential of the signed-in user.
//!
//! A `Session` is a cheap, cloneable handle. Every clone observes the same
//! credential, so the HTTP store and the auth client see a login or logout
//! immediately. The credential is persisted through a `CredentialStore` so
//! it survives restarts.

mod credentials;
mod manager;

#[cfg(test)]
mod tests;

pub use credentials::{
    CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use manager::{Credential, Session};
