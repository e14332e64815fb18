//! Bearer token augmentation.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use kmtracker_core::error::InvalidInputError;
use kmtracker_core::{AccessToken, CredentialStore, Result};

use crate::request::ApiRequest;

/// Set `Authorization: Bearer <token>` if a token is given; otherwise leave
/// the headers untouched.
///
/// Any existing authorization header is replaced, so applying the same token
/// twice yields the same header.
pub fn authorize(headers: &mut HeaderMap, token: Option<&AccessToken>) -> Result<()> {
    let Some(token) = token else {
        return Ok(());
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|_| InvalidInputError::Token)?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// A descriptor ready for dispatch, with the token it was augmented with.
#[derive(Debug)]
pub(crate) struct Augmented {
    pub request: ApiRequest,
    pub token: Option<AccessToken>,
}

/// Augment a copy of `request` with the store's current access token.
pub(crate) fn augment(request: &ApiRequest, store: &dyn CredentialStore) -> Result<Augmented> {
    with_token(request, store.access_token())
}

/// Augment a copy of `request` with an explicit token.
pub(crate) fn with_token(request: &ApiRequest, token: Option<AccessToken>) -> Result<Augmented> {
    let mut request = request.clone();
    authorize(request.headers_mut(), token.as_ref())?;
    Ok(Augmented { request, token })
}
