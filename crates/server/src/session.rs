//! Resolving access tokens into `Session`s.

use shared_types::{Collection, Profile, Session};

use crate::gateway::{
    select_rows, AuthIdentity, Gateway, GatewayError, Query, SessionProvider, TokenGrant,
};

/// Load the `profiles` row for `user_id`. Read failures degrade to `None`.
async fn load_profile(gateway: &dyn Gateway, user_id: uuid::Uuid, auth: &str) -> Option<Profile> {
    let query = Query::select(Collection::Profiles).eq("id", user_id).limit(1);
    match select_rows::<Profile>(gateway, &query, Some(auth)).await {
        Ok(rows) => rows.into_iter().next(),
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "profile lookup failed; defaulting role to guest");
            None
        }
    }
}

/// Combine an auth identity with its profile row. No row means role `Guest`.
pub fn build_session(identity: AuthIdentity, profile: Option<Profile>) -> Session {
    let (role, display_name, profile_email) = match profile {
        Some(p) => (p.role, p.display_name.unwrap_or_default(), p.email),
        None => (Default::default(), String::new(), None),
    };
    Session {
        user_id: identity.id,
        email: identity.email.or(profile_email).unwrap_or_default(),
        role,
        display_name,
    }
}

/// Resolve the session behind `access_token`.
///
/// `Ok(None)` when the auth service rejects the token; other failures are
/// returned so callers can tell an outage from a signed-out visitor.
pub async fn resolve_session(
    gateway: &dyn Gateway,
    sessions: &dyn SessionProvider,
    access_token: &str,
) -> Result<Option<Session>, GatewayError> {
    let identity = match sessions.identity(access_token).await {
        Ok(identity) => identity,
        Err(e) if e.is_auth_rejection() => return Ok(None),
        Err(e) => return Err(e),
    };
    let profile = load_profile(gateway, identity.id, access_token).await;
    Ok(Some(build_session(identity, profile)))
}

/// Password sign-in. Returns the grant (for cookies) and the resolved session.
pub async fn sign_in(
    gateway: &dyn Gateway,
    sessions: &dyn SessionProvider,
    email: &str,
    password: &str,
) -> Result<(TokenGrant, Session), GatewayError> {
    let grant = sessions.sign_in(email, password).await?;
    let identity = match grant.user.clone() {
        Some(identity) => identity,
        None => sessions.identity(&grant.access_token).await?,
    };
    let profile = load_profile(gateway, identity.id, &grant.access_token).await;
    Ok((grant, build_session(identity, profile)))
}
