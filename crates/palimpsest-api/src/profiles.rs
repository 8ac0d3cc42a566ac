//! Handlers for `/profiles` endpoints.
//!
//! Profiles are reached through the account's social record; an account
//! without a social record or without a profile is a 404.

use axum::{
  Json,
  extract::{Path, State},
};
use palimpsest_core::{
  account::AccountId,
  content::ProfileContent,
  entity::Profile,
  store::{ChainQuery, ContentStore},
  view::{HistoryEntry, profile_history},
};

use crate::{ApiState, error::ApiError};

async fn find<S: ChainQuery>(chain: &S, account: &AccountId) -> Result<Profile, ApiError> {
  chain
    .social_account_by_id(account)
    .await
    .map_err(|e| ApiError::Chain(Box::new(e)))?
    .and_then(|social| social.profile)
    .ok_or_else(|| ApiError::NotFound(format!("profile {account} not found")))
}

/// `GET /profiles/:account`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(account): Path<AccountId>,
) -> Result<Json<Profile>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  Ok(Json(find(state.chain.as_ref(), &account).await?))
}

/// `GET /profiles/:account/history`
pub async fn history<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(account): Path<AccountId>,
) -> Result<Json<Vec<HistoryEntry<ProfileContent>>>, ApiError>
where
  S: ChainQuery,
  C: ContentStore,
{
  let profile = find(state.chain.as_ref(), &account).await?;
  let entries = profile_history(state.content.as_ref(), &profile).await;
  Ok(Json(entries.unwrap_or_default()))
}
