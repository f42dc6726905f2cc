use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{CalculationCreate, CalculationRequest};
use super::repo;
use super::repo_types::{Calculation, NewCalculation};
use crate::auth::repo_types::User;
use crate::error::ApiError;

/// Validates, checks the owner exists, then persists. Rejected input never reaches the database.
pub async fn create_calculation(
    db: &PgPool,
    request: CalculationRequest,
    owner: Option<Uuid>,
) -> Result<Calculation, ApiError> {
    let input = CalculationCreate::validate(request).map_err(|e| {
        warn!(error = %e, "calculation rejected");
        e
    })?;

    if let Some(user_id) = owner {
        if User::find_by_id(db, user_id).await?.is_none() {
            warn!(%user_id, "owner does not exist");
            return Err(ApiError::Unauthorized("User not found".into()));
        }
    }

    let new = NewCalculation::new(input, owner);
    debug!(id = %new.id, kind = %new.kind, "inserting calculation");
    let calc = repo::insert(db, &new).await?;
    Ok(calc)
}

/// Explicit lookup of the owning user; nothing is joined when the calculation is loaded.
pub async fn load_owner(db: &PgPool, calc: &Calculation) -> anyhow::Result<Option<User>> {
    match calc.user_id {
        Some(user_id) => User::find_by_id(db, user_id).await,
        None => Ok(None),
    }
}

/// Anonymous calculations are public; owned ones are visible only to their owner.
pub fn is_visible_to(calc: &Calculation, viewer: Option<Uuid>) -> bool {
    match calc.user_id {
        None => true,
        Some(owner) => viewer == Some(owner),
    }
}
