//! Player registration.

use std::sync::Arc;

use lootforge_domain::{User, Username};

use crate::infrastructure::ports::{ClockPort, EconomyStore};
use crate::use_cases::finish;

use super::error::ManagementError;

/// Register a new player with default draft thresholds.
pub struct RegisterUser {
    store: Arc<dyn EconomyStore>,
    clock: Arc<dyn ClockPort>,
}

impl RegisterUser {
    pub fn new(store: Arc<dyn EconomyStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, username: &str) -> Result<User, ManagementError> {
        let username = Username::new(username)?;
        let user = User::new(username, self.clock.now());

        let mut uow = self.store.begin().await?;
        let result = match uow.insert_user(&user).await {
            Ok(()) => Ok(user),
            Err(e) if e.is_constraint_violation() => Err(ManagementError::DuplicateUsername(
                user.username().to_string(),
            )),
            Err(e) => Err(e.into()),
        };
        let user = finish(uow, result).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(user)
    }
}
