//! Servicio de autenticación
//!
//! Las cuentas del dashboard viven en memoria con sus hashes bcrypt. El
//! almacén se construye una vez al arrancar y se comparte inmutable.

use std::collections::HashMap;
use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::models::auth::{UserInfo, UserRole};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct Account {
    name: String,
    role: UserRole,
    password_hash: String,
}

/// Cuentas de demostración: (email, password, nombre, rol)
const DEMO_ACCOUNTS: [(&str, &str, &str, UserRole); 4] = [
    ("manager@fleetflow.com", "manager123", "Manager Account", UserRole::Manager),
    ("dispatcher@fleetflow.com", "dispatcher123", "Dispatcher Account", UserRole::Dispatcher),
    ("safety@fleetflow.com", "safety123", "Safety Officer", UserRole::SafetyOfficer),
    ("finance@fleetflow.com", "finance123", "Financial Analyst", UserRole::FinancialAnalyst),
];

#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    accounts: HashMap<String, Account>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Almacén con las cuatro cuentas de demostración hasheadas con `cost`
    pub fn with_demo_accounts(cost: u32) -> AppResult<Self> {
        let mut store = Self::new();
        for (email, password, name, role) in DEMO_ACCOUNTS {
            store.add_account(email, password, name, role, cost)?;
        }
        tracing::info!("🔐 {} cuentas de demostración cargadas", store.len());
        Ok(store)
    }

    pub fn add_account(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
        cost: u32,
    ) -> AppResult<()> {
        let password_hash =
            hash(password, cost).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        self.accounts.insert(
            normalize_email(email),
            Account {
                name: name.to_string(),
                role,
                password_hash,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Verifica email y password; cualquier discrepancia es el mismo 401
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<UserInfo> {
        let email = normalize_email(email);
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let account = self.accounts.get(&email).ok_or_else(invalid)?;

        let matches = verify(password, &account.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !matches {
            return Err(invalid());
        }

        Ok(UserInfo {
            email,
            name: account.name.clone(),
            role: account.role,
        })
    }
}

/// Corre `authenticate` en el pool bloqueante de tokio
pub async fn authenticate_off_thread(
    store: Arc<CredentialStore>,
    email: String,
    password: String,
) -> AppResult<UserInfo> {
    tokio::task::spawn_blocking(move || store.authenticate(&email, &password))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        CredentialStore::with_demo_accounts(4).unwrap()
    }

    #[test]
    fn test_demo_accounts_authenticate() {
        let store = store();
        assert_eq!(store.len(), 4);

        let user = store.authenticate("dispatcher@fleetflow.com", "dispatcher123").unwrap();
        assert_eq!(user.role, UserRole::Dispatcher);
        assert_eq!(user.name, "Dispatcher Account");
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let user = store().authenticate("  Finance@FleetFlow.com ", "finance123").unwrap();
        assert_eq!(user.email, "finance@fleetflow.com");
        assert_eq!(user.role, UserRole::FinancialAnalyst);
    }

    #[tokio::test]
    async fn test_authenticate_off_thread() {
        let store = Arc::new(store());

        let user = authenticate_off_thread(store.clone(), "safety@fleetflow.com".into(), "safety123".into())
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::SafetyOfficer);

        let denied = authenticate_off_thread(store, "safety@fleetflow.com".into(), "wrong".into()).await;
        assert!(matches!(denied, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_password_and_unknown_email_are_unauthorized() {
        let store = store();
        assert!(matches!(
            store.authenticate("manager@fleetflow.com", "nope"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            store.authenticate("ghost@fleetflow.com", "manager123"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
