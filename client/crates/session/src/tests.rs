//! Unit tests for the session crate

#[cfg(test)]
mod store_tests {
    use std::sync::Arc;

    use gateway::testing::{FakeGateway, Operation};
    use platform::secret::ClearTextPassword;

    use crate::{ErrorKind, SessionError, SessionStore};

    fn store() -> (Arc<FakeGateway>, SessionStore<FakeGateway>) {
        let gateway = Arc::new(FakeGateway::new().with_account("ash@example.com", "pikachu"));
        (gateway.clone(), SessionStore::new(gateway))
    }

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw)
    }

    #[tokio::test]
    async fn test_login_stores_credential() {
        let (_, mut store) = store();
        assert!(!store.is_authenticated());

        let credential = store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();
        assert_eq!(credential.email(), "ash@example.com");
        assert_eq!(credential.token().expose(), "token-1");
        assert_eq!(store.token().unwrap().expose(), "token-1");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_credential() {
        let (_, mut store) = store();
        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();

        let err = store
            .login("ash@example.com", password("raichu"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(store.token().unwrap().expose(), "token-1");
    }

    #[tokio::test]
    async fn test_second_login_replaces_credential() {
        let (gateway, mut store) = store();
        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();
        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();

        assert_eq!(store.token().unwrap().expose(), "token-2");
        assert_eq!(gateway.calls(Operation::Authenticate), 2);
    }

    #[tokio::test]
    async fn test_register_surfaces_service_message() {
        let (gateway, mut store) = store();

        let output = store
            .register("misty@example.com", password("starmie"))
            .await
            .unwrap();
        assert_eq!(output.message, "Utilisateur créé");
        // Registering does not sign in
        assert!(!store.is_authenticated());

        let err = store
            .register("ash@example.com", password("pikachu"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "[Invalid input] Email déjà utilisé");

        store
            .login("misty@example.com", password("starmie"))
            .await
            .unwrap();
        assert_eq!(gateway.calls(Operation::Register), 2);
    }

    #[tokio::test]
    async fn test_logout_and_invalidate() {
        let (_, mut store) = store();
        assert!(!store.logout());

        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();
        assert!(store.logout());
        assert!(store.credential().is_none());

        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();
        assert!(store.invalidate("Invalid or expired token"));
        assert!(!store.invalidate("Invalid or expired token"));
    }

    #[tokio::test]
    async fn test_require_token() {
        let (_, mut store) = store();
        assert!(matches!(store.require_token(), Err(SessionError::NotSignedIn)));

        store
            .login("ash@example.com", password("pikachu"))
            .await
            .unwrap();
        assert!(store.require_token().is_ok());
    }
}
