#[cfg(test)]
mod test {
    use secrecy::ExposeSecret;

    use crate::error::{CredentialsError, ErrorKind, TokenError};
    use crate::sources::credentials::read_credentials;
    use crate::tests::common::*;

    #[tokio::test]
    async fn reads_user_and_client() {
        let dir = credentials_dir();
        let (user, client) = read_credentials(dir.path()).await.unwrap();
        assert_eq!(user.username, "app");
        assert_eq!(user.password.expose_secret(), "pass");
        assert_eq!(client.client_id, "cid");
        assert_eq!(client.client_secret.expose_secret(), "sec");
        assert!(!format!("{:?}", client).contains("sec\""));
    }

    #[tokio::test]
    async fn malformed_client_file_is_named() {
        let dir = credentials_dir();
        write_file(dir.path(), "client.json", "invalid");

        let err = read_credentials(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        match err {
            TokenError::InvalidCredentials(CredentialsError::Unreadable { path, .. }) => {
                assert_eq!(path, dir.path().join("client.json"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_user_file_is_named() {
        let dir = credentials_dir();
        write_file(dir.path(), "user.json", "invalid");

        let err = read_credentials(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("user.json"), "{}", err);
    }

    #[tokio::test]
    async fn missing_files_are_invalid_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_credentials(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert!(err.to_string().starts_with("Invalid OAuth credentials: Failed to read"));
    }

    #[tokio::test]
    async fn missing_client_key_is_named() {
        let dir = credentials_dir();
        write_file(dir.path(), "client.json", &json!({"client_id": "cid"}).to_string());

        let err = read_credentials(dir.path()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid OAuth credentials: Missing key: 'client_secret'");
    }
}
