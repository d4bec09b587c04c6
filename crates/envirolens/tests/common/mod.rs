use std::process::Command;

use envirolens_core::ClientSettings;

/// Create a new envirolens CLI command
pub fn envirolens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_envirolens"))
}

/// Create a command talking to the services in `settings`, never prompting
#[allow(dead_code)]
pub fn envirolens_against(settings: &ClientSettings) -> Command {
    let mut cmd = envirolens();
    cmd.env("ENVIROLENS_API_KEY", &settings.api_key)
        .env("ENVIROLENS_PROJECT_ID", &settings.project_id)
        .env("ENVIROLENS_IDENTITY_URL", &settings.identity_url)
        .env("ENVIROLENS_FIRESTORE_URL", &settings.firestore_url)
        .env("ENVIROLENS_PROFILE", test_profile())
        .env_remove("ENVIROLENS_PASSWORD")
        .arg("--nointeraction");
    cmd
}

/// Keyring account no other test run uses
#[allow(dead_code)]
pub fn test_profile() -> String {
    format!("envirolens-test-{}", std::process::id())
}
