use clap::{Args, Parser, Subcommand};
use envirolens_cli::Color;
use envirolens_core::ClientSettings;

use crate::{
    auth::{LoginArgs, RegisterArgs},
    render::Output,
};

#[derive(Parser, Clone)]
#[command(name = "EnviroLens CLI", version, about = "EnviroLens CLI", long_about = None, disable_version_flag = true)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::JSON)]
    pub output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    #[command(flatten)]
    pub server: ServerArgs,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Don't return anything to stdout."
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Do not prompt for interactive user input."
    )]
    pub nointeraction: bool,

    #[arg(
        long,
        global = true,
        env = "ENVIROLENS_PROFILE",
        default_value = "envirolens",
        help = "Keyring account holding the session and the cached credential."
    )]
    pub profile: String,

    #[arg(short = 'v', long, action = clap::builder::ArgAction::Version)]
    pub version: (),
}

/// Where the identity toolkit and the document store are reached.
#[derive(Args, Clone, Debug, Default)]
pub struct ServerArgs {
    #[arg(
        long,
        global = true,
        env = "ENVIROLENS_API_KEY",
        hide_env_values = true,
        help = "Web api key of the project."
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        global = true,
        env = "ENVIROLENS_PROJECT_ID",
        help = "Project holding the user profiles."
    )]
    pub project_id: Option<String>,

    #[arg(
        long,
        global = true,
        env = "ENVIROLENS_IDENTITY_URL",
        help = "Identity toolkit base url."
    )]
    pub identity_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "ENVIROLENS_FIRESTORE_URL",
        help = "Document store base url."
    )]
    pub firestore_url: Option<String>,
}

impl ServerArgs {
    pub fn client_settings(&self) -> ClientSettings {
        let mut settings = ClientSettings {
            api_key: self.api_key.clone().unwrap_or_default(),
            project_id: self.project_id.clone().unwrap_or_default(),
            client_version: Some(format!("cli/{}", env!("CARGO_PKG_VERSION"))),
            ..Default::default()
        };
        if let Some(url) = &self.identity_url {
            settings.identity_url = url.clone();
        }
        if let Some(url) = &self.firestore_url {
            settings.firestore_url = url.clone();
        }
        settings
    }
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Log into a user account with a username and password.")]
    Login(LoginArgs),

    #[command(
        long_about = "Log in again with the credential cached by the last password login, after confirming your presence."
    )]
    Unlock,

    #[command(long_about = "Register a new user account.")]
    Register(RegisterArgs),

    #[command(long_about = "Log out of the current user account.")]
    Logout {
        #[arg(long, help = "Also delete the credential cached for `unlock`.")]
        forget: bool,
    },

    #[command(long_about = "Generate shell completions.")]
    Completion {
        #[arg(long, help = "The shell to generate completions for.")]
        shell: Option<clap_complete::Shell>,
    },
}
