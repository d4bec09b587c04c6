use color_eyre::eyre::Result;
use envirolens_auth::{
    directory::Area,
    registration::{RegisterForm, RegistrationError},
    AuthClientExt,
};
use envirolens_cli::text_prompt_when_none;
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::{AuthContext, RegisterArgs};
use crate::render::{CommandOutput, CommandResult};

pub(crate) async fn register(context: AuthContext, args: RegisterArgs) -> CommandResult {
    let form = if context.interactive {
        prompt_form(args)?
    } else {
        let password = args.password.unwrap_or_default();
        RegisterForm {
            name: args.name.unwrap_or_default(),
            username: args.username.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            confirm_password: Zeroizing::new(password.clone()),
            password: Zeroizing::new(password),
            area: args.area,
            accept_terms: args.accept_terms,
        }
    };

    let user = context
        .client
        .auth_new()
        .registration()
        .register(&form)
        .await?;
    info!(uid = %user.uid, username = %form.username, "Account created");

    if let Err(e) = context.sessions.save(&context.client).await {
        warn!("Failed to save session, later commands will not be logged in: {e}");
    }
    Ok(CommandOutput::Object(Box::new(user.summary())))
}

fn prompt_form(args: RegisterArgs) -> Result<RegisterForm> {
    let name = text_prompt_when_none("Full name", args.name)?;
    let username = text_prompt_when_none("Username", args.username)?;
    let email = text_prompt_when_none("Email", args.email)?;

    let password = match args.password {
        Some(password) => password,
        None => Password::new("Password")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_custom_confirmation_message("Confirm password")
            .with_custom_confirmation_error_message(
                &RegistrationError::PasswordMismatch.to_string(),
            )
            .prompt()?,
    };

    let area = match args.area {
        Some(area) => area,
        None => Select::new("Area", Area::ALL.to_vec()).prompt()?,
    };

    let accept_terms = args.accept_terms
        || Confirm::new("Do you accept the terms and privacy policy?")
            .with_default(false)
            .prompt()?;

    Ok(RegisterForm {
        name,
        username,
        email,
        confirm_password: Zeroizing::new(password.clone()),
        password: Zeroizing::new(password),
        area: Some(area),
        accept_terms,
    })
}
