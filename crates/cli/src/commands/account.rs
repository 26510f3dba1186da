//! Account commands: login, registration, profile and generators.

use std::io::Write;

use clap::Args;
use homestore_storefront::Storefront;
use homestore_storefront::pages::AccountPage;
use homestore_storefront::services::{LoginForm, ProfileForm, RegistrationForm};
use secrecy::SecretString;

use super::{CliError, report};
use crate::render;

#[derive(Args)]
pub struct RegisterArgs {
    /// `+375 (29) 123-45-67`
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    birthdate: String,
    #[arg(long)]
    password: String,
    /// Repeat the password
    #[arg(long)]
    confirm: String,
    #[arg(long)]
    first: String,
    #[arg(long)]
    last: String,
    #[arg(long, default_value = "")]
    middle: String,
    /// Generated from first and last name when omitted
    #[arg(long)]
    nickname: Option<String>,
    /// Accept the user agreement
    #[arg(long)]
    agree: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    birthdate: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    first: Option<String>,
    #[arg(long)]
    last: Option<String>,
    #[arg(long)]
    middle: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
}

impl ProfileArgs {
    fn apply_to(self, form: &mut ProfileForm) {
        let fields = [
            (self.phone, &mut form.phone),
            (self.email, &mut form.email),
            (self.birthdate, &mut form.birthdate),
            (self.first, &mut form.first_name),
            (self.last, &mut form.last_name),
            (self.middle, &mut form.middle_name),
            (self.nickname, &mut form.nickname),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(password) = self.password {
            form.password = SecretString::from(password);
        }
    }
}

pub async fn login(store: &Storefront, login: String, password: String) -> Result<(), CliError> {
    let form = LoginForm {
        login,
        password: SecretString::from(password),
    };
    report(&store.account().login(&form).await)
}

pub async fn logout(store: &Storefront) -> Result<(), CliError> {
    report(&store.account().logout().await)
}

pub async fn register(store: &Storefront, args: RegisterArgs) -> Result<(), CliError> {
    let account = store.account();
    let nickname = match args.nickname {
        Some(nickname) => nickname,
        None => {
            let nickname = account
                .suggest_nickname(&mut rand::rng(), &args.first, &args.last)
                .await
                .map_err(|alert| CliError::Refused(alert.message))?;
            writeln!(std::io::stdout().lock(), "Nickname: {nickname}")?;
            nickname
        }
    };

    let form = RegistrationForm {
        profile: ProfileForm {
            phone: args.phone,
            email: args.email,
            birthdate: args.birthdate,
            password: SecretString::from(args.password),
            first_name: args.first,
            last_name: args.last,
            middle_name: args.middle,
            nickname,
        },
        password_confirm: SecretString::from(args.confirm),
        agreement: args.agree,
    };
    report(&account.register(&form).await)
}

pub async fn show_profile(store: &Storefront) -> Result<(), CliError> {
    let session = store.session().await;
    let user = store.account().profile(session.as_ref()).await?;
    render::profile(&mut std::io::stdout().lock(), &user)?;
    Ok(())
}

pub async fn update_profile(store: &Storefront, args: ProfileArgs) -> Result<(), CliError> {
    let session = store.session().await;
    let account = store.account();
    let user = account.profile(session.as_ref()).await?;

    let mut form = ProfileForm::from_user(&user);
    args.apply_to(&mut form);
    report(&account.update_profile(session.as_ref(), &form).await)
}

pub fn generate_password() -> Result<(), CliError> {
    writeln!(std::io::stdout().lock(), "{}", AccountPage::suggest_password())?;
    Ok(())
}

pub async fn generate_nickname(store: &Storefront, first: &str, last: &str) -> Result<(), CliError> {
    let nickname = store
        .account()
        .suggest_nickname(&mut rand::rng(), first, last)
        .await
        .map_err(|alert| CliError::Refused(alert.message))?;
    writeln!(std::io::stdout().lock(), "{nickname}")?;
    Ok(())
}
