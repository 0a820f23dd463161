use clap::Args;

use crate::auth::JwtSettings;

pub const DEFAULT_DATABASE: &str = "recipes.db";

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[clap(short, long, env = "RECIPES_PORT", default_value = "3000")]
    pub port: u16,
    /// SQLite file path, or `:memory:`
    #[clap(short, long, env = "RECIPES_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,
    #[clap(long, env = "RECIPES_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
    #[clap(flatten)]
    pub jwt: JwtArgs,
}

#[derive(Args, Debug, Clone)]
pub struct JwtArgs {
    /// HS256 signing secret shared with the token issuer
    #[clap(long = "jwt-secret", env = "RECIPES_JWT_SECRET", hide_env_values = true)]
    pub secret: String,
    /// Clock skew tolerated when checking `exp`, in seconds
    #[clap(long = "jwt-leeway", env = "RECIPES_JWT_LEEWAY", default_value = "0")]
    pub leeway: u64,
    #[clap(long = "jwt-audience", env = "RECIPES_JWT_AUDIENCE")]
    pub audience: Option<String>,
    #[clap(long = "jwt-issuer", env = "RECIPES_JWT_ISSUER")]
    pub issuer: Option<String>,
}

impl JwtArgs {
    pub fn settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.secret.clone(),
            leeway_secs: self.leeway,
            audience: self.audience.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateUserArgs {
    #[clap(short, long)]
    pub username: String,
    #[clap(short, long, env = "RECIPES_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,
}
