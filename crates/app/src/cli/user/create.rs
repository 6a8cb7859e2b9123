use std::sync::Arc;

use clap::Args;
use storefront_app::{
    database,
    domain::users::{
        StoreUsersService, UsersService,
        data::NewUser,
        records::{Role, UserUuid},
        repository::PgUsersRepository,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address; must be unique
    #[arg(long)]
    email: String,

    /// One of `user`, `admin` or `staff`
    #[arg(long, default_value = "user")]
    role: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let role = args
        .role
        .parse::<Role>()
        .map_err(|error| error.to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = StoreUsersService::new(Arc::new(PgUsersRepository::new(pool)));

    let user = service
        .create_user(NewUser {
            uuid: args
                .user_uuid
                .map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: args.name,
            email: args.email,
            role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
