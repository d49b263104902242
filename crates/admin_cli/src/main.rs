use std::error::Error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use chrono::{NaiveDate, Utc};
use engine::{Engine, EngineError, Role};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

mod prompt;

#[derive(Parser, Debug)]
#[command(name = "locanda_admin")]
#[command(about = "Admin utilities for Locanda (schema, users, rooms)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./locanda.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Migrate(Migrate),
    User(User),
    Room(Room),
}

#[derive(Args, Debug)]
struct Migrate {
    #[command(subcommand)]
    command: MigrateCommand,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Roll back the last applied migration.
    Down,
    /// Drop every table and apply all migrations again.
    Fresh,
    /// Show applied and pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a back-office user; the password is asked on the terminal.
    Create(UserCreateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Admin,
    Manager,
    Customer,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Role::Admin,
            RoleArg::Manager => Role::Manager,
            RoleArg::Customer => Role::Customer,
        }
    }
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long, value_enum, default_value_t = RoleArg::Manager)]
    role: RoleArg,
}

#[derive(Args, Debug)]
struct Room {
    #[command(subcommand)]
    command: RoomCommand,
}

#[derive(Subcommand, Debug)]
enum RoomCommand {
    /// Register a room.
    Create(RoomCreateArgs),
    /// List rooms with their cached booked flag.
    List,
    /// Recompute the cached booked flag of a room for today.
    Refresh(RoomRefreshArgs),
}

#[derive(Args, Debug)]
struct RoomRefreshArgs {
    #[arg(long)]
    rid: i64,
}

#[derive(Args, Debug)]
struct RoomCreateArgs {
    #[arg(long)]
    rid: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    /// Nightly price in whole currency units.
    #[arg(long)]
    price: i64,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    Ok(Database::connect(database_url).await?)
}

async fn engine(db: DatabaseConnection) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    migration::Migrator::up(&db, None).await?;
    Ok(Engine::builder().database(db).build().await?)
}

async fn migrate(
    db: &DatabaseConnection,
    command: MigrateCommand,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        MigrateCommand::Up => migration::Migrator::up(db, None).await?,
        MigrateCommand::Down => migration::Migrator::down(db, Some(1)).await?,
        MigrateCommand::Fresh => migration::Migrator::fresh(db).await?,
        MigrateCommand::Status => migration::Migrator::status(db).await?,
    }
    Ok(())
}

/// Refresh the room's flag relative to `today` and read it back.
async fn refresh_room(
    engine: &Engine,
    rid: i64,
    today: NaiveDate,
) -> Result<engine::Room, EngineError> {
    engine.refresh_room_flag(rid, today).await?;
    engine.room(rid).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Migrate(Migrate { command }) => {
            migrate(&db, command).await?;
            println!("done");
        }
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let engine = engine(db).await?;
            let password = prompt::new_password()?;

            match engine
                .new_user(&args.email, &password, args.role.into())
                .await
            {
                Ok(user) => println!(
                    "created user: {} ({}, uid {})",
                    user.email,
                    user.role.as_str(),
                    user.uid
                ),
                Err(EngineError::ExistingKey(email)) => {
                    eprintln!("user already exists: {email}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Room(Room {
            command: RoomCommand::Create(args),
        }) => {
            let engine = engine(db).await?;
            match engine
                .new_room(args.rid, &args.name, &args.category, args.price)
                .await
            {
                Ok(room) => println!("created room: {} {}", room.rid, room.name),
                Err(EngineError::ExistingKey(_)) => {
                    eprintln!("room already exists: {}", args.rid);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Room(Room {
            command: RoomCommand::List,
        }) => {
            let engine = engine(db).await?;
            for room in engine.rooms().await? {
                println!(
                    "{:>5}  {:<20} {:<12} {:>8}  {}",
                    room.rid,
                    room.name,
                    room.category,
                    room.price,
                    if room.is_booked { "booked" } else { "free" }
                );
            }
        }
        Command::Room(Room {
            command: RoomCommand::Refresh(args),
        }) => {
            let engine = engine(db).await?;
            let room = refresh_room(&engine, args.rid, Utc::now().date_naive()).await?;
            println!(
                "room {}: {}",
                room.rid,
                if room.is_booked { "booked" } else { "free" }
            );
        }
    }

    Ok(())
}
