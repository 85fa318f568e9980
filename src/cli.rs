//! Command surface for pgroster.
//!
//! Four subcommands map one-to-one onto the repository operations. Every
//! mutating command prints its outcome and then renders the full list, so
//! the effect of the change is visible immediately.
use crate::core::db::students::StudentStore;
use crate::render::{self, OutputFormat};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pgroster",
    author,
    version,
    about = "Manage a PostgreSQL student roster from the terminal",
    long_about = "Create, list, update and delete rows of the students table. \
                  Connection settings come from the standard PG environment \
                  variables (PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all students
    List(ListArgs),
    /// Add a student
    Add(AddArgs),
    /// Update a student's email
    Update(UpdateArgs),
    /// Delete a student
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub output: ListFormat,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// First name
    #[arg(long = "first")]
    pub first: String,

    /// Last name
    #[arg(long = "last")]
    pub last: String,

    /// Email (must be unique)
    #[arg(long)]
    pub email: String,

    /// Enrollment date (optional)
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// student_id of the row to update
    #[arg(long)]
    pub id: i32,

    /// New email
    #[arg(long)]
    pub email: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// student_id of the row to delete
    #[arg(long)]
    pub id: i32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Table,
    Json,
}

impl From<ListFormat> for OutputFormat {
    fn from(format: ListFormat) -> Self {
        match format {
            ListFormat::Table => OutputFormat::Table,
            ListFormat::Json => OutputFormat::Json,
        }
    }
}

/// Dispatches a parsed command against the store.
pub async fn run(command: Commands, store: &mut StudentStore) -> Result<()> {
    match command {
        Commands::List(args) => run_list(args, store).await,
        Commands::Add(args) => run_add(args, store).await,
        Commands::Update(args) => run_update(args, store).await,
        Commands::Delete(args) => run_delete(args, store).await,
    }
}

async fn run_list(args: ListArgs, store: &mut StudentStore) -> Result<()> {
    let students = store.list().await?;
    println!("{}", render::render(&students, args.output.into())?);
    Ok(())
}

async fn run_add(args: AddArgs, store: &mut StudentStore) -> Result<()> {
    let student_id = store
        .create(&args.first, &args.last, &args.email, args.date)
        .await?;
    println!("Inserted student_id={student_id}");
    println!("{}", render::table(&store.list().await?));
    Ok(())
}

async fn run_update(args: UpdateArgs, store: &mut StudentStore) -> Result<()> {
    let updated = store.update_email(args.id, &args.email).await?;
    println!("{}", if updated { "Updated." } else { "No matching student_id." });
    println!("{}", render::table(&store.list().await?));
    Ok(())
}

async fn run_delete(args: DeleteArgs, store: &mut StudentStore) -> Result<()> {
    let deleted = store.delete(args.id).await?;
    println!("{}", if deleted { "Deleted." } else { "No matching student_id." });
    println!("{}", render::table(&store.list().await?));
    Ok(())
}
