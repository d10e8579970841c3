mod commands;
pub mod error;
mod utils;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::IntoDiagnostic;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::error::{CliError, CliResult};
use crate::config::Config;
use crate::db::{Database, SqliteDatabase};

#[derive(Parser)]
#[command(name = "gbk")]
#[command(author, version, about = "School gradebook CLI", long_about = None)]
pub struct Cli {
    /// Path to the YAML config file (default: ./gradebook.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// The closed set of models the CRUD verbs operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Model {
    Teacher,
    Group,
    Student,
    Subject,
    Grade,
}

#[derive(Args)]
struct CreateArgs {
    /// Model to create
    #[arg(short, long)]
    model: Model,

    /// Full name (teacher, student) or name (group, subject)
    #[arg(long)]
    name: Option<String>,

    /// Group the student belongs to
    #[arg(long)]
    group_id: Option<i64>,

    /// Teacher of the subject
    #[arg(long)]
    teacher_id: Option<i64>,

    /// Student the grade belongs to
    #[arg(long)]
    student_id: Option<i64>,

    /// Subject the grade belongs to
    #[arg(long)]
    subject_id: Option<i64>,

    /// Grade value
    #[arg(long)]
    grade: Option<i64>,

    /// Grade date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a record of the selected model
    Create(CreateArgs),
    /// List all records of the selected model
    List {
        #[arg(short, long)]
        model: Model,
    },
    /// Update a single field of a record
    Update {
        #[arg(short, long)]
        model: Model,
        #[arg(long)]
        id: i64,
        /// Field name, validated against the model's known fields
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Remove a record
    Remove {
        #[arg(short, long)]
        model: Model,
        #[arg(long)]
        id: i64,
    },
    /// Run an analytical report
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Populate the database with sample data
    Seed {
        #[arg(long, default_value_t = 50)]
        students: u32,
        #[arg(long, default_value_t = 3)]
        grades_per_subject: u32,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Top students by average grade across all subjects
    TopStudents {
        #[arg(long, default_value_t = 5)]
        limit: i64,
    },
    /// Best student in one subject
    SubjectTop {
        #[arg(long)]
        subject_id: i64,
    },
    /// Average grade per group in one subject
    GroupAverages {
        #[arg(long)]
        subject_id: i64,
    },
    /// Average grade over all students
    GlobalAverage,
    /// Subjects taught by one teacher
    TeacherSubjects {
        #[arg(long)]
        teacher_id: i64,
    },
    /// Students belonging to a group, by group name
    GroupStudents {
        #[arg(long)]
        group: String,
    },
    /// Grade list per student for one group and subject
    GradeSheet {
        #[arg(long)]
        group: String,
        #[arg(long)]
        subject: String,
    },
    /// Average grade per subject taught by one teacher
    TeacherAverages {
        #[arg(long)]
        teacher_id: i64,
    },
    /// Subjects taken by one student
    StudentSubjects {
        #[arg(long)]
        student_id: i64,
    },
    /// Subjects of a student taught by one teacher
    StudentTeacherSubjects {
        #[arg(long)]
        student_id: i64,
        #[arg(long)]
        teacher_id: i64,
    },
    /// Average per subject for a student/teacher pair
    StudentTeacherAverages {
        #[arg(long)]
        student_id: i64,
        #[arg(long)]
        teacher_id: i64,
    },
    /// Latest-dated grades per student within one group and subject
    LatestGrades {
        #[arg(long)]
        group_id: i64,
        #[arg(long)]
        subject_id: i64,
    },
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["gbk", "--help"]);
        return Ok(());
    };

    let config = Config::load(cli.config.as_deref())?;
    if let Some(parent) = config.database.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }

    let db = SqliteDatabase::open(&config.database.path, config.database.max_connections).await?;
    db.migrate().await?;

    // Operation failures from here on are logged, never propagated; the CLI
    // itself does not crash on a failed verb.
    match dispatch(&db, command).await {
        Ok(output) => println!("{}", output),
        Err(e) => error!(error = %e, "operation failed"),
    }

    Ok(())
}

async fn dispatch(db: &SqliteDatabase, command: Commands) -> CliResult<String> {
    match command {
        Commands::Create(args) => create(db, args).await,
        Commands::List { model } => match model {
            Model::Teacher => commands::teacher::list(db).await,
            Model::Group => commands::group::list(db).await,
            Model::Student => commands::student::list(db).await,
            Model::Subject => commands::subject::list(db).await,
            Model::Grade => commands::grade::list(db).await,
        },
        Commands::Update {
            model,
            id,
            field,
            value,
        } => match model {
            Model::Teacher => commands::teacher::update(db, id, &field, &value).await,
            Model::Group => commands::group::update(db, id, &field, &value).await,
            Model::Student => commands::student::update(db, id, &field, &value).await,
            Model::Subject => commands::subject::update(db, id, &field, &value).await,
            Model::Grade => commands::grade::update(db, id, &field, &value).await,
        },
        Commands::Remove { model, id } => match model {
            Model::Teacher => commands::teacher::remove(db, id).await,
            Model::Group => commands::group::remove(db, id).await,
            Model::Student => commands::student::remove(db, id).await,
            Model::Subject => commands::subject::remove(db, id).await,
            Model::Grade => commands::grade::remove(db, id).await,
        },
        Commands::Report { command } => Ok(report(db, command).await),
        Commands::Seed {
            students,
            grades_per_subject,
        } => commands::seed::run(db, students, grades_per_subject).await,
    }
}

fn required<T>(value: Option<T>, flag: &str, model: Model) -> CliResult<T> {
    value.ok_or_else(|| CliError::MissingArgument {
        message: format!("{} is required when creating a {:?}", flag, model),
    })
}

async fn create(db: &SqliteDatabase, args: CreateArgs) -> CliResult<String> {
    match args.model {
        Model::Teacher => {
            let name = required(args.name, "--name", args.model)?;
            commands::teacher::create(db, &name).await
        }
        Model::Group => {
            let name = required(args.name, "--name", args.model)?;
            commands::group::create(db, &name).await
        }
        Model::Student => {
            let name = required(args.name, "--name", args.model)?;
            let group_id = required(args.group_id, "--group-id", args.model)?;
            commands::student::create(db, &name, group_id).await
        }
        Model::Subject => {
            let name = required(args.name, "--name", args.model)?;
            let teacher_id = required(args.teacher_id, "--teacher-id", args.model)?;
            commands::subject::create(db, &name, teacher_id).await
        }
        Model::Grade => {
            let grade = required(args.grade, "--grade", args.model)?;
            let student_id = required(args.student_id, "--student-id", args.model)?;
            let subject_id = required(args.subject_id, "--subject-id", args.model)?;
            let date = args.date.unwrap_or_else(crate::db::utils::current_date);
            commands::grade::create(db, grade, Some(date), student_id, subject_id).await
        }
    }
}

async fn report(db: &SqliteDatabase, command: ReportCommands) -> String {
    match command {
        ReportCommands::TopStudents { limit } => commands::report::top_students(db, limit).await,
        ReportCommands::SubjectTop { subject_id } => {
            commands::report::subject_top_student(db, subject_id).await
        }
        ReportCommands::GroupAverages { subject_id } => {
            commands::report::group_subject_averages(db, subject_id).await
        }
        ReportCommands::GlobalAverage => commands::report::global_average(db).await,
        ReportCommands::TeacherSubjects { teacher_id } => {
            commands::report::teacher_subjects(db, teacher_id).await
        }
        ReportCommands::GroupStudents { group } => {
            commands::report::group_students(db, &group).await
        }
        ReportCommands::GradeSheet { group, subject } => {
            commands::report::group_subject_grades(db, &group, &subject).await
        }
        ReportCommands::TeacherAverages { teacher_id } => {
            commands::report::teacher_subject_averages(db, teacher_id).await
        }
        ReportCommands::StudentSubjects { student_id } => {
            commands::report::student_subjects(db, student_id).await
        }
        ReportCommands::StudentTeacherSubjects {
            student_id,
            teacher_id,
        } => commands::report::student_teacher_subjects(db, student_id, teacher_id).await,
        ReportCommands::StudentTeacherAverages {
            student_id,
            teacher_id,
        } => commands::report::student_teacher_averages(db, student_id, teacher_id).await,
        ReportCommands::LatestGrades {
            group_id,
            subject_id,
        } => commands::report::latest_group_grades(db, group_id, subject_id).await,
    }
}
