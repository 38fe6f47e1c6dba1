//! CLI commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use fitrack_core::{
    ExerciseId, ExerciseUpdate, FileStore, NewExercise, NewProgram, NewTrainingSession,
    ProgramId, ProgramType, ProgramUpdate, SessionId, TrainingSessionUpdate, UserId,
};
use fitrack_http::{
    AuthService, FitrackClient, LoginRequest, NewUser, RegisterRequest, SessionExpiredHandler,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "FITRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in with it
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "FITRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Ask the server instead of reading the stored copy
        #[arg(long)]
        remote: bool,
    },

    /// Training programs
    Programs {
        #[command(subcommand)]
        command: ProgramCommands,
    },

    /// Training sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Exercises within a training session
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// User accounts
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProgramKind {
    Strength,
    Cardio,
    WeightLoss,
    Other,
}

impl From<ProgramKind> for ProgramType {
    fn from(kind: ProgramKind) -> Self {
        match kind {
            ProgramKind::Strength => Self::Strength,
            ProgramKind::Cardio => Self::Cardio,
            ProgramKind::WeightLoss => Self::WeightLoss,
            ProgramKind::Other => Self::Other,
        }
    }
}

#[derive(Args)]
pub struct ProgramFields {
    #[arg(long)]
    description: Option<String>,

    /// Length of the program in weeks
    #[arg(long)]
    weeks: Option<u32>,
}

#[derive(Subcommand)]
pub enum ProgramCommands {
    List,
    Show {
        id: ProgramId,
    },
    Create {
        name: String,

        #[arg(long = "type", value_enum, default_value = "other")]
        kind: ProgramKind,

        #[command(flatten)]
        fields: ProgramFields,
    },
    Update {
        id: ProgramId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type", value_enum)]
        kind: Option<ProgramKind>,

        #[command(flatten)]
        fields: ProgramFields,
    },
    Delete {
        id: ProgramId,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    List {
        /// Only sessions of this program
        #[arg(long)]
        program: Option<ProgramId>,
    },
    Show {
        id: SessionId,
    },
    Create {
        #[arg(long)]
        program: ProgramId,

        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        minutes: Option<u32>,
    },
    Update {
        id: SessionId,

        #[arg(long)]
        program: Option<ProgramId>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        minutes: Option<u32>,
    },
    Delete {
        id: SessionId,
    },
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    List {
        session: SessionId,
    },
    Add {
        session: SessionId,

        name: String,

        #[arg(long)]
        sets: u32,

        #[arg(long)]
        reps: u32,

        /// Load in kilograms
        #[arg(long, default_value = "0")]
        weight: f64,
    },
    Update {
        session: SessionId,

        id: ExerciseId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        sets: Option<u32>,

        #[arg(long)]
        reps: Option<u32>,

        #[arg(long)]
        weight: Option<f64>,
    },
    Delete {
        session: SessionId,

        id: ExerciseId,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    List,
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "FITRACK_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        role: Option<String>,
    },
}

/// Tells the user to sign in again when the server rejects the stored token
struct ExpiredSessionNotice;

impl SessionExpiredHandler for ExpiredSessionNotice {
    fn on_session_expired(&self) {
        eprintln!("Session expired or revoked. Run `fitrack login` to sign in again.");
    }
}

fn auth_service(settings: &Settings) -> Result<AuthService> {
    let client = FitrackClient::builder()
        .config(&settings.client)
        .store(Arc::new(FileStore::new(&settings.credentials_path)))
        .on_session_expired(Arc::new(ExpiredSessionNotice))
        .build()
        .context("Failed to build HTTP client")?;

    Ok(AuthService::new(client))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Commands {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let auth = auth_service(settings)?;

        match self {
            Self::Login { email, password } => {
                let session = auth
                    .login(&LoginRequest::new(email, password))
                    .await
                    .context("Login failed")?;
                let name = session.user.as_ref().map_or("unknown user", |u| u.display_name());
                println!("Signed in as {name}");
                Ok(())
            }
            Self::Register {
                name,
                email,
                password,
            } => {
                let session = auth
                    .register(&RegisterRequest::new(name, email, password))
                    .await
                    .context("Registration failed")?;
                let name = session.user.as_ref().map_or("unknown user", |u| u.display_name());
                println!("Registered and signed in as {name}");
                Ok(())
            }
            Self::Logout => {
                let outcome = auth.logout().await;
                if outcome.remote_acknowledged {
                    println!("Signed out");
                } else {
                    println!("Signed out locally (server could not be notified)");
                }
                Ok(())
            }
            Self::Whoami { remote } => whoami(&auth, remote).await,
            Self::Programs { command } => command.execute(auth.client()).await,
            Self::Sessions { command } => command.execute(auth.client()).await,
            Self::Exercises { command } => command.execute(auth.client()).await,
            Self::Users { command } => command.execute(auth.client()).await,
        }
    }
}

async fn whoami(auth: &AuthService, remote: bool) -> Result<()> {
    let Some(credential) = auth.client().credentials().credential() else {
        println!("Not signed in");
        return Ok(());
    };

    let user = if remote {
        Some(auth.me().await.context("Failed to fetch profile")?)
    } else {
        credential.user
    };

    match user {
        Some(user) => print_json(&user),
        None => {
            println!("Signed in (no profile stored)");
            Ok(())
        }
    }
}

impl ProgramCommands {
    pub async fn execute(self, client: &FitrackClient) -> Result<()> {
        match self {
            Self::List => print_json(&client.list_programs().await?),
            Self::Show { id } => print_json(&client.get_program(id).await?),
            Self::Create { name, kind, fields } => {
                let program = client
                    .create_program(&NewProgram {
                        name,
                        description: fields.description,
                        duration_weeks: fields.weeks,
                        program_type: kind.into(),
                    })
                    .await?;
                info!(id = program.id, "Created program");
                print_json(&program)
            }
            Self::Update {
                id,
                name,
                kind,
                fields,
            } => {
                let update = ProgramUpdate {
                    name,
                    description: fields.description,
                    duration_weeks: fields.weeks,
                    program_type: kind.map(Into::into),
                };
                print_json(&client.update_program(id, &update).await?)
            }
            Self::Delete { id } => {
                client.delete_program(id).await?;
                println!("Deleted program {id}");
                Ok(())
            }
        }
    }
}

impl SessionCommands {
    pub async fn execute(self, client: &FitrackClient) -> Result<()> {
        match self {
            Self::List { program } => print_json(&client.list_sessions(program).await?),
            Self::Show { id } => print_json(&client.get_session(id).await?),
            Self::Create {
                program,
                name,
                description,
                minutes,
            } => {
                let session = client
                    .create_session(&NewTrainingSession {
                        program_id: program,
                        name,
                        description,
                        duration_minutes: minutes,
                    })
                    .await?;
                info!(id = session.id, "Created training session");
                print_json(&session)
            }
            Self::Update {
                id,
                program,
                name,
                description,
                minutes,
            } => {
                let update = TrainingSessionUpdate {
                    program_id: program,
                    name,
                    description,
                    duration_minutes: minutes,
                };
                print_json(&client.update_session(id, &update).await?)
            }
            Self::Delete { id } => {
                client.delete_session(id).await?;
                println!("Deleted training session {id}");
                Ok(())
            }
        }
    }
}

impl ExerciseCommands {
    pub async fn execute(self, client: &FitrackClient) -> Result<()> {
        match self {
            Self::List { session } => print_json(&client.list_exercises(session).await?),
            Self::Add {
                session,
                name,
                sets,
                reps,
                weight,
            } => {
                let exercise = NewExercise {
                    name,
                    sets,
                    reps,
                    weight,
                };
                print_json(&client.add_exercise(session, &exercise).await?)
            }
            Self::Update {
                session,
                id,
                name,
                sets,
                reps,
                weight,
            } => {
                let update = ExerciseUpdate {
                    name,
                    sets,
                    reps,
                    weight,
                };
                print_json(&client.update_exercise(session, id, &update).await?)
            }
            Self::Delete { session, id } => {
                client.delete_exercise(session, id).await?;
                println!("Deleted exercise {id} from training session {session}");
                Ok(())
            }
        }
    }
}

impl UserCommands {
    pub async fn execute(self, client: &FitrackClient) -> Result<()> {
        match self {
            Self::List => print_json(&client.list_users().await?),
            Self::Show { id } => {
                let id = id
                    .parse::<i64>()
                    .map_or_else(|_| UserId::from(id.as_str()), UserId::from);
                print_json(&client.get_user(&id).await?)
            }
            Self::Create {
                name,
                email,
                password,
                role,
            } => {
                let user = client
                    .create_user(&NewUser {
                        name,
                        email,
                        password,
                        role,
                    })
                    .await?;
                print_json(&user)
            }
        }
    }
}
