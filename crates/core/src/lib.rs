//! Fitrack core types and credential storage

pub mod credentials;
pub mod error;
pub mod fitness;
pub mod storage;
pub mod types;

pub use credentials::CredentialStore;
pub use error::{CoreError, CoreResult};
pub use fitness::{
    Exercise, ExerciseId, ExerciseUpdate, NewExercise, NewProgram, NewTrainingSession, Program,
    ProgramId, ProgramType, ProgramUpdate, SessionId, TrainingSession, TrainingSessionUpdate,
};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
pub use storage::{KeyValueStore, MemoryStore};
pub use types::{Credential, User, UserId};
