//! Exercises nested under a training session

use super::{ClientError, FitrackClient};
use fitrack_core::{Exercise, ExerciseId, ExerciseUpdate, NewExercise, SessionId};
use reqwest::Method;

fn exercises_path(session: SessionId) -> String {
    format!("/training-sessions/{session}/exercises")
}

impl FitrackClient {
    pub async fn list_exercises(&self, session: SessionId) -> Result<Vec<Exercise>, ClientError> {
        let request = self.request(Method::GET, &exercises_path(session));
        self.execute_data(request).await
    }

    /// Add an exercise to a session
    pub async fn add_exercise(
        &self,
        session: SessionId,
        exercise: &NewExercise,
    ) -> Result<Exercise, ClientError> {
        let request = self
            .request(Method::POST, &exercises_path(session))
            .json(exercise);
        self.execute_data(request).await
    }

    pub async fn update_exercise(
        &self,
        session: SessionId,
        id: ExerciseId,
        update: &ExerciseUpdate,
    ) -> Result<Exercise, ClientError> {
        let path = format!("{}/{id}", exercises_path(session));
        let request = self.request(Method::PATCH, &path).json(update);
        self.execute_data(request).await
    }

    pub async fn delete_exercise(
        &self,
        session: SessionId,
        id: ExerciseId,
    ) -> Result<(), ClientError> {
        let path = format!("{}/{id}", exercises_path(session));
        let request = self.request(Method::DELETE, &path);
        self.execute_empty(request).await
    }
}
