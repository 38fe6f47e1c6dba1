//! Training session endpoints

use super::{ClientError, FitrackClient};
use fitrack_core::{
    NewTrainingSession, ProgramId, SessionId, TrainingSession, TrainingSessionUpdate,
};
use reqwest::Method;

impl FitrackClient {
    /// List sessions, scoped to one program when `program` is set
    pub async fn list_sessions(
        &self,
        program: Option<ProgramId>,
    ) -> Result<Vec<TrainingSession>, ClientError> {
        let path = match program {
            Some(program) => format!("/programs/{program}/training-sessions"),
            None => "/training-sessions".to_string(),
        };
        let request = self.request(Method::GET, &path);
        self.execute_data(request).await
    }

    /// Get a session with its exercises
    pub async fn get_session(&self, id: SessionId) -> Result<TrainingSession, ClientError> {
        let request = self.request(Method::GET, &format!("/training-sessions/{id}"));
        self.execute_data(request).await
    }

    pub async fn create_session(
        &self,
        session: &NewTrainingSession,
    ) -> Result<TrainingSession, ClientError> {
        let request = self.request(Method::POST, "/training-sessions").json(session);
        self.execute_data(request).await
    }

    pub async fn update_session(
        &self,
        id: SessionId,
        update: &TrainingSessionUpdate,
    ) -> Result<TrainingSession, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/training-sessions/{id}"))
            .json(update);
        self.execute_data(request).await
    }

    pub async fn delete_session(&self, id: SessionId) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/training-sessions/{id}"));
        self.execute_empty(request).await
    }
}
