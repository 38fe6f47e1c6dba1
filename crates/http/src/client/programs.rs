//! Training program endpoints

use super::{ClientError, FitrackClient};
use fitrack_core::{NewProgram, Program, ProgramId, ProgramUpdate};
use reqwest::Method;

impl FitrackClient {
    /// List the user's programs
    pub async fn list_programs(&self) -> Result<Vec<Program>, ClientError> {
        let request = self.request(Method::GET, "/programs");
        self.execute_data(request).await
    }

    /// Get a single program
    pub async fn get_program(&self, id: ProgramId) -> Result<Program, ClientError> {
        let request = self.request(Method::GET, &format!("/programs/{id}"));
        self.execute_data(request).await
    }

    /// Create a program
    pub async fn create_program(&self, program: &NewProgram) -> Result<Program, ClientError> {
        let request = self.request(Method::POST, "/programs").json(program);
        self.execute_data(request).await
    }

    /// Update the fields set in `update`
    pub async fn update_program(
        &self,
        id: ProgramId,
        update: &ProgramUpdate,
    ) -> Result<Program, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/programs/{id}"))
            .json(update);
        self.execute_data(request).await
    }

    /// Delete a program
    pub async fn delete_program(&self, id: ProgramId) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/programs/{id}"));
        self.execute_empty(request).await
    }
}
