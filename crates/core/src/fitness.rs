//! Training programs, sessions and exercises

use serde::{Deserialize, Serialize};

pub type ProgramId = i64;
pub type SessionId = i64;
pub type ExerciseId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramType {
    Strength,
    Cardio,
    WeightLoss,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    #[serde(rename = "type", default)]
    pub program_type: ProgramType,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for `POST /programs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProgram {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<u32>,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
}

/// Partial update for `PATCH /programs/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgramUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    /// Load in kilograms; zero for bodyweight work
    #[serde(default)]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExerciseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: SessionId,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Payload for `POST /training-sessions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrainingSession {
    pub program_id: ProgramId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingSessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_program_type_wire_names() {
        let program: Program = serde_json::from_value(json!({
            "id": 3,
            "name": "Perdida de peso",
            "duration_weeks": 16,
            "type": "weight-loss",
            "created_at": "2025-02-05"
        }))
        .unwrap();
        assert_eq!(program.program_type, ProgramType::WeightLoss);

        let unknown: Program =
            serde_json::from_value(json!({"id": 4, "name": "Yoga", "type": "mobility"})).unwrap();
        assert_eq!(unknown.program_type, ProgramType::Other);
    }

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let update = ProgramUpdate {
            duration_weeks: Some(10),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"duration_weeks": 10})
        );
    }

    #[test]
    fn test_session_without_exercises() {
        let session: TrainingSession = serde_json::from_value(json!({
            "id": 1,
            "program_id": 1,
            "name": "Dia 1: piernas",
            "duration_minutes": 60
        }))
        .unwrap();
        assert!(session.exercises.is_empty());
    }

    #[test]
    fn test_session_with_nested_exercises() {
        let session: TrainingSession = serde_json::from_value(json!({
            "id": 2,
            "name": "Pecho y espalda",
            "exercises": [
                {"id": 4, "name": "Press de banca", "sets": 4, "reps": 8, "weight": 60},
                {"id": 5, "name": "Dominadas", "sets": 3, "reps": 10, "weight": 0}
            ]
        }))
        .unwrap();
        assert_eq!(session.exercises.len(), 2);
        assert_eq!(session.exercises[1].weight, 0.0);
        assert_eq!(session.exercises[0].session_id, None);
    }
}
