use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{AgentRegistration, ProfileField};

/// Registration webhook payload sent by the experience platform
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAgentRequest {
    #[validate(length(min = 1, message = "agentUsername is required"))]
    #[serde(default)]
    pub agent_username: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_facts_url: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub settings: Option<AgentSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub anonymous: Option<bool>,
    #[serde(default)]
    pub frequency: Option<String>,
}

impl RegisterAgentRequest {
    pub fn into_registration(self) -> AgentRegistration {
        let settings = self.settings.unwrap_or_default();
        AgentRegistration {
            username: self.agent_username,
            agent_name: self.agent_name,
            agent_facts_url: self.agent_facts_url,
            callback_url: self.callback_url,
            mode: self.mode.unwrap_or_else(|| "autonomous".to_string()),
            anonymous: settings.anonymous.unwrap_or(false),
            frequency: settings.frequency.unwrap_or_else(|| "on_trigger".to_string()),
        }
    }
}

/// Deregistration webhook payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeregisterAgentRequest {
    #[validate(length(min = 1, message = "agentUsername is required"))]
    #[serde(default)]
    pub agent_username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewQuery {
    pub category: Option<String>,
}

/// An interview answer: either free text / a comma-separated list, or a JSON array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Column representation: arrays are joined with commas
    pub fn into_column(self) -> String {
        match self {
            AnswerValue::Text(text) => text,
            AnswerValue::List(items) => items.join(","),
        }
    }
}

/// Interview answers submitted for a profile. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileAnswers {
    pub communication_style: Option<AnswerValue>,
    pub values_priorities: Option<AnswerValue>,
    pub humor_style: Option<AnswerValue>,
    pub interests: Option<AnswerValue>,
    pub energy_level: Option<AnswerValue>,
    pub conflict_style: Option<AnswerValue>,
    pub attachment_style: Option<AnswerValue>,
    pub work_style: Option<AnswerValue>,
    pub expertise: Option<AnswerValue>,
    pub dealbreakers: Option<AnswerValue>,
    pub looking_for: Option<AnswerValue>,
    pub match_types: Option<AnswerValue>,
}

impl ProfileAnswers {
    /// Answered fields in column order, converted to their stored form
    pub fn into_fields(self) -> Vec<(ProfileField, String)> {
        let answers = [
            (ProfileField::CommunicationStyle, self.communication_style),
            (ProfileField::ValuesPriorities, self.values_priorities),
            (ProfileField::HumorStyle, self.humor_style),
            (ProfileField::Interests, self.interests),
            (ProfileField::EnergyLevel, self.energy_level),
            (ProfileField::ConflictStyle, self.conflict_style),
            (ProfileField::AttachmentStyle, self.attachment_style),
            (ProfileField::WorkStyle, self.work_style),
            (ProfileField::Expertise, self.expertise),
            (ProfileField::Dealbreakers, self.dealbreakers),
            (ProfileField::LookingFor, self.looking_for),
            (ProfileField::MatchTypes, self.match_types),
        ];

        answers
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v.into_column())))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindMatchesQuery {
    #[serde(rename = "type")]
    pub match_type: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1, message = "agent_a is required"))]
    #[serde(default)]
    pub agent_a: String,
    #[validate(length(min = 1, message = "agent_b is required"))]
    #[serde(default)]
    pub agent_b: String,
    #[validate(length(min = 1, message = "match_type is required"))]
    #[serde(default)]
    pub match_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDateRequest {
    pub match_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinueDateRequest {
    pub match_id: i64,
    pub round: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateDateRequest {
    #[validate(length(min = 1, message = "rater_username is required"))]
    #[serde(alias = "raterUsername", default)]
    pub rater_username: String,
    #[validate(range(min = 1, max = 10, message = "chemistry_score must be between 1 and 10"))]
    #[serde(alias = "chemistryScore")]
    pub chemistry_score: u8,
    #[serde(alias = "wouldMeetAgain")]
    pub would_meet_again: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_accept_text_and_arrays() {
        let answers: ProfileAnswers = serde_json::from_value(serde_json::json!({
            "communication_style": "direct, warm",
            "values_priorities": ["honesty", "loyalty", "knowledge"],
            "unknown_field": "ignored"
        }))
        .unwrap();

        let fields = answers.into_fields();
        assert_eq!(
            fields,
            vec![
                (ProfileField::CommunicationStyle, "direct, warm".to_string()),
                (ProfileField::ValuesPriorities, "honesty,loyalty,knowledge".to_string()),
            ]
        );
    }

    #[test]
    fn test_registration_defaults() {
        let req: RegisterAgentRequest =
            serde_json::from_value(serde_json::json!({ "agentUsername": "nova" })).unwrap();
        let registration = req.into_registration();

        assert_eq!(registration.username, "nova");
        assert_eq!(registration.mode, "autonomous");
        assert_eq!(registration.frequency, "on_trigger");
        assert!(!registration.anonymous);
    }

    #[test]
    fn test_missing_username_fails_validation() {
        let req: RegisterAgentRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_chemistry_score_range() {
        let req = RateDateRequest {
            rater_username: "nova".to_string(),
            chemistry_score: 11,
            would_meet_again: true,
            notes: None,
        };
        assert!(req.validate().is_err());
    }
}
