//! Blocking client for the TargetProcess REST API (v1).

use crate::api::WorkItemApi;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::logging::redact;
use crate::models::WorkItem;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct TeamAssignments {
    #[serde(rename = "Items", default)]
    items: Vec<TeamAssignment>,
}

#[derive(Debug, Deserialize)]
struct TeamAssignment {
    #[serde(rename = "Assignable")]
    assignable: Assignable,
}

#[derive(Debug, Deserialize)]
struct Assignable {
    #[serde(rename = "Id")]
    id: u64,
    #[serde(rename = "Name", default)]
    name: String,
}

pub struct TargetProcessClient {
    base_url: String,
    team_name: String,
    take: u32,
    access_token: String,
    user_id: Option<u64>,
    agent: ureq::Agent,
}

fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(20))
        .timeout_write(Duration::from_secs(20))
        .build()
}

impl TargetProcessClient {
    pub fn new(base_url: &str, team_name: &str, take: u32, access_token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            team_name: team_name.to_string(),
            take,
            access_token: access_token.to_string(),
            user_id: None,
            agent: http_agent(),
        }
    }

    pub fn with_user_id(mut self, user_id: Option<u64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.tp_url, &cfg.tp_team_name, cfg.tp_take, &cfg.tp_access_token)
            .with_user_id(cfg.tp_userid)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn where_clause(&self) -> String {
        format!(
            "(Team.Name eq '{}')and(Assignable.EntityType.Name eq 'UserStory')and(EntityState.Name ne 'Done')",
            self.team_name
        )
    }

    fn fetch_assignments(&self) -> AppResult<Vec<WorkItem>> {
        let url = self.endpoint("/api/v1/TeamAssignments");
        let take = self.take.to_string();
        let filter = self.where_clause();
        debug!(url = %url, "fetching candidate items");

        let response = self
            .agent
            .get(&url)
            .query("access_token", &self.access_token)
            .query("orderByDesc", "Assignable.Id")
            .query("format", "json")
            .query("take", &take)
            .query("where", &filter)
            .call()
            .map_err(|e| AppError::Http(redact(&e.to_string()).into_owned()))?;

        let body = response.into_string()?;
        let assignments: TeamAssignments = serde_json::from_str(&body)?;

        Ok(assignments
            .items
            .into_iter()
            .map(|a| WorkItem::new(a.assignable.id, a.assignable.name))
            .collect())
    }
}

impl WorkItemApi for TargetProcessClient {
    fn list_candidate_items(&self) -> Vec<WorkItem> {
        match self.fetch_assignments() {
            Ok(items) => {
                debug!(count = items.len(), "fetched candidate items");
                items
            }
            Err(e) => {
                warn!(error = %e, "cannot fetch candidate items");
                Vec::new()
            }
        }
    }

    fn submit_time(&self, item_id: u64, hours: f64) -> AppResult<()> {
        debug!(item_id, hours, "submit a registration");

        let url = self.endpoint("/api/v1/times");
        let payload = json!({
            "User": { "Id": self.user_id },
            "Spent": hours,
            "Description": ".",
            "Assignable": { "Id": item_id },
        });

        self.agent
            .post(&url)
            .query("access_token", &self.access_token)
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string())
            .map_err(|e| AppError::Http(redact(&e.to_string()).into_owned()))?;

        debug!(item_id, "done submitting");
        Ok(())
    }
}
