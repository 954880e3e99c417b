use super::fetcher::{RawResponse, Transport};
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replays queued responses per path and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<RawResponse>>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, status: u16, body: &str) -> Self {
        self.push(path, Ok(RawResponse::new(status, body)))
    }

    pub fn fail(self, path: &str, error: crate::error::AnalysisError) -> Self {
        self.push(path, Err(error))
    }

    fn push(self, path: &str, response: Result<RawResponse>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    pub fn last_query(&self, path: &str) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .unwrap_or_default()
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        self.requests.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        self.routes
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("no scripted response left for {path}"))
    }
}

pub(crate) fn contributor_json(login: &str, total: u64, weeks: &[(i64, u64, u64, u64)]) -> String {
    let weeks: Vec<String> = weeks
        .iter()
        .map(|(w, a, d, c)| format!(r#"{{"w":{w},"a":{a},"d":{d},"c":{c}}}"#))
        .collect();
    format!(
        r#"{{"author":{{"login":"{login}","avatar_url":"https://avatars.example/{login}"}},"total":{total},"weeks":[{}]}}"#,
        weeks.join(",")
    )
}

pub(crate) fn pull_json(number: u64, login: Option<&str>, merged: bool) -> String {
    let user = match login {
        Some(login) => format!(
            r#"{{"login":"{login}","avatar_url":"https://avatars.example/pr/{login}"}}"#
        ),
        None => "null".to_string(),
    };
    let merged_at = if merged {
        r#""2024-05-01T12:00:00Z""#
    } else {
        "null"
    };
    format!(
        r#"{{"number":{number},"title":"change {number}","user":{user},"merged_at":{merged_at}}}"#
    )
}
